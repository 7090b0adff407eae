use tracing::debug;

use aoc2021::input::day_file;
#[cfg(test)]
use aoc2021::input::example_lines;
use aoc2021::{logging, Error, Inputs};

/// What we found when trying to match up the brackets of a line.
#[derive(Debug, PartialEq, Eq)]
enum Check {
    /// The first closing bracket which didn't match.
    Corrupted(char),
    /// The closing brackets needed to finish the line, in order.
    Incomplete(String),
}

fn closer(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}

fn check_line(line: &str) -> Result<Check, Error> {
    let mut expected: Vec<char> = Vec::new();
    for ch in line.chars() {
        if let Some(close) = closer(ch) {
            expected.push(close);
            continue;
        }
        match ch {
            ')' | ']' | '}' | '>' => {
                if expected.pop() != Some(ch) {
                    return Ok(Check::Corrupted(ch));
                }
            }
            other => {
                return Err(Error::bad_input(format!(
                    "unexpected character '{}' in line {}",
                    other, line
                )));
            }
        }
    }
    Ok(Check::Incomplete(expected.into_iter().rev().collect()))
}

fn syntax_error_score(bad: char) -> u64 {
    match bad {
        ')' => 3,
        ']' => 57,
        '}' => 1197,
        '>' => 25137,
        _ => unreachable!("not a closing bracket: {}", bad),
    }
}

fn completion_score(completion: &str) -> u64 {
    completion.chars().fold(0, |score, ch| {
        score * 5
            + match ch {
                ')' => 1,
                ']' => 2,
                '}' => 3,
                '>' => 4,
                _ => unreachable!("not a closing bracket: {}", ch),
            }
    })
}

fn part1<S: AsRef<str>>(lines: &[S]) -> Result<u64, Error> {
    let mut total = 0;
    for line in lines {
        if let Check::Corrupted(bad) = check_line(line.as_ref())? {
            total += syntax_error_score(bad);
        }
    }
    Ok(total)
}

fn part2<S: AsRef<str>>(lines: &[S]) -> Result<u64, Error> {
    let mut scores: Vec<u64> = Vec::new();
    for line in lines {
        if let Check::Incomplete(completion) = check_line(line.as_ref())? {
            if !completion.is_empty() {
                debug!("{} completed by {}", line.as_ref(), completion);
                scores.push(completion_score(&completion));
            }
        }
    }
    if scores.is_empty() {
        return Err(Error::bad_input("no incomplete lines"));
    }
    scores.sort_unstable();
    Ok(scores[scores.len() / 2])
}

#[cfg(test)]
const EXAMPLE: &str = "
[({(<(())[]>[[{[]{<()<>>
[(()[<>])]({[<{<<[]>>(
{([(<{}[<>[]}>{[]{[(<()>
(((({<>}<{<{<>}{[]{[]{}
[[<[([]))<([[{}[[()]]]
[{[{({}]{}}([{[{{{}}([]
{<[[]]>}<{[{[{[]{()[[[]
[<(<(<(<{}))><([]([]()
<{([([[(<>()){}]>(<<{{
<{([{{}}[<[[[<>{}]]]>[]]
";

#[test]
fn test_check_line() {
    assert_eq!(check_line("()").expect("valid"), Check::Incomplete(String::new()));
    assert_eq!(check_line("<([])>").expect("valid"), Check::Incomplete(String::new()));
    assert_eq!(check_line("(]").expect("valid"), Check::Corrupted(']'));
    assert_eq!(check_line("<<}").expect("valid"), Check::Corrupted('}'));
    assert_eq!(
        check_line("{([(<{}[<>[]}>{[]{[(<()>").expect("valid"),
        Check::Corrupted('}')
    );
    assert_eq!(
        check_line("[({(<(())[]>[[{[]{<()<>>").expect("valid"),
        Check::Incomplete("}}]])})]".to_string())
    );
    assert!(check_line("(x)").is_err());
}

#[test]
fn test_completion_score() {
    assert_eq!(completion_score("}}]])})]"), 288957);
    assert_eq!(completion_score("])}>"), 294);
}

#[test]
fn test_part1() {
    assert_eq!(part1(&example_lines(EXAMPLE)).expect("valid"), 26397);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&example_lines(EXAMPLE)).expect("valid"), 288957);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(10))?;
    println!("{}", part1(&lines)?);
    println!("{}", part2(&lines)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 10: {}", e);
        std::process::exit(1);
    }
}
