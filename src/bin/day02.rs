use std::str::FromStr;

use aoc2021::input::{day_file, parse_int};
use aoc2021::{logging, Error, Inputs};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Command {
    Forward(i64),
    Down(i64),
    Up(i64),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Command, Error> {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.len() != 2 {
            return Err(Error::bad_input(format!(
                "expected 2 words, got {}: {}",
                words.len(),
                s
            )));
        }
        let n: i64 = parse_int(words[1])?;
        match words[0] {
            "forward" => Ok(Command::Forward(n)),
            "down" => Ok(Command::Down(n)),
            "up" => Ok(Command::Up(n)),
            other => Err(Error::bad_input(format!(
                "expected forward/down/up, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Position {
    horizontal: i64,
    depth: i64,
    aim: i64,
}

impl Position {
    fn product(&self) -> i64 {
        self.horizontal * self.depth
    }

    fn steer(self, command: &Command) -> Position {
        match command {
            Command::Forward(n) => Position {
                horizontal: self.horizontal + n,
                ..self
            },
            Command::Down(n) => Position {
                depth: self.depth + n,
                ..self
            },
            Command::Up(n) => Position {
                depth: self.depth - n,
                ..self
            },
        }
    }

    fn aim(self, command: &Command) -> Position {
        match command {
            Command::Forward(n) => Position {
                horizontal: self.horizontal + n,
                depth: self.depth + self.aim * n,
                ..self
            },
            Command::Down(n) => Position {
                aim: self.aim + n,
                ..self
            },
            Command::Up(n) => Position {
                aim: self.aim - n,
                ..self
            },
        }
    }
}

fn part1(commands: &[Command]) -> i64 {
    commands
        .iter()
        .fold(Position::default(), Position::steer)
        .product()
}

fn part2(commands: &[Command]) -> i64 {
    commands
        .iter()
        .fold(Position::default(), Position::aim)
        .product()
}

#[cfg(test)]
fn sample() -> Vec<Command> {
    ["forward 5", "down 5", "forward 8", "up 3", "down 8", "forward 2"]
        .iter()
        .map(|s| s.parse().expect("valid test data"))
        .collect()
}

#[test]
fn test_parse_command() {
    assert_eq!("up 3".parse::<Command>().expect("valid"), Command::Up(3));
    assert!("sideways 3".parse::<Command>().is_err());
    assert!("forward".parse::<Command>().is_err());
    assert!("forward x".parse::<Command>().is_err());
}

#[test]
fn test_part1() {
    assert_eq!(part1(&sample()), 150);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&sample()), 900);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let commands: Vec<Command> = Inputs::from_args()
        .read_lines(&day_file(2))?
        .iter()
        .map(|line| line.parse())
        .collect::<Result<_, _>>()?;
    println!("{}", part1(&commands));
    println!("{}", part2(&commands));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 02: {}", e);
        std::process::exit(1);
    }
}
