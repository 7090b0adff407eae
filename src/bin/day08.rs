use aoc2021::input::{cut, day_file};
use aoc2021::{logging, Error, Inputs, StringSet};

#[derive(Debug)]
struct Entry {
    patterns: Vec<String>,
    output: Vec<String>,
}

impl TryFrom<&str> for Entry {
    type Error = Error;

    fn try_from(line: &str) -> Result<Entry, Error> {
        let (patterns, output) = cut(line, " | ")?;
        let words = |s: &str| -> Vec<String> { s.split_whitespace().map(String::from).collect() };
        Ok(Entry {
            patterns: words(patterns),
            output: words(output),
        })
    }
}

/// The digit shown by a pattern whose segment count is unique.
fn easy_digit(pattern: &str) -> Option<u32> {
    match pattern.len() {
        2 => Some(1),
        3 => Some(7),
        4 => Some(4),
        7 => Some(8),
        _ => None,
    }
}

//  aaaa
// b    c
// b    c
//  dddd
// e    f
// e    f
//  gggg
/// Which scrambled wire drives each of the segments a to g.
#[derive(Debug, PartialEq, Eq)]
struct Wiring {
    segments: [String; 7],
}

const DIGIT_SEGMENTS: [&str; 10] = [
    "abcefg", "cf", "acdeg", "acdfg", "bcdf", "abdfg", "abdefg", "acf", "abcdefg", "abcdfg",
];

fn singleton(patterns: &[StringSet], len: usize) -> Result<&StringSet, Error> {
    let mut it = patterns.iter().filter(|s| s.len() == len);
    match (it.next(), it.next()) {
        (Some(s), None) => Ok(s),
        _ => Err(Error::bad_input(format!(
            "expected exactly one pattern with {} segments",
            len
        ))),
    }
}

impl Wiring {
    fn infer(patterns: &[String]) -> Result<Wiring, Error> {
        let sets: Vec<StringSet> = patterns.iter().map(|p| StringSet::from_chars(p)).collect();
        let one = singleton(&sets, 2)?;
        let seven = singleton(&sets, 3)?;
        let four = singleton(&sets, 4)?;
        let eight = singleton(&sets, 7)?;
        let fives: Vec<&StringSet> = sets.iter().filter(|s| s.len() == 5).collect();
        let sixes: Vec<&StringSet> = sets.iter().filter(|s| s.len() == 6).collect();
        if fives.len() != 3 || sixes.len() != 3 {
            return Err(Error::bad_input(format!(
                "expected three 5-segment and three 6-segment patterns in {:?}",
                patterns
            )));
        }

        // 2, 3 and 5 share only the horizontal segments.
        let horizontal = StringSet::intersect_all(fives.iter().copied());
        let a = seven.minus(one);
        let g = horizontal.minus(&seven.union(four));
        let d = horizontal.minus(&a.union(&g));
        let e = eight.minus(&StringSet::union_all([four, &a, &g]));
        // 0, 6 and 9 share a, b, f and g.
        let five = StringSet::intersect_all(sixes.iter().copied()).union(&d);
        let six = five.union(&e);
        let c = eight.minus(&six);
        let two = StringSet::union_all([&a, &c, &d, &e, &g]);
        let three = match fives.iter().find(|s| ***s != five && ***s != two) {
            Some(s) => *s,
            None => return Err(Error::bad_input("cannot identify the digit 3")),
        };
        let f = three.minus(&two);
        let b = eight.minus(&StringSet::union_all([&a, &c, &d, &e, &f, &g]));

        let wire = |s: &StringSet| -> Result<String, Error> { s.only().map(String::from) };
        Ok(Wiring {
            segments: [
                wire(&a)?,
                wire(&b)?,
                wire(&c)?,
                wire(&d)?,
                wire(&e)?,
                wire(&f)?,
                wire(&g)?,
            ],
        })
    }

    fn wires_for(&self, digit_segments: &str) -> StringSet {
        digit_segments
            .bytes()
            .map(|seg| self.segments[usize::from(seg - b'a')].clone())
            .collect()
    }

    fn decode_digit(&self, pattern: &str) -> Result<u32, Error> {
        let lit = StringSet::from_chars(pattern);
        for (digit, segments) in DIGIT_SEGMENTS.iter().enumerate() {
            if self.wires_for(segments) == lit {
                return Ok(digit as u32);
            }
        }
        Err(Error::bad_input(format!("cannot decode segments {}", lit)))
    }

    fn decode(&self, patterns: &[String]) -> Result<u32, Error> {
        patterns
            .iter()
            .try_fold(0, |n, p| -> Result<u32, Error> {
                Ok(n * 10 + self.decode_digit(p)?)
            })
    }
}

fn part1(entries: &[Entry]) -> usize {
    entries
        .iter()
        .flat_map(|e| e.output.iter())
        .filter(|p| easy_digit(p).is_some())
        .count()
}

fn part2(entries: &[Entry]) -> Result<u32, Error> {
    entries.iter().try_fold(0, |sum, entry| -> Result<u32, Error> {
        let wiring = Wiring::infer(&entry.patterns)?;
        Ok(sum + wiring.decode(&entry.output)?)
    })
}

#[cfg(test)]
const SAMPLE: &str =
    "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";

#[test]
fn test_infer() {
    let entry = Entry::try_from(SAMPLE).expect("valid test data");
    let wiring = Wiring::infer(&entry.patterns).expect("consistent patterns");
    assert_eq!(
        wiring.segments,
        ["d", "e", "a", "f", "g", "b", "c"].map(String::from)
    );
    assert_eq!(wiring.decode(&entry.output).expect("decodable"), 5353);
}

#[test]
fn test_part1() {
    let entries = vec![
        Entry::try_from(SAMPLE).expect("valid test data"),
        Entry::try_from(
            "be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe",
        )
        .expect("valid test data"),
    ];
    assert_eq!(part1(&entries), 2);
}

#[test]
fn test_part2() {
    let entries = vec![Entry::try_from(SAMPLE).expect("valid test data")];
    assert_eq!(part2(&entries).expect("decodable"), 5353);
}

#[test]
fn test_inconsistent_patterns() {
    let entry = Entry::try_from("ab abc | ab").expect("parses");
    assert!(Wiring::infer(&entry.patterns).is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let entries: Vec<Entry> = Inputs::from_args()
        .read_lines(&day_file(8))?
        .iter()
        .map(|line| Entry::try_from(line.as_str()))
        .collect::<Result<_, _>>()?;
    println!("{}", part1(&entries));
    println!("{}", part2(&entries)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 08: {}", e);
        std::process::exit(1);
    }
}
