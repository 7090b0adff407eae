use aoc2021::input::day_file;
use aoc2021::{logging, Error, Inputs};

#[derive(Debug)]
struct Report {
    width: usize,
    readings: Vec<Vec<bool>>,
}

impl TryFrom<&[String]> for Report {
    type Error = Error;

    fn try_from(lines: &[String]) -> Result<Report, Error> {
        let width = match lines.first() {
            Some(line) => line.len(),
            None => return Err(Error::bad_input("no readings")),
        };
        if width == 0 || width >= u64::BITS as usize {
            return Err(Error::bad_input(format!(
                "readings must have between 1 and {} bits, not {}",
                u64::BITS - 1,
                width
            )));
        }
        let mut readings = Vec::with_capacity(lines.len());
        for line in lines {
            if line.len() != width {
                return Err(Error::bad_input(format!(
                    "expected {} bits, got '{}'",
                    width, line
                )));
            }
            let bits: Vec<bool> = line
                .chars()
                .map(|ch| match ch {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    _ => Err(Error::bad_input(format!("'{}' is not a binary digit", ch))),
                })
                .collect::<Result<_, _>>()?;
            readings.push(bits);
        }
        Ok(Report { width, readings })
    }
}

fn to_number(bits: &[bool]) -> u64 {
    bits.iter().fold(0, |acc, bit| (acc << 1) | u64::from(*bit))
}

/// Returns (count of zeros, count of ones) at `bitpos`.
fn tally(readings: &[&Vec<bool>], bitpos: usize) -> (usize, usize) {
    let ones = readings.iter().filter(|r| r[bitpos]).count();
    (readings.len() - ones, ones)
}

fn part1(report: &Report) -> u64 {
    let all: Vec<&Vec<bool>> = report.readings.iter().collect();
    let gamma_bits: Vec<bool> = (0..report.width)
        .map(|bitpos| {
            let (zeros, ones) = tally(&all, bitpos);
            ones > zeros
        })
        .collect();
    let gamma = to_number(&gamma_bits);
    let epsilon = !gamma & ((1 << report.width) - 1);
    gamma * epsilon
}

/// Filter readings bit by bit until one remains.  `keep_majority`
/// selects the oxygen generator rule (keep the more common bit, ties
/// keep 1); otherwise the CO2 scrubber rule applies (keep the less
/// common bit, ties keep 0).
fn rating(report: &Report, keep_majority: bool) -> Result<u64, Error> {
    let mut remaining: Vec<&Vec<bool>> = report.readings.iter().collect();
    for bitpos in 0..report.width {
        if remaining.len() <= 1 {
            break;
        }
        let (zeros, ones) = tally(&remaining, bitpos);
        let wanted = if keep_majority {
            ones >= zeros
        } else {
            ones < zeros
        };
        remaining.retain(|r| r[bitpos] == wanted);
    }
    match remaining.as_slice() {
        [only] => Ok(to_number(only)),
        _ => Err(Error::bad_input(format!(
            "expected one reading to remain, found {}",
            remaining.len()
        ))),
    }
}

fn part2(report: &Report) -> Result<u64, Error> {
    Ok(rating(report, true)? * rating(report, false)?)
}

#[cfg(test)]
fn sample() -> Report {
    let lines: Vec<String> = [
        "00100", "11110", "10110", "10111", "10101", "01111", "00111", "11100", "10000", "11001",
        "00010", "01010",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    Report::try_from(lines.as_slice()).expect("valid test data")
}

#[test]
fn test_part1() {
    assert_eq!(part1(&sample()), 198);
}

#[test]
fn test_ratings() {
    let report = sample();
    assert_eq!(rating(&report, true).expect("oxygen"), 23);
    assert_eq!(rating(&report, false).expect("co2"), 10);
    assert_eq!(part2(&report).expect("valid"), 230);
}

#[test]
fn test_ragged_input() {
    let lines = vec!["0101".to_string(), "011".to_string()];
    assert!(Report::try_from(lines.as_slice()).is_err());
}

#[test]
fn test_width_limits() {
    let too_wide = vec!["1".repeat(64), "0".repeat(64)];
    assert!(Report::try_from(too_wide.as_slice()).is_err());
    let blank = vec![String::new()];
    assert!(Report::try_from(blank.as_slice()).is_err());
    let widest = vec!["1".repeat(63), "0".repeat(63), "1".repeat(63)];
    let report = Report::try_from(widest.as_slice()).expect("63 bits fit");
    assert_eq!(part1(&report), 0);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(3))?;
    let report = Report::try_from(lines.as_slice())?;
    println!("{}", part1(&report));
    println!("{}", part2(&report)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 03: {}", e);
        std::process::exit(1);
    }
}
