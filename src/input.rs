use std::fs::{self, File};
use std::io::{self, BufRead};
use std::num::ParseIntError;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::error::Error;

/// Command line of every day program.
#[derive(Debug, Parser)]
#[command(about = "Solve one day of Advent of Code 2021")]
pub struct Args {
    /// Directory holding the dayN.txt puzzle inputs.
    #[arg(default_value = "./input")]
    pub input_dir: PathBuf,
}

/// The directory puzzle inputs are read from.
#[derive(Debug, Clone)]
pub struct Inputs {
    dir: PathBuf,
}

impl Inputs {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Inputs {
        Inputs { dir: dir.into() }
    }

    /// Build from the process arguments; exits with a usage message if
    /// they don't parse.
    pub fn from_args() -> Inputs {
        let args = Args::parse();
        Inputs::new(args.input_dir)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// All lines of the named file, without their line terminators.
    pub fn read_lines(&self, name: &str) -> Result<Vec<String>, Error> {
        let path = self.path(name);
        let io_error = |source: io::Error| Error::Io {
            path: path.clone(),
            source,
        };
        let f = File::open(&path).map_err(io_error)?;
        io::BufReader::new(f)
            .lines()
            .map(|line| {
                line.map(|mut s| {
                    if s.ends_with('\r') {
                        s.pop();
                    }
                    s
                })
                .map_err(io_error)
            })
            .collect()
    }

    /// The whole named file with surrounding whitespace removed.
    pub fn read_file(&self, name: &str) -> Result<String, Error> {
        let path = self.path(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text.trim().to_string()),
            Err(source) => Err(Error::Io { path, source }),
        }
    }
}

/// Name of the input file for a day, e.g. `day9.txt`.
pub fn day_file(day: u32) -> String {
    format!("day{}.txt", day)
}

pub fn parse_int<T>(text: &str) -> Result<T, Error>
where
    T: FromStr<Err = ParseIntError>,
{
    let trimmed = text.trim();
    trimmed.parse::<T>().map_err(|source| Error::BadInt {
        text: trimmed.to_string(),
        source,
    })
}

pub fn parse_hex(digit: char) -> Result<u8, Error> {
    match digit.to_digit(16) {
        Some(n) => Ok(n as u8),
        None => Err(Error::bad_input(format!(
            "not a hex digit: '{}' (unicode {})",
            digit,
            digit.escape_unicode(),
        ))),
    }
}

/// Comma-separated integers, e.g. `3,4,3,1,2`.
pub fn ints<T>(text: &str) -> Result<Vec<T>, Error>
where
    T: FromStr<Err = ParseIntError>,
{
    text.trim().split(',').map(parse_int).collect()
}

/// Split `text` around the first occurrence of `sep`.
pub fn cut<'a>(text: &'a str, sep: &str) -> Result<(&'a str, &'a str), Error> {
    text.split_once(sep).ok_or_else(|| Error::MissingSeparator {
        text: text.to_string(),
        sep: sep.to_string(),
    })
}

/// Lines of an example embedded in a test.
pub fn example_lines(text: &str) -> Vec<&str> {
    text.trim().lines().collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_read_lines_strips_terminators() {
        let dir = tempfile::tempdir().expect("temporary directory");
        fs::write(dir.path().join("day1.txt"), "199\r\n200\n208\n").expect("write input");
        let inputs = Inputs::new(dir.path());
        assert_eq!(
            inputs.read_lines(&day_file(1)).expect("readable"),
            vec!["199", "200", "208"]
        );
    }

    #[test]
    fn test_read_file_trims() {
        let dir = tempfile::tempdir().expect("temporary directory");
        fs::write(dir.path().join("day6.txt"), "3,4,3,1,2\n\n").expect("write input");
        let inputs = Inputs::new(dir.path());
        assert_eq!(inputs.read_file("day6.txt").expect("readable"), "3,4,3,1,2");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let inputs = Inputs::new(dir.path());
        match inputs.read_lines("day99.txt") {
            Err(Error::Io { path, .. }) => assert!(path.ends_with("day99.txt")),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_ints() {
        assert_eq!(ints::<i64>("16,1,-2").expect("valid"), vec![16, 1, -2]);
        assert!(matches!(ints::<i64>("1,x"), Err(Error::BadInt { .. })));
    }

    #[test]
    fn test_cut() {
        assert_eq!(cut("0,9 -> 5,9", " -> ").expect("valid"), ("0,9", "5,9"));
        assert!(matches!(
            cut("0,9", " -> "),
            Err(Error::MissingSeparator { .. })
        ));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex('F').expect("valid"), 15);
        assert_eq!(parse_hex('a').expect("valid"), 10);
        assert!(parse_hex('Z').is_err());
    }

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["day01"]);
        assert_eq!(args.input_dir, PathBuf::from("./input"));
        let args = Args::parse_from(["day01", "/tmp/puzzles"]);
        assert_eq!(args.input_dir, PathBuf::from("/tmp/puzzles"));
    }
}
