use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use regex::Regex;

use aoc2021::input::{cut, day_file, parse_int};
use aoc2021::{logging, Error, Inputs};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
struct Dot {
    x: i32,
    y: i32,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Fold {
    Left(i32),
    Up(i32),
}

impl Dot {
    fn fold(self, fold: Fold) -> Dot {
        match fold {
            Fold::Left(x) if self.x > x => Dot {
                x: 2 * x - self.x,
                y: self.y,
            },
            Fold::Up(y) if self.y > y => Dot {
                x: self.x,
                y: 2 * y - self.y,
            },
            _ => self,
        }
    }
}

#[derive(Debug, Clone)]
struct Paper {
    dots: HashSet<Dot>,
}

impl Paper {
    fn fold(&self, fold: Fold) -> Paper {
        Paper {
            dots: self.dots.iter().map(|d| d.fold(fold)).collect(),
        }
    }
}

impl Display for Paper {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = self.dots.iter().map(|d| d.x).max().unwrap_or(-1);
        let height = self.dots.iter().map(|d| d.y).max().unwrap_or(-1);
        for y in 0..=height {
            if y > 0 {
                f.write_str("\n")?;
            }
            for x in 0..=width {
                let mark = if self.dots.contains(&Dot { x, y }) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", mark)?;
            }
        }
        Ok(())
    }
}

struct Manual {
    paper: Paper,
    folds: Vec<Fold>,
}

fn parse_dot(line: &str) -> Result<Dot, Error> {
    let (x, y) = cut(line, ",")?;
    let dot = Dot {
        x: parse_int(x)?,
        y: parse_int(y)?,
    };
    if dot.x < 0 || dot.y < 0 {
        return Err(Error::bad_input(format!("negative coordinate in '{}'", line)));
    }
    Ok(dot)
}

impl TryFrom<&str> for Manual {
    type Error = Error;

    fn try_from(text: &str) -> Result<Manual, Error> {
        let fold_re = Regex::new(r"^fold along ([xy])=(\d+)$")
            .map_err(|e| Error::bad_input(e.to_string()))?;
        let (dots_text, folds_text) = cut(text.trim(), "\n\n")?;
        let dots = dots_text
            .lines()
            .map(|line| parse_dot(line.trim()))
            .collect::<Result<HashSet<Dot>, Error>>()?;
        let mut folds = Vec::new();
        for line in folds_text.lines().map(str::trim) {
            let caps = fold_re
                .captures(line)
                .ok_or_else(|| Error::bad_input(format!("not a fold instruction: '{}'", line)))?;
            let at: i32 = parse_int(&caps[2])?;
            folds.push(if &caps[1] == "x" {
                Fold::Left(at)
            } else {
                Fold::Up(at)
            });
        }
        if folds.is_empty() {
            return Err(Error::bad_input("no fold instructions"));
        }
        Ok(Manual {
            paper: Paper { dots },
            folds,
        })
    }
}

fn part1(manual: &Manual) -> usize {
    match manual.folds.first() {
        Some(fold) => manual.paper.fold(*fold).dots.len(),
        None => manual.paper.dots.len(),
    }
}

fn part2(manual: &Manual) -> String {
    manual
        .folds
        .iter()
        .fold(manual.paper.clone(), |paper, fold| paper.fold(*fold))
        .to_string()
}

#[cfg(test)]
const EXAMPLE: &str = "6,10
0,14
9,10
0,3
10,4
4,11
6,0
6,12
4,1
0,13
10,12
3,4
3,0
8,4
1,10
2,14
8,10
9,0

fold along y=7
fold along x=5
";

#[test]
fn test_fold_dot() {
    assert_eq!(Dot { x: 10, y: 6 }.fold(Fold::Up(5)), Dot { x: 10, y: 4 });
    assert_eq!(Dot { x: 6, y: 10 }.fold(Fold::Left(5)), Dot { x: 4, y: 10 });
    assert_eq!(Dot { x: 3, y: 3 }.fold(Fold::Left(5)), Dot { x: 3, y: 3 });
}

#[test]
fn test_part1() {
    let manual = Manual::try_from(EXAMPLE).expect("valid example");
    assert_eq!(part1(&manual), 17);
}

#[test]
fn test_part2() {
    let manual = Manual::try_from(EXAMPLE).expect("valid example");
    assert_eq!(part2(&manual), "#####\n#...#\n#...#\n#...#\n#####");
}

#[test]
fn test_bad_fold() {
    assert!(Manual::try_from("1,2\n\nfold along z=3").is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let text = Inputs::from_args().read_file(&day_file(13))?;
    let manual = Manual::try_from(text.as_str())?;
    println!("{}", part1(&manual));
    println!("{}", part2(&manual));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 13: {}", e);
        std::process::exit(1);
    }
}
