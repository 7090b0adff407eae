use std::collections::HashMap;

use regex::Regex;

use aoc2021::input::{day_file, parse_int};
use aoc2021::{logging, Error, Inputs};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Vent {
    start: Point,
    end: Point,
}

impl Vent {
    fn is_axis_aligned(&self) -> bool {
        self.start.x == self.end.x || self.start.y == self.end.y
    }

    fn points(&self) -> impl Iterator<Item = Point> {
        let dx = (self.end.x - self.start.x).signum();
        let dy = (self.end.y - self.start.y).signum();
        let steps = (self.end.x - self.start.x)
            .abs()
            .max((self.end.y - self.start.y).abs());
        let start = self.start;
        (0..=steps).map(move |i| Point {
            x: start.x + i * dx,
            y: start.y + i * dy,
        })
    }
}

struct VentParser {
    re: Regex,
}

impl VentParser {
    fn new() -> Result<VentParser, Error> {
        let re = Regex::new(r"^(\d+),(\d+) -> (\d+),(\d+)$")
            .map_err(|e| Error::bad_input(e.to_string()))?;
        Ok(VentParser { re })
    }

    fn parse(&self, line: &str) -> Result<Vent, Error> {
        let caps = match self.re.captures(line.trim()) {
            Some(caps) => caps,
            None => {
                return Err(Error::bad_input(format!("not a vent line: '{}'", line)));
            }
        };
        let num = |i: usize| -> Result<i32, Error> { parse_int(&caps[i]) };
        let vent = Vent {
            start: Point { x: num(1)?, y: num(2)? },
            end: Point { x: num(3)?, y: num(4)? },
        };
        let (w, h) = (
            (vent.end.x - vent.start.x).abs(),
            (vent.end.y - vent.start.y).abs(),
        );
        if vent.is_axis_aligned() || w == h {
            Ok(vent)
        } else {
            Err(Error::bad_input(format!(
                "line is neither axis-aligned nor diagonal: '{}'",
                line
            )))
        }
    }
}

fn count_overlaps<'a, I>(vents: I) -> usize
where
    I: Iterator<Item = &'a Vent>,
{
    let mut cover: HashMap<Point, usize> = HashMap::new();
    for vent in vents {
        for p in vent.points() {
            *cover.entry(p).or_insert(0) += 1;
        }
    }
    cover.values().filter(|n| **n > 1).count()
}

fn part1(vents: &[Vent]) -> usize {
    count_overlaps(vents.iter().filter(|v| v.is_axis_aligned()))
}

fn part2(vents: &[Vent]) -> usize {
    count_overlaps(vents.iter())
}

#[cfg(test)]
fn sample() -> Vec<Vent> {
    let parser = VentParser::new().expect("valid regex");
    [
        "0,9 -> 5,9",
        "8,0 -> 0,8",
        "9,4 -> 3,4",
        "2,2 -> 2,1",
        "7,0 -> 7,4",
        "6,4 -> 2,0",
        "0,9 -> 2,9",
        "3,4 -> 1,4",
        "0,0 -> 8,8",
        "5,5 -> 8,2",
    ]
    .iter()
    .map(|line| parser.parse(line).expect("valid test data"))
    .collect()
}

#[test]
fn test_points() {
    let parser = VentParser::new().expect("valid regex");
    let v = parser.parse("9,7 -> 7,9").expect("valid");
    let points: Vec<Point> = v.points().collect();
    assert_eq!(
        points,
        vec![Point { x: 9, y: 7 }, Point { x: 8, y: 8 }, Point { x: 7, y: 9 }]
    );
    assert!(parser.parse("0,0 -> 1,2").is_err());
    assert!(parser.parse("0,0 => 1,1").is_err());
}

#[test]
fn test_part1() {
    assert_eq!(part1(&sample()), 5);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&sample()), 12);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let parser = VentParser::new()?;
    let vents: Vec<Vent> = Inputs::from_args()
        .read_lines(&day_file(5))?
        .iter()
        .map(|line| parser.parse(line))
        .collect::<Result<_, _>>()?;
    println!("{}", part1(&vents));
    println!("{}", part2(&vents));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 05: {}", e);
        std::process::exit(1);
    }
}
