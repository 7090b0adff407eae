use std::ops::RangeInclusive;
use std::str::FromStr;

use nom::{
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{preceded, separated_pair, tuple},
    IResult,
};
use tracing::{debug, trace};

use aoc2021::input::day_file;
use aoc2021::{logging, Error, Inputs};

#[derive(Debug, Eq, PartialEq)]
struct Target {
    x: RangeInclusive<i32>,
    y: RangeInclusive<i32>,
}

fn i32_parser(input: &str) -> IResult<&str, i32> {
    map_res(recognize(tuple((opt(char('-')), digit1))), FromStr::from_str)(input)
}

fn parse_range(input: &str) -> IResult<&str, RangeInclusive<i32>> {
    let (rest, (a, b)) = separated_pair(i32_parser, tag(".."), i32_parser)(input)?;
    Ok((rest, a.min(b)..=a.max(b)))
}

fn parse_target(input: &str) -> IResult<&str, (RangeInclusive<i32>, RangeInclusive<i32>)> {
    preceded(
        tag("target area: x="),
        separated_pair(parse_range, tag(", y="), parse_range),
    )(input)
}

impl TryFrom<&str> for Target {
    type Error = Error;

    fn try_from(s: &str) -> Result<Target, Error> {
        let (_, (x, y)) = all_consuming(parse_target)(s.trim())
            .map_err(|e| Error::bad_input(format!("failed to parse '{}': {}", s, e)))?;
        if *x.start() <= 0 {
            return Err(Error::bad_input(format!(
                "target x range {:?} must lie to the right of the launcher",
                x
            )));
        }
        if *y.end() >= 0 {
            return Err(Error::bad_input(format!(
                "target y range {:?} must lie below the launcher",
                y
            )));
        }
        Ok(Target { x, y })
    }
}

/// Height reached by a probe launched upwards at `vy`.
fn apex(vy: i32) -> i32 {
    if vy > 0 {
        vy * (vy + 1) / 2
    } else {
        0
    }
}

fn hits(target: &Target, mut vx: i32, mut vy: i32) -> bool {
    let (mut x, mut y) = (0, 0);
    loop {
        if target.x.contains(&x) && target.y.contains(&y) {
            return true;
        }
        if x > *target.x.end() || y < *target.y.start() {
            return false;
        }
        x += vx;
        y += vy;
        vx -= vx.signum();
        vy -= 1;
    }
}

/// Every initial velocity which lands the probe in the target.
fn hitting_velocities(target: &Target) -> Vec<(i32, i32)> {
    // Slower than this and the probe stops short of the target.
    let vx_min = (1..)
        .find(|&vx| apex(vx) >= *target.x.start())
        .unwrap_or(1);
    let vx_max = *target.x.end();
    // Faster than this and the probe passes straight through y = 0 and
    // then below the target in one step.
    let vy_min = *target.y.start();
    let vy_max = -*target.y.start();
    let mut result = Vec::new();
    for vx in vx_min..=vx_max {
        for vy in vy_min..=vy_max {
            if hits(target, vx, vy) {
                trace!("velocity ({}, {}) hits the target", vx, vy);
                result.push((vx, vy));
            }
        }
    }
    debug!("{} velocities hit {:?}", result.len(), target);
    result
}

fn part1(target: &Target) -> Result<i32, Error> {
    hitting_velocities(target)
        .into_iter()
        .map(|(_, vy)| apex(vy))
        .max()
        .ok_or_else(|| Error::bad_input("no launch velocity reaches the target"))
}

fn part2(target: &Target) -> usize {
    hitting_velocities(target).len()
}

#[cfg(test)]
fn example() -> Target {
    Target::try_from("target area: x=20..30, y=-10..-5").expect("valid example")
}

#[test]
fn test_parse_target() {
    assert_eq!(
        Target::try_from("target area: x=70..125, y=-121..-159").expect("valid"),
        Target {
            x: 70..=125,
            y: -159..=-121,
        }
    );
    assert!(Target::try_from("target area: x=70..125, y=-121..-159 junk").is_err());
    assert!(Target::try_from("target area: x=20..30, y=5..10").is_err());
}

#[test]
fn test_hits() {
    let target = example();
    assert!(hits(&target, 7, 2));
    assert!(hits(&target, 6, 3));
    assert!(hits(&target, 9, 0));
    assert!(hits(&target, 6, 9));
    assert!(!hits(&target, 17, -4));
}

#[test]
fn test_part1() {
    assert_eq!(part1(&example()).expect("reachable"), 45);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&example()), 112);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let text = Inputs::from_args().read_file(&day_file(17))?;
    let target = Target::try_from(text.as_str())?;
    println!("{}", part1(&target)?);
    println!("{}", part2(&target));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 17: {}", e);
        std::process::exit(1);
    }
}
