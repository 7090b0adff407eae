use tracing::debug;

use aoc2021::input::{day_file, ints};
use aoc2021::{logging, Error, Inputs};

fn linear_cost(dest: i64, positions: &[i64]) -> i64 {
    positions.iter().map(|p| (p - dest).abs()).sum()
}

fn triangle(n: i64) -> i64 {
    n * (n + 1) / 2
}

fn triangular_cost(dest: i64, positions: &[i64]) -> i64 {
    positions.iter().map(|p| triangle((p - dest).abs())).sum()
}

#[test]
fn test_triangular_cost() {
    assert_eq!(triangular_cost(1, &[1]), 0);
    assert_eq!(triangular_cost(1, &[2]), 1);
    assert_eq!(triangular_cost(1, &[4]), 1 + 2 + 3);
    assert_eq!(triangular_cost(5, &[16]), 66);
}

/// Minimise a convex function over `lo..=hi`, returning (cost, argmin).
fn bisect<F: Fn(i64) -> i64>(f: F, mut lo: i64, mut hi: i64) -> (i64, i64) {
    loop {
        if hi - lo <= 1 {
            let (flo, fhi) = (f(lo), f(hi));
            return if flo <= fhi { (flo, lo) } else { (fhi, hi) };
        }
        let mid = lo + (hi - lo) / 2;
        let slope = f(mid + 1) - f(mid - 1);
        match slope.signum() {
            0 => return (f(mid), mid),
            -1 => lo = mid,
            _ => hi = mid,
        }
    }
}

#[test]
fn test_bisect() {
    assert_eq!(bisect(|x| (x - 7) * (x - 7), -100, 100), (0, 7));
    assert_eq!(bisect(|x| (x - 3).abs(), 3, 3), (0, 3));
    assert_eq!(bisect(|x| (x - 4).abs(), 3, 4), (0, 4));
}

fn part1(positions: &[i64]) -> Result<i64, Error> {
    let best = positions
        .iter()
        .map(|dest| (linear_cost(*dest, positions), *dest))
        .min();
    match best {
        Some((cost, dest)) => {
            debug!("cheapest position for part 1 is {}", dest);
            Ok(cost)
        }
        None => Err(Error::bad_input("there are no crabs")),
    }
}

fn part2(positions: &[i64]) -> Result<i64, Error> {
    match (positions.iter().min(), positions.iter().max()) {
        (Some(lo), Some(hi)) => {
            let (cost, dest) = bisect(|dest| triangular_cost(dest, positions), *lo, *hi);
            debug!("cheapest position for part 2 is {}", dest);
            Ok(cost)
        }
        _ => Err(Error::bad_input("there are no crabs")),
    }
}

#[cfg(test)]
const SAMPLE: &[i64] = &[16, 1, 2, 0, 4, 2, 7, 1, 2, 14];

#[test]
fn test_part1() {
    assert_eq!(part1(SAMPLE).expect("valid"), 37);
    assert!(part1(&[]).is_err());
}

#[test]
fn test_part2() {
    assert_eq!(part2(SAMPLE).expect("valid"), 168);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let text = Inputs::from_args().read_file(&day_file(7))?;
    let positions: Vec<i64> = ints(&text)?;
    println!("{}", part1(&positions)?);
    println!("{}", part2(&positions)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 07: {}", e);
        std::process::exit(1);
    }
}
