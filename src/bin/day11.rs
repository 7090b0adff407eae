use ndarray::prelude::*;
use tracing::debug;

use aoc2021::input::day_file;
#[cfg(test)]
use aoc2021::input::example_lines;
use aoc2021::{logging, Error, Inputs};

#[derive(Debug, Clone)]
struct Cavern {
    energy: Array2<u8>,
}

impl Cavern {
    fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Cavern, Error> {
        let rows = lines.len();
        let cols = match lines.first() {
            Some(line) => line.as_ref().len(),
            None => return Err(Error::bad_input("empty octopus grid")),
        };
        let mut cells = Vec::with_capacity(rows * cols);
        for line in lines {
            let line = line.as_ref();
            if line.len() != cols {
                return Err(Error::bad_input(format!(
                    "ragged grid: expected {} columns in '{}'",
                    cols, line
                )));
            }
            for ch in line.chars() {
                match ch.to_digit(10) {
                    Some(d) => cells.push(d as u8),
                    None => {
                        return Err(Error::bad_input(format!(
                            "invalid energy level '{}'",
                            ch
                        )))
                    }
                }
            }
        }
        let energy = Array2::from_shape_vec((rows, cols), cells)
            .map_err(|e| Error::bad_input(e.to_string()))?;
        Ok(Cavern { energy })
    }

    /// All eight neighbours of a cell, clipped to the grid.
    fn neighbours(&self, (r, c): (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
        let (rows, cols) = self.energy.dim();
        let r_lo = r.saturating_sub(1);
        let c_lo = c.saturating_sub(1);
        let r_hi = (r + 1).min(rows - 1);
        let c_hi = (c + 1).min(cols - 1);
        (r_lo..=r_hi)
            .flat_map(move |nr| (c_lo..=c_hi).map(move |nc| (nr, nc)))
            .filter(move |&pos| pos != (r, c))
    }

    /// Advance one step, returning the number of octopuses which flashed.
    fn step(&mut self) -> usize {
        let mut ready: Vec<(usize, usize)> = Vec::new();
        for (pos, e) in self.energy.indexed_iter_mut() {
            *e += 1;
            if *e > 9 {
                ready.push(pos);
            }
        }
        let mut flashed = Array2::from_elem(self.energy.dim(), false);
        while let Some(pos) = ready.pop() {
            if flashed[pos] {
                continue;
            }
            flashed[pos] = true;
            let around: Vec<(usize, usize)> = self.neighbours(pos).collect();
            for n in around {
                self.energy[n] += 1;
                if self.energy[n] > 9 && !flashed[n] {
                    ready.push(n);
                }
            }
        }
        let mut count = 0;
        for (pos, did_flash) in flashed.indexed_iter() {
            if *did_flash {
                self.energy[pos] = 0;
                count += 1;
            }
        }
        count
    }
}

fn part1(cavern: &Cavern, steps: usize) -> usize {
    let mut cavern = cavern.clone();
    (0..steps).map(|_| cavern.step()).sum()
}

fn part2(cavern: &Cavern) -> usize {
    let mut cavern = cavern.clone();
    let everyone = cavern.energy.len();
    let mut n = 1;
    while cavern.step() != everyone {
        n += 1;
    }
    debug!("all {} octopuses flash together on step {}", everyone, n);
    n
}

#[cfg(test)]
const EXAMPLE: &str = "
5483143223
2745854711
5264556173
6141336146
6357385478
4167524645
2176841721
6882881134
4846848554
5283751526
";

#[cfg(test)]
fn example() -> Cavern {
    Cavern::parse(&example_lines(EXAMPLE)).expect("valid example")
}

#[test]
fn test_small_cascade() {
    let mut cavern =
        Cavern::parse(&["11111", "19991", "19191", "19991", "11111"]).expect("valid");
    assert_eq!(cavern.step(), 9);
    let expected =
        Cavern::parse(&["34543", "40004", "50005", "40004", "34543"]).expect("valid");
    assert_eq!(cavern.energy, expected.energy);
}

#[test]
fn test_part1() {
    assert_eq!(part1(&example(), 10), 204);
    assert_eq!(part1(&example(), 100), 1656);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&example()), 195);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(11))?;
    let cavern = Cavern::parse(&lines)?;
    println!("{}", part1(&cavern, 100));
    println!("{}", part2(&cavern));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 11: {}", e);
        std::process::exit(1);
    }
}
