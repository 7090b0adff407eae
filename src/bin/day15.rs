use ndarray::prelude::*;
use pathfinding::directed::astar::astar;
use tracing::debug;

use aoc2021::input::day_file;
#[cfg(test)]
use aoc2021::input::example_lines;
use aoc2021::{logging, Error, Inputs};

type Pos = (usize, usize);

#[derive(Debug)]
struct Cave {
    risk: Array2<u32>,
}

impl Cave {
    fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Cave, Error> {
        let cols = match lines.first() {
            Some(line) if !line.as_ref().is_empty() => line.as_ref().len(),
            _ => return Err(Error::bad_input("empty risk map")),
        };
        let mut cells = Vec::with_capacity(lines.len() * cols);
        for line in lines {
            let line = line.as_ref();
            if line.len() != cols {
                return Err(Error::bad_input(format!("ragged row '{}'", line)));
            }
            for ch in line.chars() {
                match ch.to_digit(10) {
                    Some(d) if d > 0 => cells.push(d),
                    _ => return Err(Error::bad_input(format!("invalid risk level '{}'", ch))),
                }
            }
        }
        let risk = Array2::from_shape_vec((lines.len(), cols), cells)
            .map_err(|e| Error::bad_input(e.to_string()))?;
        Ok(Cave { risk })
    }
}

/// A view of the cave map repeated `tiles` times in each direction.
struct TiledCave<'a> {
    cave: &'a Cave,
    tiles: usize,
}

impl TiledCave<'_> {
    fn dim(&self) -> (usize, usize) {
        let (rows, cols) = self.cave.risk.dim();
        (rows * self.tiles, cols * self.tiles)
    }

    fn risk(&self, (r, c): Pos) -> u32 {
        let (rows, cols) = self.cave.risk.dim();
        let base = self.cave.risk[(r % rows, c % cols)];
        let distance = (r / rows + c / cols) as u32;
        (base + distance - 1) % 9 + 1
    }

    fn successors(&self, &(r, c): &Pos) -> Vec<(Pos, u32)> {
        let (rows, cols) = self.dim();
        let mut result = Vec::with_capacity(4);
        if r > 0 {
            result.push((r - 1, c));
        }
        if c > 0 {
            result.push((r, c - 1));
        }
        if r + 1 < rows {
            result.push((r + 1, c));
        }
        if c + 1 < cols {
            result.push((r, c + 1));
        }
        result.into_iter().map(|p| (p, self.risk(p))).collect()
    }

    fn lowest_total_risk(&self) -> Result<u32, Error> {
        let (rows, cols) = self.dim();
        let goal = (rows - 1, cols - 1);
        let heuristic = |&(r, c): &Pos| ((goal.0 - r) + (goal.1 - c)) as u32;
        match astar(&(0, 0), |p| self.successors(p), heuristic, |p| *p == goal) {
            Some((path, cost)) => {
                debug!("best path has {} steps, total risk {}", path.len(), cost);
                Ok(cost)
            }
            None => Err(Error::bad_input("no path through the cave")),
        }
    }
}

fn part1(cave: &Cave) -> Result<u32, Error> {
    TiledCave { cave, tiles: 1 }.lowest_total_risk()
}

fn part2(cave: &Cave) -> Result<u32, Error> {
    TiledCave { cave, tiles: 5 }.lowest_total_risk()
}

#[cfg(test)]
const EXAMPLE: &str = "
1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581
";

#[test]
fn test_tiled_risk() {
    let cave = Cave::parse(&["8"]).expect("valid");
    let tiled = TiledCave {
        cave: &cave,
        tiles: 5,
    };
    let row: Vec<u32> = (0..5).map(|c| tiled.risk((0, c))).collect();
    assert_eq!(row, vec![8, 9, 1, 2, 3]);
    assert_eq!(tiled.risk((4, 4)), 7);
}

#[test]
fn test_empty_map() {
    let blank: [&str; 1] = [""];
    assert!(Cave::parse(&blank).is_err());
    let none: [&str; 0] = [];
    assert!(Cave::parse(&none).is_err());
}

#[test]
fn test_part1() {
    let cave = Cave::parse(&example_lines(EXAMPLE)).expect("valid example");
    assert_eq!(part1(&cave).expect("path exists"), 40);
}

#[test]
fn test_part2() {
    let cave = Cave::parse(&example_lines(EXAMPLE)).expect("valid example");
    assert_eq!(part2(&cave).expect("path exists"), 315);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(15))?;
    let cave = Cave::parse(&lines)?;
    println!("{}", part1(&cave)?);
    println!("{}", part2(&cave)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 15: {}", e);
        std::process::exit(1);
    }
}
