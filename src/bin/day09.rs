use ndarray::prelude::*;
use pathfinding::directed::bfs::bfs_reach;

use aoc2021::input::day_file;
use aoc2021::{logging, Error, Inputs};

struct HeightMap {
    heights: Array2<u8>,
}

fn decode_cell(cell: char) -> Result<u8, Error> {
    match cell.to_digit(10) {
        Some(n) => Ok(n as u8),
        None => Err(Error::bad_input(format!(
            "invalid (non-numeric) cell '{}'",
            cell
        ))),
    }
}

impl TryFrom<&[String]> for HeightMap {
    type Error = Error;

    fn try_from(lines: &[String]) -> Result<HeightMap, Error> {
        let width = match lines.first() {
            Some(line) => line.len(),
            None => return Err(Error::bad_input("no data")),
        };
        let mut cells: Vec<u8> = Vec::with_capacity(lines.len() * width);
        for line in lines {
            if line.len() != width {
                return Err(Error::bad_input(format!(
                    "expected rows of width {}, got '{}'",
                    width, line
                )));
            }
            for ch in line.chars() {
                cells.push(decode_cell(ch)?);
            }
        }
        let heights = Array2::from_shape_vec((lines.len(), width), cells)
            .map_err(|e| Error::bad_input(e.to_string()))?;
        Ok(HeightMap { heights })
    }
}

impl HeightMap {
    /// Orthogonal neighbours (N, W, E, S) which lie inside the map.
    fn neighbours(&self, (r, c): (usize, usize)) -> Vec<(usize, usize)> {
        let (rows, cols) = self.heights.dim();
        let mut result = Vec::with_capacity(4);
        if r > 0 {
            result.push((r - 1, c));
        }
        if c > 0 {
            result.push((r, c - 1));
        }
        if c + 1 < cols {
            result.push((r, c + 1));
        }
        if r + 1 < rows {
            result.push((r + 1, c));
        }
        result
    }

    fn is_low_point(&self, pos: (usize, usize)) -> bool {
        let h = self.heights[pos];
        self.neighbours(pos)
            .into_iter()
            .all(|n| self.heights[n] > h)
    }

    fn low_points(&self) -> Vec<(usize, usize)> {
        self.heights
            .indexed_iter()
            .map(|(pos, _)| pos)
            .filter(|pos| self.is_low_point(*pos))
            .collect()
    }

    fn basin_size(&self, low_point: (usize, usize)) -> usize {
        bfs_reach(low_point, |pos| {
            self.neighbours(*pos)
                .into_iter()
                .filter(|n| self.heights[*n] < 9)
                .collect::<Vec<_>>()
        })
        .count()
    }
}

fn part1(hm: &HeightMap) -> u32 {
    hm.low_points()
        .into_iter()
        .map(|pos| u32::from(hm.heights[pos]) + 1)
        .sum()
}

fn part2(hm: &HeightMap) -> Result<usize, Error> {
    let mut sizes: Vec<usize> = hm
        .low_points()
        .into_iter()
        .map(|pos| hm.basin_size(pos))
        .collect();
    if sizes.len() < 3 {
        return Err(Error::bad_input(format!(
            "expected at least 3 basins, found {}",
            sizes.len()
        )));
    }
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    Ok(sizes.iter().take(3).product())
}

#[cfg(test)]
fn sample() -> HeightMap {
    let lines: Vec<String> = ["2199943210", "3987894921", "9856789892", "8767896789", "9899965678"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    HeightMap::try_from(lines.as_slice()).expect("valid test data")
}

#[test]
fn test_low_points() {
    assert_eq!(sample().low_points(), vec![(0, 1), (0, 9), (2, 2), (4, 6)]);
}

#[test]
fn test_part1() {
    assert_eq!(part1(&sample()), 15);
}

#[test]
fn test_basin_size() {
    let hm = sample();
    assert_eq!(hm.basin_size((0, 1)), 3);
    assert_eq!(hm.basin_size((0, 9)), 9);
    assert_eq!(hm.basin_size((2, 2)), 14);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&sample()).expect("enough basins"), 1134);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(9))?;
    let hm = HeightMap::try_from(lines.as_slice())?;
    println!("{}", part1(&hm));
    println!("{}", part2(&hm)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 09: {}", e);
        std::process::exit(1);
    }
}
