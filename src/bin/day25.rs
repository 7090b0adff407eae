use std::fmt::{self, Display, Formatter};

use ndarray::prelude::*;
use tracing::debug;

use aoc2021::input::day_file;
#[cfg(test)]
use aoc2021::input::example_lines;
use aoc2021::{logging, Error, Inputs};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Cell {
    Empty,
    East,
    South,
}

impl TryFrom<char> for Cell {
    type Error = Error;
    fn try_from(ch: char) -> Result<Cell, Error> {
        match ch {
            '.' => Ok(Cell::Empty),
            '>' => Ok(Cell::East),
            'v' => Ok(Cell::South),
            _ => Err(Error::bad_input(format!("unexpected character '{}'", ch))),
        }
    }
}

impl Cell {
    fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::East => '>',
            Cell::South => 'v',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Seafloor {
    cells: Array2<Cell>,
}

impl Seafloor {
    fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Seafloor, Error> {
        let cols = match lines.first() {
            Some(line) => line.as_ref().len(),
            None => return Err(Error::bad_input("empty map")),
        };
        let mut cells = Vec::with_capacity(lines.len() * cols);
        for line in lines {
            let line = line.as_ref();
            if line.len() != cols {
                return Err(Error::bad_input(format!("ragged row '{}'", line)));
            }
            for ch in line.chars() {
                cells.push(Cell::try_from(ch)?);
            }
        }
        let cells = Array2::from_shape_vec((lines.len(), cols), cells)
            .map_err(|e| Error::bad_input(e.to_string()))?;
        Ok(Seafloor { cells })
    }

    /// Move every member of one herd at once; returns how many moved.
    fn move_herd(&mut self, herd: Cell) -> usize {
        let (rows, cols) = self.cells.dim();
        let target = |(r, c): (usize, usize)| match herd {
            Cell::East => (r, (c + 1) % cols),
            _ => ((r + 1) % rows, c),
        };
        let movers: Vec<((usize, usize), (usize, usize))> = self
            .cells
            .indexed_iter()
            .filter(|(_, cell)| **cell == herd)
            .map(|(pos, _)| (pos, target(pos)))
            .filter(|(_, to)| self.cells[*to] == Cell::Empty)
            .collect();
        for (from, to) in &movers {
            self.cells[*from] = Cell::Empty;
            self.cells[*to] = herd;
        }
        movers.len()
    }

    fn step(&mut self) -> usize {
        self.move_herd(Cell::East) + self.move_herd(Cell::South)
    }
}

impl Display for Seafloor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// The first step on which no sea cucumber moves.
fn part1(seafloor: &Seafloor) -> usize {
    let mut seafloor = seafloor.clone();
    let mut n = 1;
    while seafloor.step() > 0 {
        n += 1;
    }
    debug!("settled after {} steps:\n{}", n, seafloor);
    n
}

#[cfg(test)]
const EXAMPLE: &str = "
v...>>.vv>
.vv>>.vv..
>>.>v>...v
>>v>>.>.v.
v>v.vv.v..
>.>>..v...
.vv..>.>v.
v.v..>>v.v
....v..v.>
";

#[test]
fn test_wraparound() {
    let mut seafloor = Seafloor::parse(&[
        "...>...", ".......", "......>", "v.....>", "......>", ".......", "..vvv..",
    ])
    .expect("valid");
    seafloor.step();
    let expected = Seafloor::parse(&[
        "..vv>..", ".......", ">......", "v.....>", ">......", ".......", "....v..",
    ])
    .expect("valid");
    assert_eq!(seafloor, expected);
}

#[test]
fn test_one_step() {
    let mut seafloor = Seafloor::parse(&example_lines(EXAMPLE)).expect("valid example");
    seafloor.step();
    let expected = Seafloor::parse(&[
        "....>.>v.>",
        "v.v>.>v.v.",
        ">v>>..>v..",
        ">>v>v>.>.v",
        ".>v.v...v.",
        "v>>.>vvv..",
        "..v...>>..",
        "vv...>>vv.",
        ">.v.v..v.v",
    ])
    .expect("valid");
    assert_eq!(seafloor, expected);
}

#[test]
fn test_part1() {
    let seafloor = Seafloor::parse(&example_lines(EXAMPLE)).expect("valid example");
    assert_eq!(part1(&seafloor), 58);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(25))?;
    let seafloor = Seafloor::parse(&lines)?;
    println!("{}", part1(&seafloor));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 25: {}", e);
        std::process::exit(1);
    }
}
