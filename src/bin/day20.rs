use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use tracing::debug;

use aoc2021::input::{cut, day_file};
use aoc2021::{logging, Error, Inputs};

const ALGORITHM_LEN: usize = 512;

fn pixel(ch: char) -> Result<bool, Error> {
    match ch {
        '#' => Ok(true),
        '.' => Ok(false),
        _ => Err(Error::bad_input(format!("unexpected pixel '{}'", ch))),
    }
}

/// An infinite image: the lit pixels inside a bounding box, and a single
/// colour for everything outside it.
#[derive(Debug, Clone)]
struct Image {
    lit: HashSet<(i64, i64)>,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    background: bool,
}

impl Image {
    fn get(&self, x: i64, y: i64) -> bool {
        let inside = (self.top_left.0..=self.bottom_right.0).contains(&x)
            && (self.top_left.1..=self.bottom_right.1).contains(&y);
        if inside {
            self.lit.contains(&(x, y))
        } else {
            self.background
        }
    }

    fn neighbourhood(&self, x: i64, y: i64) -> usize {
        let mut index = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                index = (index << 1) | usize::from(self.get(x + dx, y + dy));
            }
        }
        index
    }

    fn enhance(&self, algorithm: &[bool]) -> Image {
        let top_left = (self.top_left.0 - 1, self.top_left.1 - 1);
        let bottom_right = (self.bottom_right.0 + 1, self.bottom_right.1 + 1);
        let mut lit = HashSet::new();
        for y in top_left.1..=bottom_right.1 {
            for x in top_left.0..=bottom_right.0 {
                if algorithm[self.neighbourhood(x, y)] {
                    lit.insert((x, y));
                }
            }
        }
        let background = algorithm[if self.background { ALGORITHM_LEN - 1 } else { 0 }];
        Image {
            lit,
            top_left,
            bottom_right,
            background,
        }
    }

    fn count_lit(&self) -> Result<usize, Error> {
        if self.background {
            Err(Error::bad_input("infinitely many pixels are lit"))
        } else {
            Ok(self.lit.len())
        }
    }
}

impl Display for Image {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in self.top_left.1..=self.bottom_right.1 {
            for x in self.top_left.0..=self.bottom_right.0 {
                f.write_str(if self.get(x, y) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

struct Puzzle {
    algorithm: Vec<bool>,
    image: Image,
}

impl TryFrom<&str> for Puzzle {
    type Error = Error;

    fn try_from(text: &str) -> Result<Puzzle, Error> {
        let (algorithm_text, image_text) = cut(text.trim(), "\n\n")?;
        let algorithm = algorithm_text
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(pixel)
            .collect::<Result<Vec<bool>, Error>>()?;
        if algorithm.len() != ALGORITHM_LEN {
            return Err(Error::bad_input(format!(
                "enhancement algorithm has {} entries, expected {}",
                algorithm.len(),
                ALGORITHM_LEN
            )));
        }
        let mut lit = HashSet::new();
        let mut width: Option<usize> = None;
        let mut height = 0;
        for (y, line) in image_text.lines().map(str::trim).enumerate() {
            let row = line.chars().map(pixel).collect::<Result<Vec<bool>, Error>>()?;
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(Error::bad_input(format!(
                        "image row {} has width {}, expected {}",
                        y,
                        row.len(),
                        w
                    )));
                }
                Some(_) => (),
            }
            for (x, on) in row.into_iter().enumerate() {
                if on {
                    lit.insert((x as i64, y as i64));
                }
            }
            height = y + 1;
        }
        let width = width.unwrap_or(0);
        Ok(Puzzle {
            algorithm,
            image: Image {
                lit,
                top_left: (0, 0),
                bottom_right: (width as i64 - 1, height as i64 - 1),
                background: false,
            },
        })
    }
}

fn lit_after(puzzle: &Puzzle, steps: usize) -> Result<usize, Error> {
    let mut image = puzzle.image.clone();
    for _ in 0..steps {
        image = image.enhance(&puzzle.algorithm);
    }
    debug!(
        "after {} steps the image spans {:?} to {:?}",
        steps, image.top_left, image.bottom_right
    );
    image.count_lit()
}

#[cfg(test)]
const EXAMPLE_ALGORITHM: &str = concat!(
    "..#.#..#####.#.#.#.###.##.....###.##.#..###.####..#####..#....#..#..##..##",
    "#..######.###...####..#..#####..##..#.#####...##.#.#..#.##..#.#......#.###",
    ".######.###.####...#.##.##..#..#..#####.....#.#....###..#.##......#.....#.",
    ".#..#..##..#...##.######.####.####.#.#...#.......#..#.#.#...####.##.#.....",
    ".#..#...##.#.##..#...##.#.##..###.#......#.#.......#.#.#.####.###.##...#..",
    "...####.#..#..#.##.#....##..#.####....##...##..#...#......#.#.......#.....",
    "..##..####..#...#.#.#...##..#.#..###..#####........#..####......#..#"
);

#[cfg(test)]
fn example() -> Puzzle {
    let text = format!("{}\n\n#..#.\n#....\n##..#\n..#..\n..###\n", EXAMPLE_ALGORITHM);
    Puzzle::try_from(text.as_str()).expect("valid example")
}

#[test]
fn test_neighbourhood() {
    let puzzle = example();
    assert_eq!(puzzle.image.neighbourhood(2, 2), 34);
    assert!(puzzle.algorithm[34]);
}

#[test]
fn test_enhance_once() {
    let puzzle = example();
    let once = puzzle.image.enhance(&puzzle.algorithm);
    assert_eq!(
        once.to_string(),
        ".##.##.\n#..#.#.\n##.#..#\n####..#\n.#..##.\n..##..#\n...#.#.\n"
    );
}

#[test]
fn test_lit_after() {
    let puzzle = example();
    assert_eq!(lit_after(&puzzle, 2).expect("finite"), 35);
    assert_eq!(lit_after(&puzzle, 50).expect("finite"), 3351);
}

#[test]
fn test_flashing_background() {
    // With algorithm[0] lit and algorithm[511] dark the background
    // alternates.
    let mut algorithm = String::from("#");
    algorithm.push_str(&".".repeat(ALGORITHM_LEN - 1));
    let puzzle = Puzzle::try_from(format!("{}\n\n...", algorithm).as_str()).expect("valid");
    let once = puzzle.image.enhance(&puzzle.algorithm);
    assert!(once.count_lit().is_err());
    let twice = once.enhance(&puzzle.algorithm);
    assert_eq!(twice.count_lit().expect("finite"), 0);
}

#[test]
fn test_short_algorithm() {
    assert!(Puzzle::try_from("#.#\n\n#..").is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let text = Inputs::from_args().read_file(&day_file(20))?;
    let puzzle = Puzzle::try_from(text.as_str())?;
    println!("{}", lit_after(&puzzle, 2)?);
    println!("{}", lit_after(&puzzle, 50)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 20: {}", e);
        std::process::exit(1);
    }
}
