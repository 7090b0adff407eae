use std::collections::HashMap;

use aoc2021::input::{cut, day_file};
use aoc2021::{logging, Error, Inputs};

const START: &str = "start";
const END: &str = "end";

/// The cave system, with caves numbered in order of first appearance.
#[derive(Debug, Default)]
struct CaveMap {
    names: Vec<String>,
    index: HashMap<String, usize>,
    exits: Vec<Vec<usize>>,
}

impl CaveMap {
    fn cave(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.exits.push(Vec::new());
        id
    }

    fn parse<S: AsRef<str>>(lines: &[S]) -> Result<CaveMap, Error> {
        let mut map = CaveMap::default();
        for line in lines {
            let (from, to) = cut(line.as_ref().trim(), "-")?;
            if from.is_empty() || to.is_empty() {
                return Err(Error::bad_input(format!(
                    "incomplete passage '{}'",
                    line.as_ref()
                )));
            }
            let a = map.cave(from);
            let b = map.cave(to);
            map.exits[a].push(b);
            map.exits[b].push(a);
        }
        Ok(map)
    }

    fn is_big(&self, cave: usize) -> bool {
        self.names[cave].chars().all(|ch| ch.is_ascii_uppercase())
    }

    fn id(&self, name: &str) -> Result<usize, Error> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::bad_input(format!("there is no '{}' cave", name)))
    }
}

struct PathCounter<'a> {
    map: &'a CaveMap,
    start: usize,
    end: usize,
    visits: Vec<u32>,
}

impl<'a> PathCounter<'a> {
    fn new(map: &'a CaveMap) -> Result<PathCounter<'a>, Error> {
        Ok(PathCounter {
            map,
            start: map.id(START)?,
            end: map.id(END)?,
            visits: vec![0; map.names.len()],
        })
    }

    /// Count the paths from `here` to the end.  `spare_visit` says whether
    /// one small cave may still be entered a second time.
    fn count_from(&mut self, here: usize, spare_visit: bool) -> usize {
        if here == self.end {
            return 1;
        }
        let mut total = 0;
        for &next in &self.map.exits[here] {
            if next == self.start {
                continue;
            }
            let small = !self.map.is_big(next);
            let revisit = small && self.visits[next] > 0;
            if revisit && !spare_visit {
                continue;
            }
            self.visits[next] += 1;
            total += self.count_from(next, spare_visit && !revisit);
            self.visits[next] -= 1;
        }
        total
    }

    fn count(&mut self, allow_one_revisit: bool) -> usize {
        self.visits[self.start] = 1;
        let n = self.count_from(self.start, allow_one_revisit);
        self.visits[self.start] = 0;
        n
    }
}

fn part1(map: &CaveMap) -> Result<usize, Error> {
    Ok(PathCounter::new(map)?.count(false))
}

fn part2(map: &CaveMap) -> Result<usize, Error> {
    Ok(PathCounter::new(map)?.count(true))
}

#[cfg(test)]
fn small_example() -> CaveMap {
    CaveMap::parse(&["start-A", "start-b", "A-c", "A-b", "b-d", "A-end", "b-end"])
        .expect("valid example")
}

#[cfg(test)]
fn larger_example() -> CaveMap {
    CaveMap::parse(&[
        "dc-end", "HN-start", "start-kj", "dc-start", "dc-HN", "LN-dc", "HN-end", "kj-sa",
        "kj-HN", "kj-dc",
    ])
    .expect("valid example")
}

#[test]
fn test_part1() {
    assert_eq!(part1(&small_example()).expect("valid"), 10);
    assert_eq!(part1(&larger_example()).expect("valid"), 19);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&small_example()).expect("valid"), 36);
    assert_eq!(part2(&larger_example()).expect("valid"), 103);
}

#[test]
fn test_missing_end() {
    let map = CaveMap::parse(&["start-A", "A-b"]).expect("valid");
    assert!(part1(&map).is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(12))?;
    let map = CaveMap::parse(&lines)?;
    println!("{}", part1(&map)?);
    println!("{}", part2(&map)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 12: {}", e);
        std::process::exit(1);
    }
}
