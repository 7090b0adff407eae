use tracing::debug;

use aoc2021::input::{day_file, ints};
use aoc2021::{logging, Error, Inputs};

const NEWBORN_TIMER: usize = 8;
const RESET_TIMER: usize = 6;

/// Number of fish for each timer value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct School([u64; NEWBORN_TIMER + 1]);

impl School {
    fn new(timers: &[usize]) -> Result<School, Error> {
        let mut counts = [0; NEWBORN_TIMER + 1];
        for t in timers {
            match counts.get_mut(*t) {
                Some(n) => *n += 1,
                None => {
                    return Err(Error::bad_input(format!("fish timer {} is out of range", t)));
                }
            }
        }
        Ok(School(counts))
    }

    fn tick(&self) -> School {
        let mut next = [0; NEWBORN_TIMER + 1];
        next[..NEWBORN_TIMER].copy_from_slice(&self.0[1..]);
        let spawning = self.0[0];
        next[RESET_TIMER] += spawning;
        next[NEWBORN_TIMER] = spawning;
        School(next)
    }

    fn population(&self) -> u64 {
        self.0.iter().sum()
    }
}

fn population_after(school: &School, days: usize) -> u64 {
    let mut current = school.clone();
    for day in 1..=days {
        current = current.tick();
        debug!("after {:3} days: {:?}", day, current.0);
    }
    current.population()
}

fn part1(school: &School) -> u64 {
    population_after(school, 80)
}

fn part2(school: &School) -> u64 {
    population_after(school, 256)
}

#[cfg(test)]
fn sample() -> School {
    School::new(&[3, 4, 3, 1, 2]).expect("valid test data")
}

#[test]
fn test_population_after() {
    assert_eq!(population_after(&sample(), 18), 26);
    assert_eq!(part1(&sample()), 5934);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&sample()), 26984457539);
}

#[test]
fn test_bad_timer() {
    assert!(School::new(&[9]).is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let text = Inputs::from_args().read_file(&day_file(6))?;
    let school = School::new(&ints(&text)?)?;
    println!("{}", part1(&school));
    println!("{}", part2(&school));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 06: {}", e);
        std::process::exit(1);
    }
}
