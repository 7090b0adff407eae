use regex::Regex;

use aoc2021::input::{day_file, parse_int};
use aoc2021::{logging, Error, Inputs};

const TRACK_LEN: u32 = 10;

/// Move forward `rolled` spaces around the circular track.
fn next_pos(current: u32, rolled: u32) -> u32 {
    (current + rolled - 1) % TRACK_LEN + 1
}

#[test]
fn test_next_pos() {
    assert_eq!(next_pos(4, 3), 7);
    assert_eq!(next_pos(4, 6), 10);
    assert_eq!(next_pos(4, 7), 1);
    assert_eq!(next_pos(8, 15), 3);
}

fn parse_start_positions<S: AsRef<str>>(lines: &[S]) -> Result<(u32, u32), Error> {
    let re = Regex::new(r"^Player (\d) starting position: (\d+)$")
        .map_err(|e| Error::bad_input(e.to_string()))?;
    let mut positions: Vec<u32> = Vec::with_capacity(2);
    for line in lines.iter().map(|s| s.as_ref().trim()) {
        if line.is_empty() {
            continue;
        }
        let caps = re
            .captures(line)
            .ok_or_else(|| Error::bad_input(format!("unexpected line '{}'", line)))?;
        let player: usize = parse_int(&caps[1])?;
        let pos: u32 = parse_int(&caps[2])?;
        if player != positions.len() + 1 {
            return Err(Error::bad_input(format!(
                "expected player {}, got '{}'",
                positions.len() + 1,
                line
            )));
        }
        if !(1..=TRACK_LEN).contains(&pos) {
            return Err(Error::bad_input(format!(
                "starting position {} is off the track",
                pos
            )));
        }
        positions.push(pos);
    }
    match positions.as_slice() {
        [p1, p2] => Ok((*p1, *p2)),
        _ => Err(Error::bad_input(format!(
            "expected 2 players, got {}",
            positions.len()
        ))),
    }
}

mod part1 {
    use super::next_pos;

    const WINNING_SCORE: u32 = 1000;

    pub trait Die {
        fn roll(&mut self) -> u32;
        fn rolls(&self) -> u64;
    }

    pub struct DeterministicDie {
        next_roll: u32,
        total_rolls: u64,
    }

    impl DeterministicDie {
        pub fn new() -> DeterministicDie {
            DeterministicDie {
                next_roll: 1,
                total_rolls: 0,
            }
        }
    }

    impl Die for DeterministicDie {
        fn roll(&mut self) -> u32 {
            let result = self.next_roll;
            self.next_roll = self.next_roll % 100 + 1;
            self.total_rolls += 1;
            result
        }

        fn rolls(&self) -> u64 {
            self.total_rolls
        }
    }

    #[test]
    fn test_deterministic_die() {
        let mut die = DeterministicDie::new();
        let first: Vec<u32> = (0..3).map(|_| die.roll()).collect();
        assert_eq!(first, vec![1, 2, 3]);
        for _ in 3..100 {
            die.roll();
        }
        assert_eq!(die.roll(), 1);
        assert_eq!(die.rolls(), 101);
    }

    /// Play to the end; the result is the loser's score times the
    /// number of rolls.
    pub fn play<D: Die>(die: &mut D, p1: u32, p2: u32) -> u64 {
        let mut pos = [p1, p2];
        let mut score = [0_u32, 0_u32];
        let mut turn = 0;
        loop {
            let moved: u32 = (0..3).map(|_| die.roll()).sum();
            pos[turn] = next_pos(pos[turn], moved);
            score[turn] += pos[turn];
            if score[turn] >= WINNING_SCORE {
                let loser = score[1 - turn];
                return u64::from(loser) * die.rolls();
            }
            turn = 1 - turn;
        }
    }

    #[test]
    fn test_play() {
        assert_eq!(play(&mut DeterministicDie::new(), 4, 8), 739785);
    }
}

mod part2 {
    use std::collections::HashMap;

    use super::next_pos;

    const WINNING_SCORE: u32 = 21;

    /// How many ways three rolls of a 3-sided die give each total.
    const ROLL_FREQUENCIES: [(u32, u64); 7] =
        [(3, 1), (4, 3), (5, 6), (6, 7), (7, 6), (8, 3), (9, 1)];

    #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
    struct PlayerState {
        pos: u32,
        score: u32,
    }

    #[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
    struct Outcome {
        win: u64,
        lose: u64,
    }

    /// Wins and losses for the player about to move.
    fn outcomes(
        mover: PlayerState,
        waiting: PlayerState,
        cache: &mut HashMap<(PlayerState, PlayerState), Outcome>,
    ) -> Outcome {
        if let Some(known) = cache.get(&(mover, waiting)) {
            return *known;
        }
        let mut total = Outcome::default();
        for (roll, ways) in ROLL_FREQUENCIES {
            let pos = next_pos(mover.pos, roll);
            let moved = PlayerState {
                pos,
                score: mover.score + pos,
            };
            if moved.score >= WINNING_SCORE {
                total.win += ways;
            } else {
                let next = outcomes(waiting, moved, cache);
                total.win += ways * next.lose;
                total.lose += ways * next.win;
            }
        }
        cache.insert((mover, waiting), total);
        total
    }

    /// Wins of whichever player wins in more universes.
    pub fn most_wins(p1: u32, p2: u32) -> u64 {
        let mut cache = HashMap::new();
        let outcome = outcomes(
            PlayerState { pos: p1, score: 0 },
            PlayerState { pos: p2, score: 0 },
            &mut cache,
        );
        outcome.win.max(outcome.lose)
    }

    #[test]
    fn test_most_wins() {
        assert_eq!(most_wins(4, 8), 444356092776315);
    }
}

#[test]
fn test_parse_start_positions() {
    let lines = ["Player 1 starting position: 4", "Player 2 starting position: 8"];
    assert_eq!(parse_start_positions(&lines).expect("valid"), (4, 8));
    assert!(parse_start_positions(&lines[..1]).is_err());
    assert!(parse_start_positions(&["Player 1 starting position: 11"]).is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(21))?;
    let (p1, p2) = parse_start_positions(&lines)?;
    println!("{}", part1::play(&mut part1::DeterministicDie::new(), p1, p2));
    println!("{}", part2::most_wins(p1, p2));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 21: {}", e);
        std::process::exit(1);
    }
}
