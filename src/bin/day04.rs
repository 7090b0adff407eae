use std::fmt::{self, Display, Formatter};

use tracing::debug;

use aoc2021::input::{day_file, ints, parse_int};
use aoc2021::{logging, Error, Inputs};

const SIDE: usize = 5;

#[derive(Debug, Clone)]
struct Board {
    numbers: [[u32; SIDE]; SIDE],
    marked: [[bool; SIDE]; SIDE],
    won: bool,
}

impl Board {
    fn parse(block: &str) -> Result<Board, Error> {
        let mut numbers = [[0; SIDE]; SIDE];
        let rows: Vec<&str> = block.lines().collect();
        if rows.len() != SIDE {
            return Err(Error::bad_input(format!(
                "expected {} rows in board, got {}",
                SIDE,
                rows.len()
            )));
        }
        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<&str> = row.split_whitespace().collect();
            if cells.len() != SIDE {
                return Err(Error::bad_input(format!(
                    "expected {} numbers in board row, got '{}'",
                    SIDE, row
                )));
            }
            for (c, cell) in cells.iter().enumerate() {
                numbers[r][c] = parse_int(cell)?;
            }
        }
        Ok(Board {
            numbers,
            marked: [[false; SIDE]; SIDE],
            won: false,
        })
    }

    fn row_complete(&self, r: usize) -> bool {
        self.marked[r].iter().all(|m| *m)
    }

    fn column_complete(&self, c: usize) -> bool {
        self.marked.iter().all(|row| row[c])
    }

    /// Mark `n`, returning true if this makes the board win.  A board
    /// which has already won ignores further calls.
    fn call(&mut self, n: u32) -> bool {
        if self.won {
            return false;
        }
        for r in 0..SIDE {
            for c in 0..SIDE {
                if self.numbers[r][c] == n {
                    self.marked[r][c] = true;
                    if self.row_complete(r) || self.column_complete(c) {
                        self.won = true;
                        return true;
                    }
                }
            }
        }
        false
    }

    fn score(&self, last_called: u32) -> u32 {
        let unmarked: u32 = (0..SIDE)
            .flat_map(|r| (0..SIDE).map(move |c| (r, c)))
            .filter(|&(r, c)| !self.marked[r][c])
            .map(|(r, c)| self.numbers[r][c])
            .sum();
        unmarked * last_called
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..SIDE {
            for c in 0..SIDE {
                if self.marked[r][c] {
                    write!(f, "[{:2}]", self.numbers[r][c])?;
                } else {
                    write!(f, " {:2} ", self.numbers[r][c])?;
                }
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Game {
    draws: Vec<u32>,
    boards: Vec<Board>,
}

impl TryFrom<&str> for Game {
    type Error = Error;

    fn try_from(text: &str) -> Result<Game, Error> {
        let normalised = text.replace("\r\n", "\n");
        let mut sections = normalised.split("\n\n");
        let draws = match sections.next() {
            Some(line) => ints(line)?,
            None => return Err(Error::bad_input("input is empty")),
        };
        let boards: Vec<Board> = sections.map(Board::parse).collect::<Result<_, _>>()?;
        if boards.is_empty() {
            return Err(Error::bad_input("there are no boards"));
        }
        Ok(Game { draws, boards })
    }
}

/// Play until `enough` boards have won, returning the score of the
/// board that won last.
fn play(mut game: Game, enough: usize) -> Result<u32, Error> {
    let mut wins = 0;
    for n in game.draws.iter().copied() {
        for board in game.boards.iter_mut() {
            if board.call(n) {
                wins += 1;
                debug!("board {} wins on {}:\n{}", wins, n, board);
                if wins == enough {
                    return Ok(board.score(n));
                }
            }
        }
    }
    Err(Error::bad_input(format!(
        "ran out of numbers with only {} winning boards",
        wins
    )))
}

fn part1(game: &Game) -> Result<u32, Error> {
    play(game.clone(), 1)
}

fn part2(game: &Game) -> Result<u32, Error> {
    play(game.clone(), game.boards.len())
}

#[cfg(test)]
const SAMPLE: &str = "7,4,9,5,11,17,23,2,0,14,21,24,10,16,13,6,15,25,12,22,18,20,8,19,3,26,1

22 13 17 11  0
 8  2 23  4 24
21  9 14 16  7
 6 10  3 18  5
 1 12 20 15 19

 3 15  0  2 22
 9 18 13 17  5
19  8  7 25 23
20 11 10 24  4
14 21 16 12  6

14 21 17 24  4
10 16 15  9 19
18  8 23 26 20
22 11 13  6  5
 2  0 12  3  7
";

#[test]
fn test_parse_game() {
    let game = Game::try_from(SAMPLE.trim()).expect("valid test data");
    assert_eq!(game.draws.len(), 27);
    assert_eq!(game.boards.len(), 3);
    assert_eq!(game.boards[2].numbers[4], [2, 0, 12, 3, 7]);
}

#[test]
fn test_part1() {
    let game = Game::try_from(SAMPLE.trim()).expect("valid test data");
    assert_eq!(part1(&game).expect("a board wins"), 4512);
}

#[test]
fn test_part2() {
    let game = Game::try_from(SAMPLE.trim()).expect("valid test data");
    assert_eq!(part2(&game).expect("all boards win"), 1924);
}

#[test]
fn test_won_board_ignores_calls() {
    let mut board =
        Board::parse("1 2 3 4 5\n6 7 8 9 10\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 25")
            .expect("valid board");
    for n in 1..5 {
        assert!(!board.call(n));
    }
    assert!(board.call(5));
    assert!(!board.call(6));
    assert!(!board.marked[1][0]);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let text = Inputs::from_args().read_file(&day_file(4))?;
    let game = Game::try_from(text.as_str())?;
    println!("{}", part1(&game)?);
    println!("{}", part2(&game)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 04: {}", e);
        std::process::exit(1);
    }
}
