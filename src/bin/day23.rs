use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Mul};

use pathfinding::directed::astar::astar;
use pathfinding::num_traits::Zero;
use tracing::debug;

use aoc2021::input::day_file;
use aoc2021::{logging, Error, Inputs};

//            1
//  01234567890
// #############
// #...........#  hallway
// ###B#C#B#D###  room slot 0
//   #A#D#C#A#    room slot 1
//   #########

const HALLWAY_LEN: usize = 11;
const ROOMS: usize = 4;
const MAX_DEPTH: usize = 8;
/// Hallway cells an amphipod may stop in (that is, not outside a door).
const HALLWAY_STOPS: [usize; 7] = [0, 1, 3, 5, 7, 9, 10];
/// Rows inserted to unfold a two-deep diagram.
const UNFOLDED_ROWS: [[Amphipod; ROOMS]; 2] = [
    [Amphipod::D, Amphipod::C, Amphipod::B, Amphipod::A],
    [Amphipod::D, Amphipod::B, Amphipod::A, Amphipod::C],
];

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
struct Cost(u64);

impl Zero for Cost {
    fn zero() -> Self {
        Cost(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Mul<usize> for Cost {
    type Output = Cost;
    fn mul(self, n: usize) -> Cost {
        Cost(self.0 * n as u64)
    }
}

impl Add<Cost> for Cost {
    type Output = Cost;
    fn add(self, other: Cost) -> Cost {
        Cost(self.0 + other.0)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
enum Amphipod {
    A,
    B,
    C,
    D,
}

impl Amphipod {
    fn step_cost(&self) -> Cost {
        match self {
            Amphipod::A => Cost(1),
            Amphipod::B => Cost(10),
            Amphipod::C => Cost(100),
            Amphipod::D => Cost(1000),
        }
    }

    /// Index of the room this amphipod belongs in.
    fn home(&self) -> usize {
        match self {
            Amphipod::A => 0,
            Amphipod::B => 1,
            Amphipod::C => 2,
            Amphipod::D => 3,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Amphipod::A => 'A',
            Amphipod::B => 'B',
            Amphipod::C => 'C',
            Amphipod::D => 'D',
        }
    }
}

impl TryFrom<char> for Amphipod {
    type Error = Error;
    fn try_from(ch: char) -> Result<Amphipod, Error> {
        match ch {
            'A' => Ok(Amphipod::A),
            'B' => Ok(Amphipod::B),
            'C' => Ok(Amphipod::C),
            'D' => Ok(Amphipod::D),
            _ => Err(Error::bad_input(format!(
                "unknown symbol {}, should be A, B, C or D",
                ch
            ))),
        }
    }
}

/// Hallway column just outside a room.
fn door(room: usize) -> usize {
    2 + 2 * room
}

fn cell(ch: char) -> Result<Option<Amphipod>, Error> {
    match ch {
        '.' => Ok(None),
        _ => Amphipod::try_from(ch).map(Some),
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
struct Burrow {
    hallway: [Option<Amphipod>; HALLWAY_LEN],
    /// Slot 0 of each room is the one next to the hallway.
    rooms: [[Option<Amphipod>; MAX_DEPTH]; ROOMS],
    depth: usize,
}

impl Burrow {
    fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Burrow, Error> {
        let rows: Vec<Vec<char>> = lines.iter().map(|s| s.as_ref().chars().collect()).collect();
        let hallway_row = rows
            .get(1)
            .ok_or_else(|| Error::bad_input("diagram has no hallway"))?;
        let mut hallway = [None; HALLWAY_LEN];
        for (col, slot) in hallway.iter_mut().enumerate() {
            let ch = hallway_row
                .get(col + 1)
                .copied()
                .ok_or_else(|| Error::bad_input("hallway row is too short"))?;
            *slot = cell(ch)?;
        }
        let mut rooms = [[None; MAX_DEPTH]; ROOMS];
        let mut depth = 0;
        for row in rows.iter().skip(2) {
            let is_room_row = matches!(row.get(door(0) + 1), Some('A'..='D') | Some('.'));
            if !is_room_row {
                break;
            }
            if depth == MAX_DEPTH {
                return Err(Error::bad_input(format!(
                    "rooms deeper than {} are not supported",
                    MAX_DEPTH
                )));
            }
            for (room, slots) in rooms.iter_mut().enumerate() {
                let ch = row
                    .get(door(room) + 1)
                    .copied()
                    .ok_or_else(|| Error::bad_input("room row is too short"))?;
                slots[depth] = cell(ch)?;
            }
            depth += 1;
        }
        if depth == 0 {
            return Err(Error::bad_input("diagram has no rooms"));
        }
        let burrow = Burrow {
            hallway,
            rooms,
            depth,
        };
        burrow.check_population()?;
        Ok(burrow)
    }

    fn occupants(&self) -> impl Iterator<Item = Amphipod> + '_ {
        self.hallway
            .iter()
            .chain(self.rooms.iter().flat_map(|r| r[..self.depth].iter()))
            .flatten()
            .copied()
    }

    fn check_population(&self) -> Result<(), Error> {
        let mut counts = [0; ROOMS];
        for pod in self.occupants() {
            counts[pod.home()] += 1;
        }
        if counts.iter().all(|&n| n == self.depth) {
            Ok(())
        } else {
            Err(Error::bad_input(format!(
                "expected {} of each amphipod, found {:?}",
                self.depth, counts
            )))
        }
    }

    /// Insert the two extra rows between the first and second slots.
    fn unfold(&self) -> Result<Burrow, Error> {
        if self.depth != 2 {
            return Ok(*self);
        }
        let mut result = *self;
        result.depth = 4;
        for room in 0..ROOMS {
            result.rooms[room][1] = Some(UNFOLDED_ROWS[0][room]);
            result.rooms[room][2] = Some(UNFOLDED_ROWS[1][room]);
            result.rooms[room][3] = self.rooms[room][1];
        }
        result.check_population()?;
        Ok(result)
    }

    fn slots(&self, room: usize) -> &[Option<Amphipod>] {
        &self.rooms[room][..self.depth]
    }

    /// True when the room holds nobody who needs to leave.
    fn room_is_clean(&self, room: usize) -> bool {
        self.slots(room)
            .iter()
            .flatten()
            .all(|pod| pod.home() == room)
    }

    fn is_organised(&self) -> bool {
        (0..ROOMS).all(|room| {
            self.slots(room)
                .iter()
                .all(|slot| slot.map(|pod| pod.home()) == Some(room))
        })
    }

    /// Whether the hallway is empty on the way from `from` to `to`
    /// (`from` itself is not checked).
    fn hallway_clear(&self, from: usize, to: usize) -> bool {
        let cells = if from < to {
            &self.hallway[from + 1..=to]
        } else if to < from {
            &self.hallway[to..from]
        } else {
            &self.hallway[0..0]
        };
        cells.iter().all(Option::is_none)
    }

    fn moves(&self) -> Vec<(Burrow, Cost)> {
        let mut result = Vec::new();
        for (col, occupant) in self.hallway.iter().enumerate() {
            let pod = match occupant {
                Some(pod) => *pod,
                None => continue,
            };
            let room = pod.home();
            if !self.room_is_clean(room) || !self.hallway_clear(col, door(room)) {
                continue;
            }
            if let Some(slot) = self.slots(room).iter().rposition(Option::is_none) {
                let mut next = *self;
                next.hallway[col] = None;
                next.rooms[room][slot] = Some(pod);
                let steps = col.abs_diff(door(room)) + slot + 1;
                result.push((next, pod.step_cost() * steps));
            }
        }
        for room in 0..ROOMS {
            if self.room_is_clean(room) {
                continue;
            }
            let (slot, pod) = match self
                .slots(room)
                .iter()
                .enumerate()
                .find_map(|(slot, occupant)| occupant.map(|pod| (slot, pod)))
            {
                Some(found) => found,
                None => continue,
            };
            for col in HALLWAY_STOPS {
                if !self.hallway_clear(door(room), col) || self.hallway[col].is_some() {
                    continue;
                }
                let mut next = *self;
                next.rooms[room][slot] = None;
                next.hallway[col] = Some(pod);
                let steps = slot + 1 + col.abs_diff(door(room));
                result.push((next, pod.step_cost() * steps));
            }
        }
        result
    }

    /// A lower bound on the energy still needed: every amphipod not yet
    /// settled must at least walk to the top slot of its own room.
    fn heuristic(&self) -> Cost {
        let mut total = Cost(0);
        for (col, occupant) in self.hallway.iter().enumerate() {
            if let Some(pod) = occupant {
                total = total + pod.step_cost() * (col.abs_diff(door(pod.home())) + 1);
            }
        }
        for room in 0..ROOMS {
            let slots = self.slots(room);
            for (slot, occupant) in slots.iter().enumerate() {
                let pod = match occupant {
                    Some(pod) => pod,
                    None => continue,
                };
                let settled = slots[slot..]
                    .iter()
                    .all(|s| s.map(|p| p.home()) == Some(room));
                if settled {
                    continue;
                }
                let sideways = if pod.home() == room {
                    2
                } else {
                    door(room).abs_diff(door(pod.home()))
                };
                total = total + pod.step_cost() * (slot + 1 + sideways + 1);
            }
        }
        total
    }
}

impl Display for Burrow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let show = |cell: &Option<Amphipod>| cell.map_or('.', |pod| pod.symbol());
        writeln!(f, "#############")?;
        let hall: String = self.hallway.iter().map(show).collect();
        writeln!(f, "#{}#", hall)?;
        for slot in 0..self.depth {
            let (left, right) = if slot == 0 { ("###", "###") } else { ("  #", "#") };
            let row: Vec<String> = (0..ROOMS)
                .map(|room| show(&self.rooms[room][slot]).to_string())
                .collect();
            writeln!(f, "{}{}{}", left, row.join("#"), right)?;
        }
        write!(f, "  #########")
    }
}

fn least_energy(start: &Burrow) -> Result<u64, Error> {
    match astar(start, Burrow::moves, Burrow::heuristic, Burrow::is_organised) {
        Some((path, cost)) => {
            debug!(
                "organised a depth-{} burrow in {} moves using {} energy",
                start.depth,
                path.len() - 1,
                cost.0
            );
            Ok(cost.0)
        }
        None => Err(Error::bad_input(format!(
            "the amphipods cannot be organised:\n{}",
            start
        ))),
    }
}

fn part1(burrow: &Burrow) -> Result<u64, Error> {
    least_energy(burrow)
}

fn part2(burrow: &Burrow) -> Result<u64, Error> {
    least_energy(&burrow.unfold()?)
}

#[cfg(test)]
const EXAMPLE: &[&str] = &[
    "#############",
    "#...........#",
    "###B#C#B#D###",
    "  #A#D#C#A#",
    "  #########",
];

#[cfg(test)]
fn example() -> Burrow {
    Burrow::parse(EXAMPLE).expect("valid example")
}

#[test]
fn test_parse_and_display() {
    let burrow = example();
    assert_eq!(burrow.depth, 2);
    assert_eq!(burrow.rooms[0][0], Some(Amphipod::B));
    assert_eq!(burrow.rooms[3][1], Some(Amphipod::A));
    assert_eq!(burrow.to_string(), EXAMPLE.join("\n"));
}

#[test]
fn test_parse_rejects_bad_population() {
    let lines = [
        "#############",
        "#...........#",
        "###B#C#B#D###",
        "  #A#D#C#B#",
        "  #########",
    ];
    assert!(Burrow::parse(&lines).is_err());
    let lines = [
        "#############",
        "#...........#",
        "###B#C#B#E###",
        "  #A#D#C#A#",
        "  #########",
    ];
    assert!(Burrow::parse(&lines).is_err());
}

#[test]
fn test_unfold() {
    let unfolded = example().unfold().expect("valid unfold");
    assert_eq!(
        unfolded.to_string(),
        [
            "#############",
            "#...........#",
            "###B#C#B#D###",
            "  #D#C#B#A#",
            "  #D#B#A#C#",
            "  #A#D#C#A#",
            "  #########",
        ]
        .join("\n")
    );
}

#[test]
fn test_moves() {
    let burrow = example();
    // Each room's top amphipod can reach all seven hallway stops.
    assert_eq!(burrow.moves().len(), 28);
    let organised = Burrow::parse(&[
        "#############",
        "#...........#",
        "###A#B#C#D###",
        "  #A#B#C#D#",
        "  #########",
    ])
    .expect("valid");
    assert!(organised.is_organised());
    assert!(organised.moves().is_empty());
    assert_eq!(organised.heuristic(), Cost(0));
}

#[test]
fn test_one_move_left() {
    let burrow = Burrow::parse(&[
        "#############",
        "#.........A.#",
        "###.#B#C#D###",
        "  #A#B#C#D#",
        "  #########",
    ])
    .expect("valid");
    assert_eq!(part1(&burrow).expect("solvable"), 8);
}

#[test]
fn test_part1() {
    assert_eq!(part1(&example()).expect("solvable"), 12521);
}

#[test]
fn test_part2() {
    assert_eq!(part2(&example()).expect("solvable"), 44169);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(23))?;
    let burrow = Burrow::parse(&lines)?;
    println!("{}", part1(&burrow)?);
    println!("{}", part2(&burrow)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 23: {}", e);
        std::process::exit(1);
    }
}
