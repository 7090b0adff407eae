use std::collections::{HashMap, HashSet};
use std::ops::{Add, Sub};

use regex::Regex;
use tracing::{debug, info};

use aoc2021::input::{day_file, parse_int};
use aoc2021::{logging, Error, Inputs};

/// Scanners are aligned once this many beacons coincide.
const MIN_OVERLAP: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Point([i32; 3]);

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point([
            self.0[0] + other.0[0],
            self.0[1] + other.0[1],
            self.0[2] + other.0[2],
        ])
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point([
            self.0[0] - other.0[0],
            self.0[1] - other.0[1],
            self.0[2] - other.0[2],
        ])
    }
}

impl Point {
    fn manhattan(&self, other: &Point) -> i32 {
        (0..3).map(|i| (self.0[i] - other.0[i]).abs()).sum()
    }
}

/// A proper rotation by multiples of 90 degrees, as a row-major matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Rotation([[i32; 3]; 3]);

const IDENTITY: Rotation = Rotation([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
const QUARTER_X: Rotation = Rotation([[1, 0, 0], [0, 0, -1], [0, 1, 0]]);
const QUARTER_Y: Rotation = Rotation([[0, 0, 1], [0, 1, 0], [-1, 0, 0]]);

impl Rotation {
    fn then(&self, other: &Rotation) -> Rotation {
        let mut m = [[0; 3]; 3];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| other.0[r][k] * self.0[k][c]).sum();
            }
        }
        Rotation(m)
    }

    fn apply(&self, p: Point) -> Point {
        let mut out = [0; 3];
        for (r, v) in out.iter_mut().enumerate() {
            *v = (0..3).map(|k| self.0[r][k] * p.0[k]).sum();
        }
        Point(out)
    }
}

/// The 24 orientations, found by closing the identity under quarter
/// turns about the x and y axes.
fn all_rotations() -> Vec<Rotation> {
    let mut found = vec![IDENTITY];
    let mut seen: HashSet<Rotation> = found.iter().copied().collect();
    let mut i = 0;
    while i < found.len() {
        let current = found[i];
        for turn in [QUARTER_X, QUARTER_Y] {
            let next = current.then(&turn);
            if seen.insert(next) {
                found.push(next);
            }
        }
        i += 1;
    }
    found
}

#[derive(Debug, Clone)]
struct Scanner {
    id: usize,
    beacons: Vec<Point>,
}

fn parse_point(line: &str) -> Result<Point, Error> {
    let fields: Vec<i32> = line
        .split(',')
        .map(parse_int)
        .collect::<Result<Vec<i32>, Error>>()?;
    match fields.as_slice() {
        [x, y, z] => Ok(Point([*x, *y, *z])),
        _ => Err(Error::bad_input(format!(
            "expected 3 coordinates in '{}'",
            line
        ))),
    }
}

fn parse_scanners<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Scanner>, Error> {
    let header = Regex::new(r"^--- scanner (\d+) ---$")
        .map_err(|e| Error::bad_input(e.to_string()))?;
    let mut scanners: Vec<Scanner> = Vec::new();
    for line in lines.iter().map(|s| s.as_ref().trim()) {
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = header.captures(line) {
            let id: usize = parse_int(&caps[1])?;
            if id != scanners.len() {
                return Err(Error::bad_input(format!(
                    "expected scanner {} but found scanner {}",
                    scanners.len(),
                    id
                )));
            }
            scanners.push(Scanner {
                id,
                beacons: Vec::new(),
            });
        } else {
            match scanners.last_mut() {
                Some(scanner) => scanner.beacons.push(parse_point(line)?),
                None => {
                    return Err(Error::bad_input(format!(
                        "beacon '{}' appears before any scanner header",
                        line
                    )))
                }
            }
        }
    }
    if scanners.is_empty() {
        return Err(Error::bad_input("no scanner reports"));
    }
    Ok(scanners)
}

/// A scanner placed in the frame of scanner 0.
#[derive(Debug, Clone)]
struct Placed {
    position: Point,
    beacons: Vec<Point>,
}

/// Try to place `scanner` so that it shares enough beacons with `anchor`.
fn align(anchor: &Placed, scanner: &Scanner, rotations: &[Rotation]) -> Option<Placed> {
    for rotation in rotations {
        let turned: Vec<Point> = scanner.beacons.iter().map(|&b| rotation.apply(b)).collect();
        let mut votes: HashMap<Point, usize> = HashMap::new();
        for a in &anchor.beacons {
            for t in &turned {
                let n = votes.entry(*a - *t).or_insert(0);
                *n += 1;
                if *n >= MIN_OVERLAP {
                    let offset = *a - *t;
                    return Some(Placed {
                        position: offset,
                        beacons: turned.iter().map(|&t| t + offset).collect(),
                    });
                }
            }
        }
    }
    None
}

fn place_all(scanners: &[Scanner]) -> Result<Vec<Placed>, Error> {
    let rotations = all_rotations();
    let mut placed: Vec<Option<Placed>> = vec![None; scanners.len()];
    placed[0] = Some(Placed {
        position: Point([0, 0, 0]),
        beacons: scanners[0].beacons.clone(),
    });
    // Anchors are only tried against each scanner once.
    let mut tried: HashSet<(usize, usize)> = HashSet::new();
    let mut remaining = scanners.len() - 1;
    while remaining > 0 {
        let mut progress = false;
        for scanner in scanners {
            if placed[scanner.id].is_some() {
                continue;
            }
            for anchor_id in 0..scanners.len() {
                let anchor = match &placed[anchor_id] {
                    Some(anchor) => anchor,
                    None => continue,
                };
                if !tried.insert((anchor_id, scanner.id)) {
                    continue;
                }
                if let Some(p) = align(anchor, scanner, &rotations) {
                    debug!(
                        "scanner {} is at {:?} relative to scanner 0 (via scanner {})",
                        scanner.id, p.position.0, anchor_id
                    );
                    placed[scanner.id] = Some(p);
                    remaining -= 1;
                    progress = true;
                    info!(
                        "placed {} of {} scanners",
                        scanners.len() - remaining,
                        scanners.len()
                    );
                    break;
                }
            }
        }
        if !progress {
            let lost: Vec<usize> = scanners
                .iter()
                .filter(|s| placed[s.id].is_none())
                .map(|s| s.id)
                .collect();
            return Err(Error::bad_input(format!(
                "could not align scanners {:?}",
                lost
            )));
        }
    }
    Ok(placed.into_iter().flatten().collect())
}

fn part1(placed: &[Placed]) -> usize {
    placed
        .iter()
        .flat_map(|p| p.beacons.iter().copied())
        .collect::<HashSet<Point>>()
        .len()
}

fn part2(placed: &[Placed]) -> i32 {
    let mut best = 0;
    for a in placed {
        for b in placed {
            best = best.max(a.position.manhattan(&b.position));
        }
    }
    best
}

#[cfg(test)]
const SAMPLE: &[&str] = &[
    "--- scanner 0 ---",
    "404,-588,-901",
    "528,-643,409",
    "-838,591,734",
    "390,-675,-793",
    "-537,-823,-458",
    "-485,-357,347",
    "-345,-311,381",
    "-661,-816,-575",
    "-876,649,763",
    "-618,-824,-621",
    "553,345,-567",
    "474,580,667",
    "-447,-329,318",
    "-584,868,-557",
    "544,-627,-890",
    "564,392,-477",
    "455,729,728",
    "-892,524,684",
    "-689,845,-530",
    "423,-701,434",
    "7,-33,-71",
    "630,319,-379",
    "443,580,662",
    "-789,900,-551",
    "459,-707,401",
    "",
    "--- scanner 1 ---",
    "686,422,578",
    "605,423,415",
    "515,917,-361",
    "-336,658,858",
    "95,138,22",
    "-476,619,847",
    "-340,-569,-846",
    "567,-361,727",
    "-460,603,-452",
    "669,-402,600",
    "729,430,532",
    "-500,-761,534",
    "-322,571,750",
    "-466,-666,-811",
    "-429,-592,574",
    "-355,545,-477",
    "703,-491,-529",
    "-328,-685,520",
    "413,935,-424",
    "-391,539,-444",
    "586,-435,557",
    "-364,-763,-893",
    "807,-499,-711",
    "755,-354,-619",
    "553,889,-390",
    "",
    "--- scanner 2 ---",
    "649,640,665",
    "682,-795,504",
    "-784,533,-524",
    "-644,584,-595",
    "-588,-843,648",
    "-30,6,44",
    "-674,560,763",
    "500,723,-460",
    "609,671,-379",
    "-555,-800,653",
    "-675,-892,-343",
    "697,-426,-610",
    "578,704,681",
    "493,664,-388",
    "-671,-858,530",
    "-667,343,800",
    "571,-461,-707",
    "-138,-166,112",
    "-889,563,-600",
    "646,-828,498",
    "640,759,510",
    "-630,509,768",
    "-681,-892,-333",
    "673,-379,-804",
    "-742,-814,-386",
    "577,-820,562",
    "",
    "--- scanner 3 ---",
    "-589,542,597",
    "605,-692,669",
    "-500,565,-823",
    "-660,373,557",
    "-458,-679,-417",
    "-488,449,543",
    "-626,468,-788",
    "338,-750,-386",
    "528,-832,-391",
    "562,-778,733",
    "-938,-730,414",
    "543,643,-506",
    "-524,371,-870",
    "407,773,750",
    "-104,29,83",
    "378,-903,-323",
    "-778,-728,485",
    "426,699,580",
    "-438,-605,-362",
    "-469,-447,-387",
    "509,732,623",
    "647,635,-688",
    "-868,-804,481",
    "614,-800,639",
    "595,780,-596",
    "",
    "--- scanner 4 ---",
    "727,592,562",
    "-293,-554,779",
    "441,611,-461",
    "-714,465,-776",
    "-743,427,-804",
    "-660,-479,-426",
    "832,-632,460",
    "927,-485,-438",
    "408,393,-506",
    "466,436,-512",
    "110,16,151",
    "-258,-428,682",
    "-393,719,612",
    "-211,-452,876",
    "808,-476,-593",
    "-575,615,604",
    "-485,667,467",
    "-680,325,-822",
    "-627,-443,-432",
    "872,-547,-609",
    "833,512,582",
    "807,604,487",
    "839,-516,451",
    "891,-625,532",
    "-652,-548,-490",
    "30,-46,-14",
    "",
];

#[test]
fn test_rotations() {
    let rotations = all_rotations();
    assert_eq!(rotations.len(), 24);
    let p = Point([1, 2, 3]);
    let images: HashSet<Point> = rotations.iter().map(|r| r.apply(p)).collect();
    assert_eq!(images.len(), 24);
    assert!(images.contains(&Point([1, 2, 3])));
    assert!(images.contains(&Point([-1, -2, 3])));
    assert!(!images.contains(&Point([-1, 2, 3])));
}

#[test]
fn test_scanner_positions() {
    let scanners = parse_scanners(SAMPLE).expect("valid sample");
    assert_eq!(scanners.len(), 5);
    let placed = place_all(&scanners).expect("sample aligns");
    assert_eq!(placed[1].position, Point([68, -1246, -43]));
    assert_eq!(placed[2].position, Point([1105, -1205, 1229]));
    assert_eq!(placed[3].position, Point([-92, -2380, -20]));
    assert_eq!(placed[4].position, Point([-20, -1133, 1061]));
}

#[test]
fn test_part1() {
    let placed = place_all(&parse_scanners(SAMPLE).expect("valid sample")).expect("aligns");
    assert_eq!(part1(&placed), 79);
}

#[test]
fn test_part2() {
    let placed = place_all(&parse_scanners(SAMPLE).expect("valid sample")).expect("aligns");
    assert_eq!(part2(&placed), 3621);
}

#[test]
fn test_unalignable() {
    let scanners = parse_scanners(&["--- scanner 0 ---", "1,2,3", "--- scanner 1 ---", "4,5,6"])
        .expect("valid");
    assert!(place_all(&scanners).is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(19))?;
    let scanners = parse_scanners(&lines)?;
    let placed = place_all(&scanners)?;
    println!("{}", part1(&placed));
    println!("{}", part2(&placed));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 19: {}", e);
        std::process::exit(1);
    }
}
