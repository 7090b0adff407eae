mod base {
    use std::cmp::{max, min};
    use std::ops::RangeInclusive;
    use std::str::FromStr;

    use nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::{char, digit1},
        combinator::{all_consuming, map, map_res, opt, recognize, value},
        sequence::{delimited, preceded, separated_pair, tuple},
        IResult,
    };

    use aoc2021::Error;

    /// The region part 1 is confined to, on every axis.
    const INIT_REGION: RangeInclusive<i64> = -50..=50;

    #[derive(Debug, PartialEq, Eq, Clone)]
    pub struct Cuboid {
        pub axes: [RangeInclusive<i64>; 3],
    }

    fn overlap(a: &RangeInclusive<i64>, b: &RangeInclusive<i64>) -> RangeInclusive<i64> {
        max(*a.start(), *b.start())..=min(*a.end(), *b.end())
    }

    impl Cuboid {
        pub fn new(
            x: RangeInclusive<i64>,
            y: RangeInclusive<i64>,
            z: RangeInclusive<i64>,
        ) -> Cuboid {
            Cuboid { axes: [x, y, z] }
        }

        fn is_empty(&self) -> bool {
            self.axes.iter().any(|r| r.is_empty())
        }

        pub fn volume(&self) -> u64 {
            if self.is_empty() {
                0
            } else {
                self.axes
                    .iter()
                    .map(|r| (r.end() - r.start() + 1) as u64)
                    .product()
            }
        }

        pub fn intersect(&self, other: &Cuboid) -> Option<Cuboid> {
            let result = Cuboid {
                axes: [
                    overlap(&self.axes[0], &other.axes[0]),
                    overlap(&self.axes[1], &other.axes[1]),
                    overlap(&self.axes[2], &other.axes[2]),
                ],
            };
            if result.is_empty() {
                None
            } else {
                Some(result)
            }
        }

        /// Cut with a plane perpendicular to `axis`: the first part has
        /// coordinates `<= boundary`, the second `> boundary`.
        pub fn split(self, axis: usize, boundary: i64) -> (Option<Cuboid>, Option<Cuboid>) {
            let range = &self.axes[axis];
            if boundary < *range.start() {
                (None, Some(self))
            } else if boundary >= *range.end() {
                (Some(self), None)
            } else {
                let mut low = self.clone();
                let mut high = self;
                low.axes[axis] = *low.axes[axis].start()..=boundary;
                high.axes[axis] = (boundary + 1)..=*high.axes[axis].end();
                (Some(low), Some(high))
            }
        }

        /// The parts of `self` outside `other`, as disjoint cuboids.
        pub fn minus(&self, other: &Cuboid) -> Vec<Cuboid> {
            let cut = match self.intersect(other) {
                None => return vec![self.clone()],
                Some(cut) => cut,
            };
            let mut pieces = Vec::with_capacity(6);
            let mut rest = self.clone();
            for axis in 0..3 {
                let (below, remainder) = rest.split(axis, cut.axes[axis].start() - 1);
                pieces.extend(below);
                let remainder = match remainder {
                    Some(r) => r,
                    None => unreachable!("the intersection lies inside the cuboid"),
                };
                let (inside, above) = remainder.split(axis, *cut.axes[axis].end());
                pieces.extend(above);
                rest = match inside {
                    Some(r) => r,
                    None => unreachable!("the intersection lies inside the cuboid"),
                };
            }
            pieces
        }

        pub fn crop(&self) -> Option<Cuboid> {
            self.intersect(&Cuboid::new(INIT_REGION, INIT_REGION, INIT_REGION))
        }
    }

    #[test]
    fn test_split() {
        let c = Cuboid::new(5..=10, 20..=30, 50..=90);
        assert_eq!(c.clone().split(0, 1000000), (Some(c.clone()), None));
        assert_eq!(c.clone().split(0, -1000000), (None, Some(c.clone())));
        assert_eq!(
            c.split(1, 24),
            (
                Some(Cuboid::new(5..=10, 20..=24, 50..=90)),
                Some(Cuboid::new(5..=10, 25..=30, 50..=90))
            )
        );
    }

    #[test]
    fn test_minus() {
        let big = Cuboid::new(0..=9, 0..=9, 0..=9);
        let corner = Cuboid::new(5..=14, 5..=14, 5..=14);
        let pieces = big.minus(&corner);
        assert_eq!(pieces.iter().map(Cuboid::volume).sum::<u64>(), 1000 - 125);
        for (i, a) in pieces.iter().enumerate() {
            assert!(a.intersect(&corner).is_none());
            for b in &pieces[i + 1..] {
                assert!(a.intersect(b).is_none());
            }
        }
        let middle = Cuboid::new(3..=4, 3..=4, 3..=4);
        assert_eq!(big.minus(&middle).len(), 6);
        assert_eq!(big.minus(&Cuboid::new(20..=30, 0..=9, 0..=9)), vec![big.clone()]);
        assert!(middle.minus(&big).is_empty());
    }

    #[test]
    fn test_crop() {
        assert_eq!(
            Cuboid::new(-54112..=-39298, -85059..=-49293, -27449..=7877).crop(),
            None
        );
        assert_eq!(
            Cuboid::new(-54112..=39298, -85059..=-19, 20..=200).crop(),
            Some(Cuboid::new(-50..=50, -50..=-19, 20..=50))
        );
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    pub struct Step {
        pub on: bool,
        pub cuboid: Cuboid,
    }

    impl Step {
        pub fn crop(&self) -> Option<Step> {
            self.cuboid.crop().map(|cuboid| Step {
                on: self.on,
                cuboid,
            })
        }
    }

    fn i64_parser(input: &str) -> IResult<&str, i64> {
        map_res(
            recognize(tuple((opt(char('-')), digit1))),
            FromStr::from_str,
        )(input)
    }

    fn convert_to_range(pair: (i64, i64)) -> Result<RangeInclusive<i64>, String> {
        if pair.0 <= pair.1 {
            Ok((pair.0)..=(pair.1))
        } else {
            Err(format!("inverted range {:?}", pair))
        }
    }

    fn parse_range(input: &str) -> IResult<&str, RangeInclusive<i64>> {
        map_res(
            separated_pair(i64_parser, tag(".."), i64_parser),
            convert_to_range,
        )(input)
    }

    fn parse_cuboid(input: &str) -> IResult<&str, Cuboid> {
        map(
            tuple((
                delimited(tag("x="), parse_range, tag(",")),
                delimited(tag("y="), parse_range, tag(",")),
                preceded(tag("z="), parse_range),
            )),
            |(x, y, z)| Cuboid::new(x, y, z),
        )(input)
    }

    fn parse_on_off(input: &str) -> IResult<&str, bool> {
        alt((value(true, tag("on")), value(false, tag("off"))))(input)
    }

    fn parse_step(input: &str) -> IResult<&str, Step> {
        map(
            separated_pair(parse_on_off, tag(" "), parse_cuboid),
            |(on, cuboid)| Step { on, cuboid },
        )(input)
    }

    impl TryFrom<&str> for Step {
        type Error = Error;

        fn try_from(s: &str) -> Result<Step, Error> {
            match all_consuming(parse_step)(s.trim()) {
                Ok((_, step)) => Ok(step),
                Err(e) => Err(Error::bad_input(format!(
                    "invalid reboot step '{}': {}",
                    s, e
                ))),
            }
        }
    }

    #[test]
    fn test_parse_step() {
        assert_eq!(
            Step::try_from("on x=-54112..-39298,y=-85059..-49293,z=-27449..7877")
                .expect("valid"),
            Step {
                on: true,
                cuboid: Cuboid::new(-54112..=-39298, -85059..=-49293, -27449..=7877)
            }
        );
        assert!(Step::try_from("off x=1..2,y=3..4").is_err());
        assert!(Step::try_from("on x=5..1,y=3..4,z=1..1").is_err());
        assert!(Step::try_from("toggle x=1..2,y=3..4,z=1..1").is_err());
    }
}

use base::{Cuboid, Step};
use tracing::debug;

use aoc2021::input::day_file;
use aoc2021::{logging, Error, Inputs};

/// The lit region of the reactor, as disjoint cuboids.
#[derive(Debug, Default)]
struct Reactor {
    lit: Vec<Cuboid>,
}

impl Reactor {
    fn obey(&mut self, step: &Step) {
        let mut next = Vec::with_capacity(self.lit.len() + 1);
        for c in self.lit.drain(..) {
            next.extend(c.minus(&step.cuboid));
        }
        if step.on {
            next.push(step.cuboid.clone());
        }
        self.lit = next;
    }

    fn count_cubes_on(&self) -> u64 {
        self.lit.iter().map(Cuboid::volume).sum()
    }
}

fn reboot<'a, I>(steps: I) -> u64
where
    I: IntoIterator<Item = &'a Step>,
{
    let mut reactor = Reactor::default();
    for step in steps {
        reactor.obey(step);
    }
    debug!("{} disjoint cuboids are lit", reactor.lit.len());
    reactor.count_cubes_on()
}

fn parse_steps<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Step>, Error> {
    lines
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.trim().is_empty())
        .map(Step::try_from)
        .collect()
}

fn part1(steps: &[Step]) -> u64 {
    let cropped: Vec<Step> = steps.iter().filter_map(Step::crop).collect();
    reboot(&cropped)
}

fn part2(steps: &[Step]) -> u64 {
    reboot(steps)
}

#[cfg(test)]
const SMALL_EXAMPLE: &[&str] = &[
    "on x=10..12,y=10..12,z=10..12",
    "on x=11..13,y=11..13,z=11..13",
    "off x=9..11,y=9..11,z=9..11",
    "on x=10..10,y=10..10,z=10..10",
];

#[test]
fn test_small_example() {
    let steps = parse_steps(SMALL_EXAMPLE).expect("valid example");
    assert_eq!(reboot(&steps[..1]), 27);
    assert_eq!(reboot(&steps[..2]), 27 + 19);
    assert_eq!(reboot(&steps[..3]), 27 + 19 - 8);
    assert_eq!(part1(&steps), 39);
    assert_eq!(part2(&steps), 39);
}

#[test]
fn test_part1_ignores_far_cuboids() {
    let steps = parse_steps(&[
        "on x=-5..4,y=-5..4,z=-5..4",
        "on x=100..109,y=0..0,z=0..0",
        "off x=0..9,y=0..9,z=0..9",
    ])
    .expect("valid");
    assert_eq!(part1(&steps), 1000 - 125);
    assert_eq!(part2(&steps), 1000 - 125 + 10);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(22))?;
    let steps = parse_steps(&lines)?;
    println!("{}", part1(&steps));
    println!("{}", part2(&steps));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 22: {}", e);
        std::process::exit(1);
    }
}
