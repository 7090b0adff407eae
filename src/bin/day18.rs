use std::fmt::{self, Display, Formatter};

use tracing::trace;

use aoc2021::input::{day_file, parse_int};
#[cfg(test)]
use aoc2021::input::example_lines;
use aoc2021::{logging, Error, Inputs};

const EXPLODE_DEPTH: usize = 4;
const SPLIT_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Regular(u32),
    Pair(usize, usize),
}

/// A node of a snailfish number.  Regular numbers are also threaded onto
/// a doubly linked list in left-to-right order.
#[derive(Debug, Clone)]
struct Node {
    kind: Kind,
    prev: Option<usize>,
    next: Option<usize>,
}

impl Node {
    fn new(kind: Kind) -> Node {
        Node {
            kind,
            prev: None,
            next: None,
        }
    }
}

/// A snailfish number, held in an arena indexed by node id.
#[derive(Debug, Clone)]
struct SnailNum {
    nodes: Vec<Node>,
    root: usize,
}

struct Parser<'a> {
    text: &'a [u8],
    pos: usize,
    nodes: Vec<Node>,
}

impl Parser<'_> {
    fn expect(&mut self, want: u8) -> Result<(), Error> {
        match self.text.get(self.pos) {
            Some(&got) if got == want => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(Error::bad_input(format!(
                "expected '{}' at offset {} of '{}'",
                want as char,
                self.pos,
                String::from_utf8_lossy(self.text)
            ))),
        }
    }

    fn element(&mut self) -> Result<usize, Error> {
        if self.text.get(self.pos) == Some(&b'[') {
            self.pos += 1;
            let left = self.element()?;
            self.expect(b',')?;
            let right = self.element()?;
            self.expect(b']')?;
            self.nodes.push(Node::new(Kind::Pair(left, right)));
        } else {
            let start = self.pos;
            while self.pos < self.text.len() && self.text[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
            if start == self.pos {
                return Err(Error::bad_input(format!(
                    "expected a number or '[' at offset {} of '{}'",
                    start,
                    String::from_utf8_lossy(self.text)
                )));
            }
            let digits = String::from_utf8_lossy(&self.text[start..self.pos]);
            let value = parse_int(&digits)?;
            self.nodes.push(Node::new(Kind::Regular(value)));
        }
        Ok(self.nodes.len() - 1)
    }
}

impl TryFrom<&str> for SnailNum {
    type Error = Error;

    fn try_from(s: &str) -> Result<SnailNum, Error> {
        let mut parser = Parser {
            text: s.trim().as_bytes(),
            pos: 0,
            nodes: Vec::new(),
        };
        let root = parser.element()?;
        if parser.pos != parser.text.len() {
            return Err(Error::bad_input(format!("trailing junk after '{}'", s)));
        }
        if !matches!(parser.nodes[root].kind, Kind::Pair(..)) {
            return Err(Error::bad_input(format!("'{}' is not a pair", s)));
        }
        let mut num = SnailNum {
            nodes: parser.nodes,
            root,
        };
        num.link_regulars();
        Ok(num)
    }
}

impl SnailNum {
    fn collect_regulars(&self, id: usize, out: &mut Vec<usize>) {
        match self.nodes[id].kind {
            Kind::Regular(_) => out.push(id),
            Kind::Pair(left, right) => {
                self.collect_regulars(left, out);
                self.collect_regulars(right, out);
            }
        }
    }

    fn link_regulars(&mut self) {
        let mut order = Vec::new();
        self.collect_regulars(self.root, &mut order);
        for (i, &id) in order.iter().enumerate() {
            self.nodes[id].prev = i.checked_sub(1).map(|p| order[p]);
            self.nodes[id].next = order.get(i + 1).copied();
        }
    }

    /// Copy the subtree at `id` of `from` into this arena.
    fn graft(&mut self, from: &SnailNum, id: usize) -> usize {
        let kind = match from.nodes[id].kind {
            Kind::Regular(v) => Kind::Regular(v),
            Kind::Pair(left, right) => {
                let l = self.graft(from, left);
                let r = self.graft(from, right);
                Kind::Pair(l, r)
            }
        };
        self.nodes.push(Node::new(kind));
        self.nodes.len() - 1
    }

    fn first_regular(&self) -> usize {
        let mut id = self.root;
        while let Kind::Pair(left, _) = self.nodes[id].kind {
            id = left;
        }
        id
    }

    fn regular(&self, id: usize) -> Option<u32> {
        match self.nodes[id].kind {
            Kind::Regular(v) => Some(v),
            Kind::Pair(..) => None,
        }
    }

    fn find_exploding(&self, id: usize, depth: usize) -> Option<usize> {
        match self.nodes[id].kind {
            Kind::Regular(_) => None,
            Kind::Pair(left, right) => {
                if depth >= EXPLODE_DEPTH
                    && self.regular(left).is_some()
                    && self.regular(right).is_some()
                {
                    Some(id)
                } else {
                    self.find_exploding(left, depth + 1)
                        .or_else(|| self.find_exploding(right, depth + 1))
                }
            }
        }
    }

    fn add_to(&mut self, id: Option<usize>, amount: u32) {
        if let Some(id) = id {
            if let Kind::Regular(v) = self.nodes[id].kind {
                self.nodes[id].kind = Kind::Regular(v + amount);
            }
        }
    }

    fn explode(&mut self) -> bool {
        let id = match self.find_exploding(self.root, 0) {
            Some(id) => id,
            None => return false,
        };
        let (left, right) = match self.nodes[id].kind {
            Kind::Pair(l, r) => (l, r),
            Kind::Regular(_) => return false,
        };
        let (lv, rv) = match (self.regular(left), self.regular(right)) {
            (Some(lv), Some(rv)) => (lv, rv),
            _ => return false,
        };
        let prev = self.nodes[left].prev;
        let next = self.nodes[right].next;
        trace!("exploding [{},{}]", lv, rv);
        self.add_to(prev, lv);
        self.add_to(next, rv);
        self.nodes[id] = Node {
            kind: Kind::Regular(0),
            prev,
            next,
        };
        if let Some(p) = prev {
            self.nodes[p].next = Some(id);
        }
        if let Some(n) = next {
            self.nodes[n].prev = Some(id);
        }
        true
    }

    fn split(&mut self) -> bool {
        let mut cursor = Some(self.first_regular());
        while let Some(id) = cursor {
            let kind = self.nodes[id].kind;
            match kind {
                Kind::Regular(v) if v >= SPLIT_THRESHOLD => {
                    trace!("splitting {}", v);
                    let (prev, next) = (self.nodes[id].prev, self.nodes[id].next);
                    let left = self.nodes.len();
                    let right = left + 1;
                    self.nodes.push(Node {
                        kind: Kind::Regular(v / 2),
                        prev,
                        next: Some(right),
                    });
                    self.nodes.push(Node {
                        kind: Kind::Regular((v + 1) / 2),
                        prev: Some(left),
                        next,
                    });
                    if let Some(p) = prev {
                        self.nodes[p].next = Some(left);
                    }
                    if let Some(n) = next {
                        self.nodes[n].prev = Some(right);
                    }
                    self.nodes[id] = Node::new(Kind::Pair(left, right));
                    return true;
                }
                _ => cursor = self.nodes[id].next,
            }
        }
        false
    }

    fn reduce(&mut self) {
        while self.explode() || self.split() {}
    }

    /// The reduced sum of two numbers.  Only live nodes are carried over.
    fn add(&self, other: &SnailNum) -> SnailNum {
        let mut sum = SnailNum {
            nodes: Vec::with_capacity(self.nodes.len() + other.nodes.len() + 1),
            root: 0,
        };
        let left = sum.graft(self, self.root);
        let right = sum.graft(other, other.root);
        sum.nodes.push(Node::new(Kind::Pair(left, right)));
        sum.root = sum.nodes.len() - 1;
        sum.link_regulars();
        sum.reduce();
        sum
    }

    fn magnitude_of(&self, id: usize) -> u64 {
        match self.nodes[id].kind {
            Kind::Regular(v) => u64::from(v),
            Kind::Pair(left, right) => 3 * self.magnitude_of(left) + 2 * self.magnitude_of(right),
        }
    }

    fn magnitude(&self) -> u64 {
        self.magnitude_of(self.root)
    }

    fn fmt_node(&self, id: usize, f: &mut Formatter<'_>) -> fmt::Result {
        match self.nodes[id].kind {
            Kind::Regular(v) => write!(f, "{}", v),
            Kind::Pair(left, right) => {
                f.write_str("[")?;
                self.fmt_node(left, f)?;
                f.write_str(",")?;
                self.fmt_node(right, f)?;
                f.write_str("]")
            }
        }
    }
}

impl Display for SnailNum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root, f)
    }
}

fn parse_all<S: AsRef<str>>(lines: &[S]) -> Result<Vec<SnailNum>, Error> {
    lines
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.trim().is_empty())
        .map(SnailNum::try_from)
        .collect()
}

fn part1(nums: &[SnailNum]) -> Result<u64, Error> {
    let (first, rest) = nums
        .split_first()
        .ok_or_else(|| Error::bad_input("no snailfish numbers"))?;
    let total = rest.iter().fold(first.clone(), |acc, n| acc.add(n));
    Ok(total.magnitude())
}

fn part2(nums: &[SnailNum]) -> Result<u64, Error> {
    let mut best: Option<u64> = None;
    for (i, a) in nums.iter().enumerate() {
        for (j, b) in nums.iter().enumerate() {
            if i != j {
                let m = a.add(b).magnitude();
                best = Some(best.map_or(m, |prev| prev.max(m)));
            }
        }
    }
    best.ok_or_else(|| Error::bad_input("need at least two snailfish numbers"))
}

#[cfg(test)]
fn snail(s: &str) -> SnailNum {
    SnailNum::try_from(s).expect("valid snailfish number")
}

#[cfg(test)]
fn exploded_once(s: &str) -> String {
    let mut n = snail(s);
    assert!(n.explode());
    n.to_string()
}

#[cfg(test)]
const HOMEWORK: &str = "
[[[0,[5,8]],[[1,7],[9,6]]],[[4,[1,2]],[[1,4],2]]]
[[[5,[2,8]],4],[5,[[9,9],0]]]
[6,[[[6,2],[5,6]],[[7,6],[4,7]]]]
[[[6,[0,7]],[0,9]],[4,[9,[9,0]]]]
[[[7,[6,4]],[3,[1,3]]],[[[5,5],1],9]]
[[6,[[7,3],[3,2]]],[[[3,8],[5,7]],4]]
[[[[5,4],[7,7]],8],[[8,3],8]]
[[9,3],[[9,9],[6,[4,9]]]]
[[2,[[7,7],7]],[[5,8],[[9,3],[0,2]]]]
[[[[5,2],5],[8,[3,7]]],[[5,[7,5]],[4,4]]]
";

#[test]
fn test_parse_display() {
    let s = "[[[[1,3],[5,3]],[[1,3],[8,7]]],[[[4,9],[6,9]],[[8,2],[7,3]]]]";
    assert_eq!(snail(s).to_string(), s);
    assert!(SnailNum::try_from("[1,2").is_err());
    assert!(SnailNum::try_from("[1,2]x").is_err());
    assert!(SnailNum::try_from("7").is_err());
}

#[test]
fn test_explode() {
    assert_eq!(exploded_once("[[[[[9,8],1],2],3],4]"), "[[[[0,9],2],3],4]");
    assert_eq!(exploded_once("[7,[6,[5,[4,[3,2]]]]]"), "[7,[6,[5,[7,0]]]]");
    assert_eq!(exploded_once("[[6,[5,[4,[3,2]]]],1]"), "[[6,[5,[7,0]]],3]");
    assert_eq!(
        exploded_once("[[3,[2,[1,[7,3]]]],[6,[5,[4,[3,2]]]]]"),
        "[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]"
    );
    assert_eq!(
        exploded_once("[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]"),
        "[[3,[2,[8,0]]],[9,[5,[7,0]]]]"
    );
}

#[test]
fn test_split() {
    let mut n = snail("[[[[0,7],4],[15,[0,13]]],[1,1]]");
    assert!(n.split());
    assert_eq!(n.to_string(), "[[[[0,7],4],[[7,8],[0,13]]],[1,1]]");
    assert!(n.split());
    assert_eq!(n.to_string(), "[[[[0,7],4],[[7,8],[0,[6,7]]]],[1,1]]");
}

#[test]
fn test_add() {
    let sum = snail("[[[[4,3],4],4],[7,[[8,4],9]]]").add(&snail("[1,1]"));
    assert_eq!(sum.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
}

#[test]
fn test_magnitude() {
    assert_eq!(snail("[[1,2],[[3,4],5]]").magnitude(), 143);
    assert_eq!(
        snail("[[[[8,7],[7,7]],[[8,6],[7,7]]],[[[0,7],[6,6]],[8,7]]]").magnitude(),
        3488
    );
}

#[test]
fn test_part1() {
    let nums = parse_all(&example_lines(HOMEWORK)).expect("valid homework");
    assert_eq!(part1(&nums).expect("non-empty"), 4140);
}

#[test]
fn test_part2() {
    let nums = parse_all(&example_lines(HOMEWORK)).expect("valid homework");
    assert_eq!(part2(&nums).expect("at least two"), 3993);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(18))?;
    let nums = parse_all(&lines)?;
    println!("{}", part1(&nums)?);
    println!("{}", part2(&nums)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 18: {}", e);
        std::process::exit(1);
    }
}
