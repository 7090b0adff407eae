use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use aoc2021::input::{cut, day_file};
use aoc2021::{logging, Error, Inputs};

type Pair = (char, char);

#[derive(Debug)]
struct Polymer {
    template: Vec<char>,
    rules: HashMap<Pair, char>,
}

impl TryFrom<&str> for Polymer {
    type Error = Error;

    fn try_from(text: &str) -> Result<Polymer, Error> {
        let (template, rules_text) = cut(text.trim(), "\n\n")?;
        let template: Vec<char> = template.trim().chars().collect();
        if template.is_empty() {
            return Err(Error::bad_input("empty polymer template"));
        }
        let mut rules = HashMap::new();
        for line in rules_text.lines() {
            let (pair, insert) = cut(line.trim(), " -> ")?;
            let pair: Vec<char> = pair.chars().collect();
            let insert: Vec<char> = insert.chars().collect();
            match (pair.as_slice(), insert.as_slice()) {
                ([a, b], [c]) => {
                    rules.insert((*a, *b), *c);
                }
                _ => {
                    return Err(Error::bad_input(format!(
                        "malformed insertion rule '{}'",
                        line
                    )));
                }
            }
        }
        Ok(Polymer { template, rules })
    }
}

impl Polymer {
    fn initial_pairs(&self) -> HashMap<Pair, u64> {
        let mut pairs = HashMap::new();
        for w in self.template.windows(2) {
            *pairs.entry((w[0], w[1])).or_insert(0) += 1;
        }
        pairs
    }

    fn step(&self, pairs: &HashMap<Pair, u64>) -> HashMap<Pair, u64> {
        let mut next = HashMap::with_capacity(pairs.len());
        for (&(left, right), &count) in pairs {
            match self.rules.get(&(left, right)) {
                Some(&middle) => {
                    *next.entry((left, middle)).or_insert(0) += count;
                    *next.entry((middle, right)).or_insert(0) += count;
                }
                None => {
                    *next.entry((left, right)).or_insert(0) += count;
                }
            }
        }
        next
    }

    /// Element counts after `steps` rounds of insertion.
    fn element_counts(&self, steps: usize) -> BTreeMap<char, u64> {
        let mut pairs = self.initial_pairs();
        for _ in 0..steps {
            pairs = self.step(&pairs);
        }
        // Every element but the first is the right half of exactly one pair.
        let mut counts = BTreeMap::new();
        if let Some(&first) = self.template.first() {
            counts.insert(first, 1);
        }
        for ((_, right), n) in pairs {
            *counts.entry(right).or_insert(0) += n;
        }
        trace!("element counts after {} steps: {:?}", steps, counts);
        counts
    }

    fn spread(&self, steps: usize) -> u64 {
        let counts = self.element_counts(steps);
        let most = counts.values().max().copied().unwrap_or(0);
        let least = counts.values().min().copied().unwrap_or(0);
        most - least
    }
}

#[cfg(test)]
const EXAMPLE: &str = "NNCB

CH -> B
HH -> N
CB -> H
NH -> C
HB -> C
HC -> B
HN -> C
NN -> C
BH -> H
NC -> B
NB -> B
BN -> B
BB -> N
BC -> B
CC -> N
CN -> C
";

#[test]
fn test_element_counts() {
    let polymer = Polymer::try_from(EXAMPLE).expect("valid example");
    // NBCCNBBBCBHCB
    let counts = polymer.element_counts(2);
    assert_eq!(counts.get(&'B'), Some(&6));
    assert_eq!(counts.get(&'C'), Some(&4));
    assert_eq!(counts.get(&'N'), Some(&2));
    assert_eq!(counts.get(&'H'), Some(&1));
    assert_eq!(polymer.element_counts(10).values().sum::<u64>(), 3073);
}

#[test]
fn test_spread() {
    let polymer = Polymer::try_from(EXAMPLE).expect("valid example");
    assert_eq!(polymer.spread(10), 1588);
    assert_eq!(polymer.spread(40), 2188189693529);
}

#[test]
fn test_bad_rule() {
    assert!(Polymer::try_from("NN\n\nNNN -> C").is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let text = Inputs::from_args().read_file(&day_file(14))?;
    let polymer = Polymer::try_from(text.as_str())?;
    println!("{}", polymer.spread(10));
    println!("{}", polymer.spread(40));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 14: {}", e);
        std::process::exit(1);
    }
}
