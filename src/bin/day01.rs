use aoc2021::input::{day_file, parse_int};
use aoc2021::{logging, Error, Inputs};

fn count_increases(depths: &[u64], gap: usize) -> usize {
    // Comparing sums of `gap` consecutive depths only involves the two
    // values that differ between the windows.
    depths.windows(gap + 1).filter(|w| w[gap] > w[0]).count()
}

fn part1(depths: &[u64]) -> usize {
    count_increases(depths, 1)
}

fn part2(depths: &[u64]) -> usize {
    count_increases(depths, 3)
}

#[cfg(test)]
const SAMPLE: &[u64] = &[199, 200, 208, 210, 200, 207, 240, 269, 260, 263];

#[test]
fn test_part1() {
    assert_eq!(part1(SAMPLE), 7);
}

#[test]
fn test_part2() {
    assert_eq!(part2(SAMPLE), 5);
    assert_eq!(part2(&[1, 2, 3]), 0);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let depths: Vec<u64> = Inputs::from_args()
        .read_lines(&day_file(1))?
        .iter()
        .map(|line| parse_int(line))
        .collect::<Result<_, _>>()?;
    println!("{}", part1(&depths));
    println!("{}", part2(&depths));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 01: {}", e);
        std::process::exit(1);
    }
}
