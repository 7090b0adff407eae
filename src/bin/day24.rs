use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace1},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    sequence::{pair, preceded, tuple},
    IResult,
};
use tracing::{debug, info, warn};

use aoc2021::input::day_file;
use aoc2021::{logging, Error, Inputs};

type Word = i64;

const MODEL_DIGITS: usize = 14;
const BLOCK_LEN: usize = 18;
/// Shape of each per-digit block; `None` marks the instructions whose
/// literal operand varies from block to block.
const BLOCK_TEMPLATE: [Option<&str>; BLOCK_LEN] = [
    Some("inp w"),
    Some("mul x 0"),
    Some("add x z"),
    Some("mod x 26"),
    None, // div z Z_DIV
    None, // add x X_OFF
    Some("eql x w"),
    Some("eql x 0"),
    Some("mul y 0"),
    Some("add y 25"),
    Some("mul y x"),
    Some("add y 1"),
    Some("mul z y"),
    Some("mul y 0"),
    Some("add y w"),
    None, // add y Y_OFF
    Some("mul y x"),
    Some("add z y"),
];

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
enum Reg {
    W,
    X,
    Y,
    Z,
}

impl Reg {
    fn index(&self) -> usize {
        match self {
            Reg::W => 0,
            Reg::X => 1,
            Reg::Y => 2,
            Reg::Z => 3,
        }
    }
}

impl Display for Reg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reg::W => "w",
            Reg::X => "x",
            Reg::Y => "y",
            Reg::Z => "z",
        })
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
enum Operand {
    Register(Reg),
    Literal(Word),
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => r.fmt(f),
            Operand::Literal(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, PartialOrd, Ord)]
enum BinaryOpcode {
    Add,
    Mul,
    Div,
    Mod,
    Eql,
}

impl BinaryOpcode {
    fn execute(&self, dest: Word, src: Word) -> Result<Word, Error> {
        let overflow =
            || Error::bad_input(format!("overflow computing {} {} {}", self, dest, src));
        match self {
            BinaryOpcode::Add => dest.checked_add(src).ok_or_else(overflow),
            BinaryOpcode::Mul => dest.checked_mul(src).ok_or_else(overflow),
            BinaryOpcode::Eql => Ok(Word::from(dest == src)),
            BinaryOpcode::Div => {
                if src == 0 {
                    Err(Error::bad_input(format!("division by zero: {} / 0", dest)))
                } else {
                    dest.checked_div(src).ok_or_else(overflow)
                }
            }
            BinaryOpcode::Mod => {
                if dest < 0 || src <= 0 {
                    Err(Error::bad_input(format!(
                        "cannot compute {} modulo {}",
                        dest, src
                    )))
                } else {
                    Ok(dest % src)
                }
            }
        }
    }
}

impl Display for BinaryOpcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOpcode::Add => "add",
            BinaryOpcode::Mul => "mul",
            BinaryOpcode::Div => "div",
            BinaryOpcode::Mod => "mod",
            BinaryOpcode::Eql => "eql",
        })
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
enum Instruction {
    Binary {
        op: BinaryOpcode,
        dest: Reg,
        src: Operand,
    },
    Inp {
        dest: Reg,
    },
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Binary { op, dest, src } => write!(f, "{} {} {}", op, dest, src),
            Instruction::Inp { dest } => write!(f, "inp {}", dest),
        }
    }
}

fn parse_literal(input: &str) -> IResult<&str, Word> {
    map_res(
        recognize(tuple((opt(char('-')), digit1))),
        FromStr::from_str,
    )(input)
}

fn parse_reg(input: &str) -> IResult<&str, Reg> {
    alt((
        value(Reg::W, char('w')),
        value(Reg::X, char('x')),
        value(Reg::Y, char('y')),
        value(Reg::Z, char('z')),
    ))(input)
}

fn parse_operand(input: &str) -> IResult<&str, Operand> {
    alt((
        map(parse_reg, Operand::Register),
        map(parse_literal, Operand::Literal),
    ))(input)
}

fn parse_binary_opcode(input: &str) -> IResult<&str, BinaryOpcode> {
    alt((
        value(BinaryOpcode::Add, tag("add")),
        value(BinaryOpcode::Mul, tag("mul")),
        value(BinaryOpcode::Div, tag("div")),
        value(BinaryOpcode::Mod, tag("mod")),
        value(BinaryOpcode::Eql, tag("eql")),
    ))(input)
}

fn parse_binary(input: &str) -> IResult<&str, Instruction> {
    map(
        tuple((
            parse_binary_opcode,
            preceded(multispace1, parse_reg),
            preceded(multispace1, parse_operand),
        )),
        |(op, dest, src)| Instruction::Binary { op, dest, src },
    )(input)
}

fn parse_inp(input: &str) -> IResult<&str, Instruction> {
    map(preceded(pair(tag("inp"), multispace1), parse_reg), |dest| {
        Instruction::Inp { dest }
    })(input)
}

fn parse_instruction(input: &str) -> IResult<&str, Instruction> {
    alt((parse_inp, parse_binary))(input)
}

impl TryFrom<&str> for Instruction {
    type Error = Error;
    fn try_from(s: &str) -> Result<Instruction, Error> {
        match all_consuming(parse_instruction)(s.trim()) {
            Ok((_, instruction)) => Ok(instruction),
            Err(e) => Err(Error::bad_input(format!("bad instruction '{}': {}", s, e))),
        }
    }
}

fn parse_program<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Instruction>, Error> {
    lines
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.trim().is_empty())
        .map(Instruction::try_from)
        .collect()
}

#[derive(Debug, Default)]
struct ArithmeticUnit {
    registers: [Word; 4],
}

impl ArithmeticUnit {
    fn get_reg(&self, r: Reg) -> Word {
        self.registers[r.index()]
    }

    fn fetch(&self, operand: &Operand) -> Word {
        match operand {
            Operand::Register(r) => self.get_reg(*r),
            Operand::Literal(n) => *n,
        }
    }

    /// Run `program` from a zeroed state, returning the final z register.
    fn execute(&mut self, program: &[Instruction], inputs: &[Word]) -> Result<Word, Error> {
        self.registers = [0; 4];
        let mut inputs = inputs.iter();
        for instruction in program {
            match instruction {
                Instruction::Binary { op, dest, src } => {
                    let result = op
                        .execute(self.get_reg(*dest), self.fetch(src))
                        .map_err(|e| {
                            Error::bad_input(format!("while executing '{}': {}", instruction, e))
                        })?;
                    self.registers[dest.index()] = result;
                }
                Instruction::Inp { dest } => match inputs.next() {
                    Some(value) => self.registers[dest.index()] = *value,
                    None => return Err(Error::bad_input("ran out of input")),
                },
            }
        }
        if inputs.next().is_some() {
            return Err(Error::bad_input("some input was not consumed"));
        }
        Ok(self.get_reg(Reg::Z))
    }
}

/// One decompiled digit block.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Step {
    z_div: Word,
    x_off: Word,
    y_off: Word,
}

impl Step {
    /// The effect of the block on z, for input digit `w`.
    fn apply(&self, z: Word, w: Word) -> Word {
        let mismatch = z % 26 + self.x_off != w;
        let z = z / self.z_div;
        if mismatch {
            z * 26 + w + self.y_off
        } else {
            z
        }
    }
}

fn literal_of(instruction: &Instruction, op: BinaryOpcode, dest: Reg) -> Option<Word> {
    match instruction {
        Instruction::Binary {
            op: got_op,
            dest: got_dest,
            src: Operand::Literal(n),
        } if *got_op == op && *got_dest == dest => Some(*n),
        _ => None,
    }
}

fn decompile(program: &[Instruction]) -> Result<Vec<Step>, Error> {
    if program.len() != MODEL_DIGITS * BLOCK_LEN {
        return Err(Error::bad_input(format!(
            "expected {} instructions, got {}",
            MODEL_DIGITS * BLOCK_LEN,
            program.len()
        )));
    }
    let mut steps = Vec::with_capacity(MODEL_DIGITS);
    for (n, block) in program.chunks(BLOCK_LEN).enumerate() {
        for (k, (instruction, expected)) in block.iter().zip(BLOCK_TEMPLATE.iter()).enumerate() {
            if let Some(expected) = expected {
                if instruction.to_string() != *expected {
                    return Err(Error::bad_input(format!(
                        "block {} instruction {} is '{}', expected '{}'",
                        n, k, instruction, expected
                    )));
                }
            }
        }
        let unexpected = |k: usize| {
            Error::bad_input(format!(
                "block {} instruction {} has an unexpected form: '{}'",
                n, k, block[k]
            ))
        };
        let z_div =
            literal_of(&block[4], BinaryOpcode::Div, Reg::Z).ok_or_else(|| unexpected(4))?;
        let x_off =
            literal_of(&block[5], BinaryOpcode::Add, Reg::X).ok_or_else(|| unexpected(5))?;
        let y_off =
            literal_of(&block[15], BinaryOpcode::Add, Reg::Y).ok_or_else(|| unexpected(15))?;
        if z_div != 1 && z_div != 26 {
            return Err(Error::bad_input(format!(
                "block {} divides z by {}; expected 1 or 26",
                n, z_div
            )));
        }
        let step = Step {
            z_div,
            x_off,
            y_off,
        };
        debug!("block {}: {:?}", n, step);
        steps.push(step);
    }
    Ok(steps)
}

fn run_steps(steps: &[Step], digits: &[Word]) -> Word {
    steps
        .iter()
        .zip(digits.iter())
        .fold(0, |z, (step, w)| step.apply(z, *w))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Want {
    Largest,
    Smallest,
}

/// Pair each push block with the pop block that undoes it; each pair
/// fixes the difference between their two digits.
fn solve(steps: &[Step], want: Want) -> Result<Vec<Word>, Error> {
    let mut digits: Vec<Word> = vec![0; steps.len()];
    let mut pushed: Vec<(usize, Word)> = Vec::new();
    for (j, step) in steps.iter().enumerate() {
        if step.z_div == 1 {
            pushed.push((j, step.y_off));
            continue;
        }
        let (i, y_off) = pushed
            .pop()
            .ok_or_else(|| Error::bad_input(format!("block {} pops an empty stack", j)))?;
        // digits[j] == digits[i] + diff
        let diff = y_off + step.x_off;
        if !(-8..=8).contains(&diff) {
            return Err(Error::bad_input(format!(
                "blocks {} and {} need digits {} apart",
                i, j, diff
            )));
        }
        let first = match want {
            Want::Largest => (9 - diff).min(9),
            Want::Smallest => (1 - diff).max(1),
        };
        digits[i] = first;
        digits[j] = first + diff;
    }
    if !pushed.is_empty() {
        return Err(Error::bad_input(format!(
            "{} blocks are never popped",
            pushed.len()
        )));
    }
    Ok(digits)
}

fn to_number(digits: &[Word]) -> Word {
    digits.iter().fold(0, |n, d| n * 10 + d)
}

fn verify(program: &[Instruction], digits: &[Word]) -> Result<(), Error> {
    let z = ArithmeticUnit::default().execute(program, digits)?;
    if z == 0 {
        Ok(())
    } else {
        Err(Error::bad_input(format!(
            "model number {} is rejected (z = {})",
            to_number(digits),
            z
        )))
    }
}

/// Compare the decompiled model with the interpreter on some fixed inputs.
fn cross_check(program: &[Instruction], steps: &[Step]) -> Result<(), Error> {
    let samples: [[Word; MODEL_DIGITS]; 3] = [
        [1; MODEL_DIGITS],
        [9; MODEL_DIGITS],
        [1, 3, 5, 7, 9, 2, 4, 6, 8, 9, 9, 9, 9, 9],
    ];
    for digits in samples.iter() {
        let expected = ArithmeticUnit::default().execute(program, digits)?;
        let got = run_steps(steps, digits);
        if expected != got {
            warn!(
                "decompiled program disagrees with the interpreter for {}: {} != {}",
                to_number(digits),
                got,
                expected
            );
        }
    }
    Ok(())
}

fn find_model_number(program: &[Instruction], want: Want) -> Result<Word, Error> {
    let steps = decompile(program)?;
    cross_check(program, &steps)?;
    let digits = solve(&steps, want)?;
    verify(program, &digits)?;
    let n = to_number(&digits);
    info!("{:?} accepted model number is {}", want, n);
    Ok(n)
}

fn part1(program: &[Instruction]) -> Result<Word, Error> {
    find_model_number(program, Want::Largest)
}

fn part2(program: &[Instruction]) -> Result<Word, Error> {
    find_model_number(program, Want::Smallest)
}

#[test]
fn test_execute_negate() {
    let program = parse_program(&["inp x", "mul x -1"]).expect("valid");
    let mut alu = ArithmeticUnit::default();
    assert_eq!(alu.execute(&program, &[4]).expect("runs"), 0);
    assert_eq!(alu.get_reg(Reg::X), -4);
}

#[test]
fn test_execute_three_times() {
    let program = parse_program(&["inp z", "inp x", "mul z 3", "eql z x"]).expect("valid");
    let mut alu = ArithmeticUnit::default();
    assert_eq!(alu.execute(&program, &[3, 9]).expect("runs"), 1);
    assert_eq!(alu.execute(&program, &[9, 3]).expect("runs"), 0);
    assert_eq!(alu.execute(&program, &[3, 10]).expect("runs"), 0);
}

#[test]
fn test_execute_binary() {
    let program = parse_program(&[
        "inp w", "add z w", "mod z 2", "div w 2", "add y w", "mod y 2", "div w 2", "add x w",
        "mod x 2", "div w 2", "mod w 2",
    ])
    .expect("valid");
    for (input, expected) in [(0, [0, 0, 0, 0]), (6, [0, 1, 1, 0]), (15, [1, 1, 1, 1])] {
        let mut alu = ArithmeticUnit::default();
        alu.execute(&program, &[input]).expect("runs");
        assert_eq!(alu.registers, expected, "registers for input {}", input);
    }
}

#[test]
fn test_execute_errors() {
    let mut alu = ArithmeticUnit::default();
    let div0 = parse_program(&["inp w", "div w 0"]).expect("valid");
    assert!(alu.execute(&div0, &[3]).is_err());
    let neg_mod = parse_program(&["inp w", "mod w 5"]).expect("valid");
    assert!(alu.execute(&neg_mod, &[-3]).is_err());
    let zero_mod = parse_program(&["inp w", "mod w x"]).expect("valid");
    assert!(alu.execute(&zero_mod, &[3]).is_err());
    assert!(alu.execute(&zero_mod, &[]).is_err());
    assert!(alu.execute(&div0, &[1, 2]).is_err());
}

#[test]
fn test_parse_instruction() {
    assert_eq!(
        Instruction::try_from("add x -12").expect("valid"),
        Instruction::Binary {
            op: BinaryOpcode::Add,
            dest: Reg::X,
            src: Operand::Literal(-12)
        }
    );
    assert_eq!(
        Instruction::try_from("inp w").expect("valid"),
        Instruction::Inp { dest: Reg::W }
    );
    assert!(Instruction::try_from("add x").is_err());
    assert!(Instruction::try_from("sub x 1").is_err());
    assert!(Instruction::try_from("inp w z").is_err());
}

#[cfg(test)]
const TEST_STEPS: [(Word, Word, Word); MODEL_DIGITS] = [
    (1, 10, 2),
    (1, 14, 7),
    (26, -5, 3),
    (1, 12, 0),
    (1, 11, 5),
    (26, -5, 1),
    (26, -4, 4),
    (1, 13, 8),
    (26, -8, 2),
    (26, -1, 6),
    (1, 15, 3),
    (26, -6, 9),
    (1, 10, 1),
    (26, 0, 7),
];

#[cfg(test)]
fn test_program() -> Vec<Instruction> {
    let mut lines: Vec<String> = Vec::new();
    for (z_div, x_off, y_off) in TEST_STEPS {
        for (k, line) in BLOCK_TEMPLATE.iter().enumerate() {
            lines.push(match (k, line) {
                (4, _) => format!("div z {}", z_div),
                (5, _) => format!("add x {}", x_off),
                (15, _) => format!("add y {}", y_off),
                (_, Some(text)) => text.to_string(),
                (_, None) => unreachable!("parameterised slot {}", k),
            });
        }
    }
    parse_program(&lines).expect("valid test program")
}

#[test]
fn test_decompile() {
    let steps = decompile(&test_program()).expect("decompiles");
    assert_eq!(steps.len(), MODEL_DIGITS);
    assert_eq!(
        steps[2],
        Step {
            z_div: 26,
            x_off: -5,
            y_off: 3
        }
    );
    let mut truncated = test_program();
    truncated.pop();
    assert!(decompile(&truncated).is_err());
}

#[test]
fn test_steps_match_interpreter() {
    let program = test_program();
    let steps = decompile(&program).expect("decompiles");
    for digits in [[1; MODEL_DIGITS], [9; MODEL_DIGITS], [5; MODEL_DIGITS]] {
        let mut alu = ArithmeticUnit::default();
        assert_eq!(
            alu.execute(&program, &digits).expect("runs"),
            run_steps(&steps, &digits)
        );
    }
}

#[test]
fn test_part1() {
    let program = test_program();
    assert_eq!(part1(&program).expect("solvable"), 87999959999689);
}

#[test]
fn test_part2() {
    let program = test_program();
    assert_eq!(part2(&program).expect("solvable"), 11351111124112);
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let lines = Inputs::from_args().read_lines(&day_file(24))?;
    let program = parse_program(&lines)?;
    println!("{}", part1(&program)?);
    println!("{}", part2(&program)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 24: {}", e);
        std::process::exit(1);
    }
}
