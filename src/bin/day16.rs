use aoc2021::input::{day_file, parse_hex};
use aoc2021::{logging, Error, Inputs};

#[derive(Debug, PartialEq, Eq)]
enum Packet {
    Literal {
        version: u8,
        value: u64,
    },
    Operator {
        version: u8,
        type_id: u8,
        subpackets: Vec<Packet>,
    },
}

const LITERAL: u8 = 4;
const HEADER_BITS: usize = 6;

/// A cursor over the bits of a transmission, most significant first.
struct BitReader {
    bits: Vec<bool>,
    pos: usize,
}

impl BitReader {
    fn from_hex(text: &str) -> Result<BitReader, Error> {
        let mut bits = Vec::with_capacity(text.len() * 4);
        for ch in text.trim().chars() {
            let nibble = parse_hex(ch)?;
            bits.extend((0..4).rev().map(|shift| (nibble >> shift) & 1 != 0));
        }
        Ok(BitReader { bits, pos: 0 })
    }

    fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    fn read(&mut self, nbits: usize) -> Result<u64, Error> {
        if nbits > self.remaining() {
            return Err(Error::bad_input(format!(
                "wanted {} bits at offset {} but only {} remain",
                nbits,
                self.pos,
                self.remaining()
            )));
        }
        let value = self.bits[self.pos..self.pos + nbits]
            .iter()
            .fold(0, |acc, bit| (acc << 1) | u64::from(*bit));
        self.pos += nbits;
        Ok(value)
    }

    /// Consume `nbits` bits which must all be zero.
    fn skip_padding(&mut self, nbits: usize) -> Result<(), Error> {
        let start = self.pos;
        if self.read(nbits)? != 0 {
            return Err(Error::bad_input(format!(
                "non-zero padding in bits {}..{}",
                start, self.pos
            )));
        }
        Ok(())
    }

    fn literal_value(&mut self) -> Result<u64, Error> {
        let mut value: u64 = 0;
        loop {
            let more = self.read(1)? != 0;
            let group = self.read(4)?;
            if value.leading_zeros() < 4 {
                return Err(Error::bad_input("literal value does not fit in 64 bits"));
            }
            value = (value << 4) | group;
            if !more {
                return Ok(value);
            }
        }
    }

    fn packet(&mut self) -> Result<Packet, Error> {
        let version = self.read(3)? as u8;
        let type_id = self.read(3)? as u8;
        if type_id == LITERAL {
            let value = self.literal_value()?;
            return Ok(Packet::Literal { version, value });
        }
        let mut subpackets = Vec::new();
        if self.read(1)? == 0 {
            let len = self.read(15)? as usize;
            if len > self.remaining() {
                return Err(Error::bad_input(format!(
                    "sub-packets claim {} bits but only {} remain",
                    len,
                    self.remaining()
                )));
            }
            let end = self.pos + len;
            while end - self.pos > HEADER_BITS {
                subpackets.push(self.packet()?);
                if self.pos > end {
                    return Err(Error::bad_input(format!(
                        "sub-packet overran its enclosing span by {} bits",
                        self.pos - end
                    )));
                }
            }
            self.skip_padding(end - self.pos)?;
        } else {
            let count = self.read(11)?;
            for _ in 0..count {
                subpackets.push(self.packet()?);
            }
        }
        Ok(Packet::Operator {
            version,
            type_id,
            subpackets,
        })
    }
}

fn decode(text: &str) -> Result<Packet, Error> {
    let mut reader = BitReader::from_hex(text)?;
    let packet = reader.packet()?;
    let rest = reader.remaining();
    reader.skip_padding(rest)?;
    Ok(packet)
}

impl Packet {
    fn version_sum(&self) -> u64 {
        match self {
            Packet::Literal { version, .. } => u64::from(*version),
            Packet::Operator {
                version,
                subpackets,
                ..
            } => u64::from(*version) + subpackets.iter().map(Packet::version_sum).sum::<u64>(),
        }
    }

    fn evaluate(&self) -> Result<u64, Error> {
        let (type_id, subpackets) = match self {
            Packet::Literal { value, .. } => return Ok(*value),
            Packet::Operator {
                type_id,
                subpackets,
                ..
            } => (*type_id, subpackets),
        };
        let values = subpackets
            .iter()
            .map(Packet::evaluate)
            .collect::<Result<Vec<u64>, Error>>()?;
        let empty = || Error::bad_input(format!("operator {} has no operands", type_id));
        match type_id {
            0 => Ok(values.iter().sum()),
            1 => Ok(values.iter().product()),
            2 => values.iter().copied().min().ok_or_else(empty),
            3 => values.iter().copied().max().ok_or_else(empty),
            5..=7 => match values.as_slice() {
                [a, b] => {
                    let holds = match type_id {
                        5 => a > b,
                        6 => a < b,
                        _ => a == b,
                    };
                    Ok(u64::from(holds))
                }
                _ => Err(Error::bad_input(format!(
                    "comparison operator {} needs 2 operands, got {}",
                    type_id,
                    values.len()
                ))),
            },
            other => Err(Error::bad_input(format!("unknown packet type {}", other))),
        }
    }
}

fn part1(text: &str) -> Result<u64, Error> {
    Ok(decode(text)?.version_sum())
}

fn part2(text: &str) -> Result<u64, Error> {
    decode(text)?.evaluate()
}

#[test]
fn test_literal() {
    assert_eq!(
        decode("D2FE28").expect("valid"),
        Packet::Literal {
            version: 6,
            value: 2021
        }
    );
}

#[test]
fn test_operator_bit_length() {
    assert_eq!(
        decode("38006F45291200").expect("valid"),
        Packet::Operator {
            version: 1,
            type_id: 6,
            subpackets: vec![
                Packet::Literal {
                    version: 6,
                    value: 10
                },
                Packet::Literal {
                    version: 2,
                    value: 20
                },
            ]
        }
    );
}

#[test]
fn test_operator_packet_count() {
    match decode("EE00D40C823060").expect("valid") {
        Packet::Operator {
            version: 7,
            type_id: 3,
            subpackets,
        } => {
            let values: Vec<u64> = subpackets
                .iter()
                .map(|p| p.evaluate().expect("literal"))
                .collect();
            assert_eq!(values, vec![1, 2, 3]);
        }
        other => panic!("unexpected packet {:?}", other),
    }
}

#[test]
fn test_part1() {
    assert_eq!(part1("8A004A801A8002F478").expect("valid"), 16);
    assert_eq!(part1("620080001611562C8802118E34").expect("valid"), 12);
    assert_eq!(part1("C0015000016115A2E0802F182340").expect("valid"), 23);
    assert_eq!(part1("A0016C880162017C3686B18A3D4780").expect("valid"), 31);
}

#[test]
fn test_part2() {
    assert_eq!(part2("C200B40A82").expect("valid"), 3);
    assert_eq!(part2("04005AC33890").expect("valid"), 54);
    assert_eq!(part2("880086C3E88112").expect("valid"), 7);
    assert_eq!(part2("CE00C43D881120").expect("valid"), 9);
    assert_eq!(part2("D8005AC2A8F0").expect("valid"), 1);
    assert_eq!(part2("F600BC2D8F").expect("valid"), 0);
    assert_eq!(part2("9C005AC2F8F0").expect("valid"), 0);
    assert_eq!(part2("9C0141080250320F1802104A08").expect("valid"), 1);
}

#[test]
fn test_truncated() {
    assert!(decode("D2F").is_err());
    assert!(decode("XYZ").is_err());
}

#[test]
fn test_padding_must_be_zero() {
    // A sum whose 15-bit span holds one literal and four spare bits.
    assert_eq!(part2("20003C4080").expect("zero spare bits"), 1);
    assert!(decode("20003C4088").is_err());
    assert_eq!(part2("D2FE28").expect("zero trailing bits"), 2021);
    assert!(decode("D2FE29").is_err());
}

#[test]
fn test_comparison_operand_count() {
    assert_eq!(part2("3600841882").expect("two operands"), 1);
    let three = decode("3600C41882102").expect("well formed");
    assert!(three.evaluate().is_err());
    assert!(part2("3600C41882102").is_err());
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let text = Inputs::from_args().read_file(&day_file(16))?;
    println!("{}", part1(&text)?);
    println!("{}", part2(&text)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Day 16: {}", e);
        std::process::exit(1);
    }
}
