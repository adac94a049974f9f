//! Move notation.
//!
//! A token is `<base><i?><digits?>`. The base is one of the face letters
//! `F B U D L R`, the slices `H V`, the slabs `RS LS US DS` or the whole cube
//! turns `CR CL CU CD`. A trailing `i` (or an apostrophe) selects the inverse
//! and the digits give how many times to repeat the move.
//!
//! A command line is a list of tokens separated by whitespace or commas,
//! except for the two literal commands `scramble` and `clean slate`.

use std::{num::NonZeroU32, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::{
    face::Face,
    moves::{CubeTurn, Direction, MoveDescriptor, MoveKind, Slab, Slice, Turn},
};

/// The fixed sequence that the `scramble` command expands to.
pub const SCRAMBLE: [&str; 24] = [
    "R", "U", "Fi", "D2", "L", "B2", "Ui", "R2", "F", "Li", "D", "B", //
    "U2", "Ri", "F2", "Di", "L2", "Bi", "U", "R", "F2", "Li", "D", "B",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid move notation: `{0}`")]
    InvalidNotation(String),
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Apply the [`SCRAMBLE`] sequence.
    Scramble,
    /// Reset the cube to solved in its current color scheme.
    CleanSlate,
    /// Apply these tokens in order. They are parsed one at a time so that a
    /// bad token only stops the moves after it.
    Moves(Vec<&'a str>),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.split_whitespace().join(" ").as_str() {
            "scramble" => Command::Scramble,
            "clean slate" => Command::CleanSlate,
            _ => Command::Moves(tokens(line).collect()),
        }
    }

    /// The tokens this command applies, in order.
    pub fn tokens(&self) -> Vec<&'a str> {
        match self {
            Command::Scramble => SCRAMBLE.to_vec(),
            Command::CleanSlate => Vec::new(),
            Command::Moves(tokens) => tokens.clone(),
        }
    }
}

/// Splits a line into move tokens.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

const BASES: [(&str, MoveKind); 16] = {
    use Direction::Clockwise as Cw;

    [
        // Two letter bases first so that `RS` is not read as `R` then `S`
        ("RS", MoveKind::Slab(Slab::Right)),
        ("LS", MoveKind::Slab(Slab::Left)),
        ("US", MoveKind::Slab(Slab::Up)),
        ("DS", MoveKind::Slab(Slab::Down)),
        ("CR", MoveKind::Turn(Turn::Cube(CubeTurn::Right))),
        ("CL", MoveKind::Turn(Turn::Cube(CubeTurn::Left))),
        ("CU", MoveKind::Turn(Turn::Cube(CubeTurn::Up))),
        ("CD", MoveKind::Turn(Turn::Cube(CubeTurn::Down))),
        ("F", MoveKind::Turn(Turn::Face(Face::Front, Cw))),
        ("B", MoveKind::Turn(Turn::Face(Face::Back, Cw))),
        ("U", MoveKind::Turn(Turn::Face(Face::Up, Cw))),
        ("D", MoveKind::Turn(Turn::Face(Face::Down, Cw))),
        ("L", MoveKind::Turn(Turn::Face(Face::Left, Cw))),
        ("R", MoveKind::Turn(Turn::Face(Face::Right, Cw))),
        ("H", MoveKind::Turn(Turn::Slice(Slice::Horizontal))),
        ("V", MoveKind::Turn(Turn::Slice(Slice::Vertical))),
    ]
};

/// Parses a single move token.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNotation`] if the token has an unknown base,
/// trailing garbage, or a repeat count that is zero or does not fit in a
/// `u32`.
pub fn parse_move(token: &str) -> Result<MoveDescriptor, ParseError> {
    let invalid = || ParseError::InvalidNotation(token.to_owned());

    let normalized = token.replace('\'', "i");

    let (kind, rest) = BASES
        .iter()
        .find_map(|&(base, kind)| normalized.strip_prefix(base).map(|rest| (kind, rest)))
        .ok_or_else(invalid)?;

    let (kind, digits) = match rest.strip_prefix('i') {
        Some(digits) => (kind.inverse(), digits),
        None => (kind, rest),
    };

    let count = if digits.is_empty() {
        NonZeroU32::MIN
    } else if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse::<NonZeroU32>().map_err(|_| invalid())?
    } else {
        return Err(invalid());
    };

    Ok(MoveDescriptor::new(kind, count))
}

/// Parses every token of a line, failing on the first bad one.
///
/// # Errors
///
/// Returns the error of the first token that fails to parse.
pub fn parse_sequence(line: &str) -> Result<Vec<MoveDescriptor>, ParseError> {
    tokens(line).map(parse_move).collect()
}

impl FromStr for MoveDescriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}
