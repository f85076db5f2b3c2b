//! Dice: roll sources and dice expressions.
//!
//! All randomness in the simulator flows through the [`Dice`] trait. The
//! production source is [`SeededDice`], a reproducible stream over
//! [`PcgRng`]; tests use [`LoadedDice`] or [`ScriptedDice`] to pin results.
mod rng;

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::error::{CombatError, ErrorSeverity};

/// A source of die rolls.
pub trait Dice {
    /// Roll one die with `sides` faces (1..=sides). A zero-sided die rolls 0.
    fn roll(&mut self, sides: u32) -> u32;

    /// Derive an independent source for hypothetical rolls.
    ///
    /// Rolling on the fork must not advance `self`.
    fn fork(&self, context: u32) -> Self
    where
        Self: Sized;

    /// Roll a d20.
    fn d20(&mut self) -> u32 {
        self.roll(20)
    }
}

/// Reproducible dice stream keyed by a game seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededDice<R: RngOracle = PcgRng> {
    oracle: R,
    seed: u64,
    stream: u32,
    nonce: u64,
}

impl SeededDice<PcgRng> {
    /// Creates a PCG-backed stream for the given game seed.
    pub fn new(seed: u64) -> Self {
        Self::with_oracle(PcgRng, seed)
    }
}

impl<R: RngOracle> SeededDice<R> {
    pub fn with_oracle(oracle: R, seed: u64) -> Self {
        Self {
            oracle,
            seed,
            stream: 0,
            nonce: 0,
        }
    }

    /// Number of dice rolled on this stream so far.
    pub fn rolls(&self) -> u64 {
        self.nonce
    }
}

impl<R: RngOracle + Clone> Dice for SeededDice<R> {
    fn roll(&mut self, sides: u32) -> u32 {
        let seed = compute_seed(self.seed, self.nonce, self.stream, 0);
        self.nonce += 1;
        self.oracle.roll_die(seed, sides)
    }

    fn fork(&self, context: u32) -> Self {
        Self {
            oracle: self.oracle.clone(),
            seed: compute_seed(self.seed, self.nonce, self.stream, context.wrapping_add(1)),
            stream: context,
            nonce: 0,
        }
    }
}

/// Dice that always land on the same face (clamped to the die size).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadedDice {
    pub face: u32,
}

impl LoadedDice {
    pub const fn new(face: u32) -> Self {
        Self { face }
    }

    /// Always rolls the highest face.
    pub const fn maximum() -> Self {
        Self { face: u32::MAX }
    }

    /// Always rolls a 1.
    pub const fn minimum() -> Self {
        Self { face: 1 }
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        self.face.clamp(1, sides.max(1)).min(sides)
    }

    fn fork(&self, _context: u32) -> Self {
        *self
    }
}

/// Replays a queue of faces, then falls back to a fixed face.
///
/// Forks replay the same remaining script, so a hypothetical simulation
/// sees exactly the faces the real resolution will see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    script: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedDice {
    pub fn new(script: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
        }
    }

    /// Faces still waiting in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        let face = self.script.pop_front().unwrap_or(self.fallback);
        face.clamp(1, sides)
    }

    fn fork(&self, _context: u32) -> Self {
        self.clone()
    }
}

// ============================================================================
// Dice Expressions
// ============================================================================

/// Error returned when dice notation cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceParseError {
    #[error("empty dice expression")]
    Empty,

    #[error("invalid number '{0}' in dice expression")]
    InvalidNumber(String),

    #[error("dice expression '{0}' has trailing input")]
    Trailing(String),
}

impl CombatError for DiceParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "DICE_EMPTY",
            Self::InvalidNumber(_) => "DICE_INVALID_NUMBER",
            Self::Trailing(_) => "DICE_TRAILING_INPUT",
        }
    }
}

/// Dice notation `NdS+B`, e.g. `2d6+1`, `d8`, `1d4-1` or a flat `3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub bonus: i32,
}

/// Result of rolling a [`DiceExpr`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollRecord {
    pub faces: Vec<u32>,
    pub bonus: i32,
    pub total: i32,
}

impl DiceExpr {
    pub const fn new(count: u32, sides: u32, bonus: i32) -> Self {
        Self {
            count,
            sides,
            bonus,
        }
    }

    /// A constant amount with no dice.
    pub const fn flat(amount: i32) -> Self {
        Self::new(0, 0, amount)
    }

    pub fn roll(&self, dice: &mut impl Dice) -> RollRecord {
        let faces: Vec<u32> = (0..self.count).map(|_| dice.roll(self.sides)).collect();
        let sum: i64 = faces.iter().map(|&f| i64::from(f)).sum();
        RollRecord {
            faces,
            bonus: self.bonus,
            total: self.with_bonus(sum),
        }
    }

    pub fn minimum(&self) -> i32 {
        let floor = if self.sides == 0 { 0 } else { self.count };
        self.with_bonus(i64::from(floor))
    }

    pub fn maximum(&self) -> i32 {
        self.with_bonus(i64::from(self.count).saturating_mul(i64::from(self.sides)))
    }

    /// Mean roll, rounded down.
    pub fn average(&self) -> i32 {
        if self.sides == 0 {
            return self.bonus;
        }
        let pips = i64::from(self.count).saturating_mul(i64::from(self.sides) + 1);
        self.with_bonus(pips / 2)
    }

    /// `amount + bonus`, saturated into `i32`.
    fn with_bonus(&self, amount: i64) -> i32 {
        let total = amount.saturating_add(i64::from(self.bonus));
        i32::try_from(total).unwrap_or(if total < 0 { i32::MIN } else { i32::MAX })
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 || self.sides == 0 {
            return write!(f, "{}", self.bonus);
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

fn parse_number<T: FromStr>(text: &str) -> Result<T, DiceParseError> {
    text.trim()
        .parse()
        .map_err(|_| DiceParseError::InvalidNumber(text.trim().to_string()))
}

impl FromStr for DiceExpr {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        if text.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let Some((count, rest)) = text.split_once('d') else {
            return Ok(Self::flat(parse_number(&text)?));
        };
        if rest.contains('d') {
            return Err(DiceParseError::Trailing(s.to_string()));
        }

        let count = if count.trim().is_empty() {
            1
        } else {
            parse_number(count)?
        };

        let (sides, bonus) = match rest.find(['+', '-']) {
            Some(idx) => {
                let (sides, bonus) = rest.split_at(idx);
                let magnitude: i32 = parse_number(&bonus[1..])?;
                let bonus = if bonus.starts_with('-') {
                    -magnitude
                } else {
                    magnitude
                };
                (parse_number(sides)?, bonus)
            }
            None => (parse_number(rest)?, 0),
        };

        Ok(Self::new(count, sides, bonus))
    }
}

impl TryFrom<String> for DiceExpr {
    type Error = DiceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiceExpr> for String {
    fn from(value: DiceExpr) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_notation() {
        assert_eq!("2d6+1".parse(), Ok(DiceExpr::new(2, 6, 1)));
        assert_eq!("d8".parse(), Ok(DiceExpr::new(1, 8, 0)));
        assert_eq!("1d4-1".parse(), Ok(DiceExpr::new(1, 4, -1)));
        assert_eq!(" 7 ".parse(), Ok(DiceExpr::flat(7)));
        assert!("".parse::<DiceExpr>().is_err());
        assert!("2d".parse::<DiceExpr>().is_err());
        assert!("1d6d6".parse::<DiceExpr>().is_err());
    }

    #[test]
    fn displays_back_to_notation() {
        assert_eq!(DiceExpr::new(2, 6, 1).to_string(), "2d6+1");
        assert_eq!(DiceExpr::new(1, 4, -1).to_string(), "1d4-1");
        assert_eq!(DiceExpr::flat(12).to_string(), "12");
    }

    #[test]
    fn loaded_dice_clamp_to_die() {
        let mut dice = LoadedDice::maximum();
        assert_eq!(dice.roll(6), 6);
        assert_eq!(dice.roll(0), 0);
        let roll = DiceExpr::new(3, 4, 2).roll(&mut dice);
        assert_eq!(roll.faces, vec![4, 4, 4]);
        assert_eq!(roll.total, 14);
    }

    #[test]
    fn scripted_dice_replay_then_fall_back() {
        let mut dice = ScriptedDice::new([3, 19], 1);
        let fork = dice.fork(9);
        assert_eq!(dice.d20(), 3);
        assert_eq!(dice.d20(), 19);
        assert_eq!(dice.d20(), 1);
        assert_eq!(fork.remaining(), 2);
    }

    #[test]
    fn forks_do_not_advance_the_parent() {
        let dice = SeededDice::new(99);
        let mut fork = dice.fork(0);
        fork.d20();
        fork.d20();
        assert_eq!(dice.rolls(), 0);

        let mut a = dice.fork(1);
        let mut b = dice.fork(1);
        let left: Vec<u32> = (0..16).map(|_| a.d20()).collect();
        let right: Vec<u32> = (0..16).map(|_| b.d20()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn averages_and_bounds() {
        let expr = DiceExpr::new(2, 6, 1);
        assert_eq!(expr.minimum(), 3);
        assert_eq!(expr.maximum(), 13);
        assert_eq!(expr.average(), 8);
        assert_eq!(DiceExpr::flat(5).average(), 5);
    }

    #[test]
    fn huge_expressions_saturate() {
        let widest = DiceExpr::new(1, u32::MAX, 0);
        assert_eq!(widest.minimum(), 1);
        assert_eq!(widest.maximum(), i32::MAX);
        assert_eq!(widest.average(), i32::MAX);

        let most = DiceExpr::new(u32::MAX, u32::MAX, i32::MAX);
        assert_eq!(most.minimum(), i32::MAX);
        assert_eq!(most.maximum(), i32::MAX);
        assert_eq!(most.average(), i32::MAX);

        let sunk = DiceExpr::new(2, 4, i32::MIN);
        assert_eq!(sunk.minimum(), i32::MIN + 2);
        assert_eq!(DiceExpr::new(0, 4, i32::MIN).maximum(), i32::MIN);
    }
}
