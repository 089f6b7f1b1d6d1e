use std::fmt;

/// How many raises deep a preflop wager was: the first is the raise, the
/// next a `3bet`, then a `4bet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BetLevel {
    Raise,
    Bet(usize),
}

impl BetLevel {
    /// The level of the wager at `position` among a player's qualifying wagers.
    pub fn from_position(position: usize) -> Self {
        match position {
            0 => BetLevel::Raise,
            n => BetLevel::Bet(n + 2),
        }
    }
}

impl fmt::Display for BetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetLevel::Raise => f.write_str("raise"),
            BetLevel::Bet(level) => write!(f, "{}bet", level),
        }
    }
}

/// A preflop wager made by a player who later showed both hole cards.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowdownAggression {
    pub hand_id: String,
    pub player: String,
    pub cards: String,
    pub amount: f64,
    pub bet_level: BetLevel,
}
