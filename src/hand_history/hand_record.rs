use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

lazy_static::lazy_static! {
    static ref THREEBET_TAG: Regex = Regex::new(r"(?i)\b3bet\b").expect("valid three-bet pattern");
}

/// An action as recorded in a hand history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Calls,
    Bets,
    Raises,
    Folds,
    Checks,
}

impl Action {
    /// Whether the action puts money in the pot voluntarily (VPIP).
    pub fn is_voluntary(self) -> bool {
        matches!(self, Action::Calls | Action::Bets | Action::Raises)
    }

    /// Whether the action counts as a preflop raise (PFR).
    ///
    /// Preflop the blinds are already in, so a bet is an open raise.
    pub fn is_raise(self) -> bool {
        matches!(self, Action::Bets | Action::Raises)
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calls" => Ok(Action::Calls),
            "bets" => Ok(Action::Bets),
            "raises" => Ok(Action::Raises),
            "folds" => Ok(Action::Folds),
            "checks" => Ok(Action::Checks),
            _ => Err(()),
        }
    }
}

/// A betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub fn name(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl FromStr for Street {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Street::ALL
            .into_iter()
            .find(|street| street.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single action taken by a player.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEntry {
    pub player: String,
    pub action: Action,
    pub amount: Option<f64>,
    pub details: Option<String>,
}

impl ActionEntry {
    /// Whether the action carries the `3bet` detail tag, as a whole word.
    pub fn is_threebet(&self) -> bool {
        self.details
            .as_deref()
            .map_or(false, |details| THREEBET_TAG.is_match(details))
    }
}

#[cfg(test)]
impl ActionEntry {
    pub fn new(player: &str, action: Action) -> Self {
        ActionEntry {
            player: player.to_owned(),
            action,
            amount: None,
            details: None,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_owned());
        self
    }
}

/// Chips a player collected from the pot at the end of a hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub player: String,
    pub amount: f64,
}

/// Cards a player turned over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Showdown {
    pub player: String,
    pub cards: String,
}

impl Showdown {
    /// Whether both hole cards were shown, not just one.
    pub fn shows_both_cards(&self) -> bool {
        self.cards.contains(',')
    }
}

/// Community cards dealt on each street.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub flop: Vec<String>,
    pub turn: Vec<String>,
    pub river: Vec<String>,
}

/// The pot total when a street closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotSnapshot {
    pub street: Street,
    pub pot: f64,
}

/// A validated hand record.
///
/// # Fields
///
/// * `hand_id` - Opaque identifier, unique per hand.
/// * `players` - Every player dealt into the hand, each once.
/// * `preflop_aggression` - Preflop actions in the order they were taken.
/// * `postflop_aggression` - Actions on the flop, turn and river, in order.
///   They never count toward VPIP, PFR or three-bets.
/// * `collected` - Pot collections.
/// * `returned` - Uncalled bets handed back to the player who made them.
/// * `shows` - Cards turned over at showdown.
/// * `board` - Community cards.
/// * `pot_history` - Pot total at the close of each street reached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandRecord {
    pub hand_id: String,
    pub players: BTreeSet<String>,
    pub preflop_aggression: Vec<ActionEntry>,
    pub postflop_aggression: Vec<ActionEntry>,
    pub collected: Vec<Collection>,
    pub returned: Vec<Collection>,
    pub shows: Vec<Showdown>,
    pub board: Board,
    pub pot_history: Vec<PotSnapshot>,
}

impl HandRecord {
    /// Every recorded action of the hand, preflop first.
    pub fn all_actions(&self) -> impl Iterator<Item = &ActionEntry> {
        self.preflop_aggression
            .iter()
            .chain(self.postflop_aggression.iter())
    }

    /// The pot at the last recorded street close.
    pub fn final_pot(&self) -> Option<f64> {
        self.pot_history.last().map(|snapshot| snapshot.pot)
    }
}

#[cfg(test)]
impl HandRecord {
    pub fn new<'a>(hand_id: &str, players: impl IntoIterator<Item = &'a str>) -> Self {
        HandRecord {
            hand_id: hand_id.to_owned(),
            players: players.into_iter().map(str::to_owned).collect(),
            ..HandRecord::default()
        }
    }

    pub fn with_action(mut self, entry: ActionEntry) -> Self {
        self.preflop_aggression.push(entry);
        self
    }

    pub fn with_postflop_action(mut self, entry: ActionEntry) -> Self {
        self.postflop_aggression.push(entry);
        self
    }

    pub fn with_collection(mut self, player: &str, amount: f64) -> Self {
        self.collected.push(Collection {
            player: player.to_owned(),
            amount,
        });
        self
    }

    pub fn with_returned(mut self, player: &str, amount: f64) -> Self {
        self.returned.push(Collection {
            player: player.to_owned(),
            amount,
        });
        self
    }

    pub fn with_show(mut self, player: &str, cards: &str) -> Self {
        self.shows.push(Showdown {
            player: player.to_owned(),
            cards: cards.to_owned(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_words_are_case_insensitive() {
        assert_eq!("Raises".parse::<Action>(), Ok(Action::Raises));
        assert_eq!(" calls ".parse::<Action>(), Ok(Action::Calls));
        assert!("limps".parse::<Action>().is_err());
    }

    #[test]
    fn voluntary_and_raise_classification() {
        assert!(Action::Calls.is_voluntary());
        assert!(!Action::Calls.is_raise());
        assert!(Action::Bets.is_raise());
        assert!(Action::Raises.is_raise());
        assert!(!Action::Folds.is_voluntary());
        assert!(!Action::Checks.is_voluntary());
    }

    #[test]
    fn threebet_tag_is_matched_as_a_word() {
        let entry = ActionEntry::new("b", Action::Raises).with_details("squeeze 3Bet to 60");
        assert!(entry.is_threebet());
        assert!(ActionEntry::new("b", Action::Raises).with_details("3bet: raises to 90").is_threebet());
        assert!(!ActionEntry::new("b", Action::Raises).is_threebet());
    }

    #[test]
    fn higher_bet_levels_are_not_threebets() {
        for details in ["13bet: raises to 900", "23bet", "4bet: raises to 400"] {
            let entry = ActionEntry::new("a", Action::Raises).with_details(details);
            assert!(!entry.is_threebet(), "{} matched", details);
        }
    }

    #[test]
    fn streets_parse_by_name() {
        assert_eq!("Turn".parse::<Street>(), Ok(Street::Turn));
        assert!("showdown".parse::<Street>().is_err());
        assert_eq!(Street::River.to_string(), "river");
    }

    #[test]
    fn final_pot_is_the_last_snapshot() {
        let mut hand = HandRecord::new("1", ["a"]);
        assert_eq!(hand.final_pot(), None);
        hand.pot_history = vec![
            PotSnapshot { street: Street::Preflop, pot: 30.0 },
            PotSnapshot { street: Street::Flop, pot: 90.0 },
        ];
        assert_eq!(hand.final_pot(), Some(90.0));
    }

    #[test]
    fn all_actions_spans_every_street() {
        let hand = HandRecord::new("1", ["a"])
            .with_action(ActionEntry::new("a", Action::Calls))
            .with_postflop_action(ActionEntry::new("a", Action::Bets));
        let actions: Vec<_> = hand.all_actions().map(|entry| entry.action).collect();
        assert_eq!(actions, vec![Action::Calls, Action::Bets]);
    }
}
