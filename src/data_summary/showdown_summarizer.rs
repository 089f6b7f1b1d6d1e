use crate::data_summary::showdown_summary::{BetLevel, ShowdownAggression};
use crate::hand_history::hand_record::{ActionEntry, HandRecord, Showdown};

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Preflop wagers at or below this amount are blinds and limps, not aggression.
pub const MIN_PREFLOP_AMOUNT: f64 = 2.0;

/// Lists the preflop wagers of every player who showed both cards.
///
/// A player's wagers keep the order they were made in: the first is the
/// raise, the second the `3bet`. Rows come out by amount descending, then by
/// hand number ascending.
pub fn showdown_aggression(hands: &[HandRecord]) -> Vec<ShowdownAggression> {
    let mut rows = Vec::new();
    for hand in hands {
        for show in hand.shows.iter().filter(|show| show.shows_both_cards()) {
            let wagers = wagers_of(hand, &show.player);
            rows.extend(
                wagers
                    .into_iter()
                    .enumerate()
                    .map(|(position, entry)| row(hand, show, entry, position)),
            );
        }
    }
    rows.sort_by(compare_rows);
    rows
}

/// Splits rows by bet level, each group sorted by amount then hand number.
pub fn by_bet_level(rows: &[ShowdownAggression]) -> BTreeMap<BetLevel, Vec<ShowdownAggression>> {
    let mut levels: BTreeMap<BetLevel, Vec<ShowdownAggression>> = BTreeMap::new();
    for row in rows {
        levels.entry(row.bet_level).or_default().push(row.clone());
    }
    for group in levels.values_mut() {
        group.sort_by(compare_rows);
    }
    levels
}

/// Groups showdown wagers by player.
///
/// Unlike [`showdown_aggression`], a player's wagers in a hand are ranked by
/// amount before levels are assigned, so the biggest one is the raise.
pub fn player_aggression(hands: &[HandRecord]) -> BTreeMap<String, Vec<ShowdownAggression>> {
    let mut players: BTreeMap<String, Vec<ShowdownAggression>> = BTreeMap::new();
    for hand in hands {
        for show in hand.shows.iter().filter(|show| show.shows_both_cards()) {
            let mut wagers = wagers_of(hand, &show.player);
            wagers.sort_by(|a, b| amount_of(b).total_cmp(&amount_of(a)));
            players.entry(show.player.clone()).or_default().extend(
                wagers
                    .into_iter()
                    .enumerate()
                    .map(|(position, entry)| row(hand, show, entry, position)),
            );
        }
    }
    for rows in players.values_mut() {
        rows.sort_by(compare_rows);
    }
    players.retain(|_, rows| !rows.is_empty());
    players
}

fn wagers_of<'a>(hand: &'a HandRecord, player: &str) -> Vec<&'a ActionEntry> {
    hand.preflop_aggression
        .iter()
        .filter(|entry| entry.player == player && amount_of(entry) > MIN_PREFLOP_AMOUNT)
        .collect()
}

fn amount_of(entry: &ActionEntry) -> f64 {
    entry.amount.unwrap_or(0.0)
}

fn row(hand: &HandRecord, show: &Showdown, entry: &ActionEntry, position: usize) -> ShowdownAggression {
    ShowdownAggression {
        hand_id: hand.hand_id.clone(),
        player: show.player.clone(),
        cards: show.cards.clone(),
        amount: amount_of(entry),
        bet_level: BetLevel::from_position(position),
    }
}

fn compare_rows(a: &ShowdownAggression, b: &ShowdownAggression) -> Ordering {
    b.amount
        .total_cmp(&a.amount)
        .then_with(|| compare_hand_ids(&a.hand_id, &b.hand_id))
}

/// Numeric hand numbers compare as numbers; anything else as text, after them.
fn compare_hand_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
