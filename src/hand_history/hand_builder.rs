use crate::hand_history::hand_record::{
    Action, ActionEntry, Board, Collection, HandRecord, PotSnapshot, Showdown, Street,
};
use crate::hand_history::log_entry::{first_number, EntryKind, LogEntry};

use std::collections::BTreeSet;

/// A hand whose end marker has not been seen yet.
#[derive(Debug)]
struct OpenHand {
    hand_id: String,
    players: BTreeSet<String>,
    preflop_aggression: Vec<ActionEntry>,
    postflop_aggression: Vec<ActionEntry>,
    collected: Vec<Collection>,
    returned: Vec<Collection>,
    shows: Vec<Showdown>,
    board: Board,
    pot_history: Vec<PotSnapshot>,
    street: Street,
    pot: f64,
    raises: usize,
}

impl OpenHand {
    fn new(hand_id: String) -> Self {
        OpenHand {
            hand_id,
            players: BTreeSet::new(),
            preflop_aggression: Vec::new(),
            postflop_aggression: Vec::new(),
            collected: Vec::new(),
            returned: Vec::new(),
            shows: Vec::new(),
            board: Board::default(),
            pot_history: Vec::new(),
            street: Street::Preflop,
            pot: 0.0,
            raises: 0,
        }
    }

    fn close(mut self) -> Option<HandRecord> {
        if self.players.is_empty() {
            log::debug!("dropping hand {} with no seated players", self.hand_id);
            return None;
        }
        self.pot_history.push(PotSnapshot {
            street: self.street,
            pot: self.pot,
        });
        Some(HandRecord {
            hand_id: self.hand_id,
            players: self.players,
            preflop_aggression: self.preflop_aggression,
            postflop_aggression: self.postflop_aggression,
            collected: self.collected,
            returned: self.returned,
            shows: self.shows,
            board: self.board,
            pot_history: self.pot_history,
        })
    }

    fn apply(&mut self, entry: &LogEntry) {
        if let Some(street) = entry.street() {
            self.open_street(street, entry.dealt_cards());
            return;
        }
        if let Some((player, amount)) = entry.returned_bet() {
            self.returned.push(Collection { player, amount });
            return;
        }

        let Some(name) = entry.has_player_identity().then(|| entry.player_name()).flatten() else {
            return;
        };
        self.players.insert(name.clone());

        match &entry.kind {
            EntryKind::Calls => self.record(name, Action::Calls, first_number(&entry.details), &entry.details),
            EntryKind::Bets => self.record(name, Action::Bets, first_number(&entry.details), &entry.details),
            EntryKind::Folds => self.record(name, Action::Folds, None, &entry.details),
            EntryKind::Checks => self.record(name, Action::Checks, None, &entry.details),
            EntryKind::Other => {
                if let Some(amount) = entry.raise_amount() {
                    self.record(name, Action::Raises, Some(amount), &entry.details);
                } else if let Some(amount) = entry.posted_amount() {
                    self.pot += amount;
                }
            }
            EntryKind::Shows => {
                if let Some(cards) = entry.shown_cards() {
                    self.shows.push(Showdown { player: name, cards });
                }
            }
            EntryKind::Collected(amount) => self.collected.push(Collection {
                player: name,
                amount: *amount,
            }),
            _ => {}
        }
    }

    /// Closes the current street's pot and deals the new street's cards.
    fn open_street(&mut self, street: Street, cards: Vec<String>) {
        self.pot_history.push(PotSnapshot {
            street: self.street,
            pot: self.pot,
        });
        self.street = street;
        match street {
            Street::Flop => self.board.flop = cards,
            Street::Turn => self.board.turn = cards,
            Street::River => self.board.river = cards,
            Street::Preflop => {}
        }
    }

    /// Records an action on the current street.
    ///
    /// Preflop re-raises are tagged with their bet level: the second raise of
    /// the hand is a `3bet`, the third a `4bet`.
    fn record(&mut self, player: String, action: Action, amount: Option<f64>, details: &str) {
        self.pot += amount.unwrap_or(0.0);
        let mut details = details.to_owned();
        if self.street == Street::Preflop && action.is_raise() {
            self.raises += 1;
            if self.raises >= 2 {
                details = format!("{}bet: {}", self.raises + 1, details);
            }
        }
        let entry = ActionEntry {
            player,
            action,
            amount,
            details: Some(details),
        };
        match self.street {
            Street::Preflop => self.preflop_aggression.push(entry),
            _ => self.postflop_aggression.push(entry),
        }
    }
}

/// Reconstructs hand records from log lines sorted by order.
///
/// Lines outside a start/end marker pair are ignored. A hand still open when
/// the log ends is closed as if its end marker had been seen.
pub fn build_hands(entries: &[LogEntry]) -> Vec<HandRecord> {
    let mut hands = Vec::new();
    let mut current: Option<OpenHand> = None;

    for entry in entries {
        match &entry.kind {
            EntryKind::HandStart(number) => {
                if let Some(hand) = current.take().and_then(OpenHand::close) {
                    hands.push(hand);
                }
                let hand_id = number.clone().unwrap_or_else(|| format!("@{}", entry.order));
                current = Some(OpenHand::new(hand_id));
            }
            EntryKind::HandEnd(_) => {
                if let Some(hand) = current.take().and_then(OpenHand::close) {
                    hands.push(hand);
                }
            }
            _ => match current.as_mut() {
                Some(hand) => hand.apply(entry),
                None => log::debug!(
                    "skipping line {} ({}) outside any hand",
                    entry.order,
                    entry.at.as_deref().unwrap_or("-")
                ),
            },
        }
    }
    if let Some(hand) = current.and_then(OpenHand::close) {
        hands.push(hand);
    }

    log::info!("rebuilt {} hands from {} log lines", hands.len(), entries.len());
    hands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(lines: &[&str]) -> Vec<LogEntry> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| LogEntry::parse(line, None, i as i64))
            .collect()
    }

    fn full_hand() -> HandRecord {
        let hands = build_hands(&log(&[
            "-- starting hand #7 (id: a) --",
            "\"ann @ 1\" posts a small blind of 10",
            "\"bo @ 2\" posts a big blind of 20",
            "\"cy @ 3\" calls 20",
            "\"ann @ 1\" raises to 60",
            "\"bo @ 2\" raises to 180",
            "\"cy @ 3\" folds",
            "\"ann @ 1\" calls 180",
            "Flop:  [7♦, 2♣, K♠]",
            "\"ann @ 1\" bets 100",
            "\"bo @ 2\" raises to 300",
            "\"ann @ 1\" calls 300",
            "Turn: 7♦, 2♣, K♠ [3♥]",
            "\"ann @ 1\" checks",
            "\"bo @ 2\" checks",
            "\"ann @ 1\" shows a A♠, K♥.",
            "\"bo @ 2\" shows a 7♣, 7♥.",
            "\"bo @ 2\" collected 980 from pot",
            "-- ending hand #7 --",
        ]));
        assert_eq!(hands.len(), 1);
        hands.into_iter().next().unwrap()
    }

    #[test]
    fn rebuilds_a_hand_with_preflop_actions() {
        let hand = full_hand();
        assert_eq!(hand.hand_id, "7");
        assert_eq!(
            hand.players.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["ann", "bo", "cy"]
        );
        let actions: Vec<_> = hand
            .preflop_aggression
            .iter()
            .map(|entry| (entry.player.as_str(), entry.action, entry.amount))
            .collect();
        assert_eq!(
            actions,
            vec![
                ("cy", Action::Calls, Some(20.0)),
                ("ann", Action::Raises, Some(60.0)),
                ("bo", Action::Raises, Some(180.0)),
                ("cy", Action::Folds, None),
                ("ann", Action::Calls, Some(180.0)),
            ]
        );
        assert!(!hand.preflop_aggression[1].is_threebet());
        assert!(hand.preflop_aggression[2].is_threebet());
        assert_eq!(
            hand.collected,
            vec![Collection {
                player: "bo".to_owned(),
                amount: 980.0
            }]
        );
    }

    #[test]
    fn later_streets_go_to_postflop_aggression_untagged() {
        let hand = full_hand();
        let actions: Vec<_> = hand
            .postflop_aggression
            .iter()
            .map(|entry| (entry.player.as_str(), entry.action, entry.amount))
            .collect();
        assert_eq!(
            actions,
            vec![
                ("ann", Action::Bets, Some(100.0)),
                ("bo", Action::Raises, Some(300.0)),
                ("ann", Action::Calls, Some(300.0)),
                ("ann", Action::Checks, None),
                ("bo", Action::Checks, None),
            ]
        );
        assert!(hand.postflop_aggression.iter().all(|entry| !entry.is_threebet()));
    }

    #[test]
    fn board_shows_and_pot_history_are_kept() {
        let hand = full_hand();
        assert_eq!(hand.board.flop, vec!["7♦", "2♣", "K♠"]);
        assert_eq!(hand.board.turn, vec!["3♥"]);
        assert!(hand.board.river.is_empty());
        assert_eq!(
            hand.shows,
            vec![
                Showdown { player: "ann".to_owned(), cards: "A♠, K♥".to_owned() },
                Showdown { player: "bo".to_owned(), cards: "7♣, 7♥".to_owned() },
            ]
        );
        // blinds 30, preflop 20 + 60 + 180 + 180, flop 100 + 300 + 300
        assert_eq!(
            hand.pot_history,
            vec![
                PotSnapshot { street: Street::Preflop, pot: 470.0 },
                PotSnapshot { street: Street::Flop, pot: 1170.0 },
                PotSnapshot { street: Street::Turn, pot: 1170.0 },
            ]
        );
    }

    #[test]
    fn uncalled_bets_are_returned() {
        let hands = build_hands(&log(&[
            "-- starting hand #8 --",
            "\"ann @ 1\" bets 500",
            "\"bo @ 2\" folds",
            "Uncalled bet of 500 returned to \"ann @ 1\"",
            "\"ann @ 1\" collected 40 from pot",
        ]));
        assert_eq!(
            hands[0].returned,
            vec![Collection {
                player: "ann".to_owned(),
                amount: 500.0
            }]
        );
    }

    #[test]
    fn unterminated_hand_is_closed_at_end_of_log() {
        let hands = build_hands(&log(&[
            "-- starting hand #1 --",
            "\"ann @ 1\" calls 20",
            "-- starting hand #2 --",
            "\"bo @ 2\" checks",
        ]));
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[1].hand_id, "2");
        assert_eq!(hands[1].preflop_aggression[0].action, Action::Checks);
        assert_eq!(hands[0].final_pot(), Some(20.0));
    }

    #[test]
    fn lines_outside_hands_are_skipped() {
        let hands = build_hands(&log(&[
            "\"ann @ 1\" calls 20",
            "-- starting hand #3 --",
            "\"bo @ 2\" folds",
            "-- ending hand #3 --",
            "\"cy @ 3\" quits the game",
        ]));
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].players.len(), 1);
        assert!(hands[0].players.contains("bo"));
    }

    #[test]
    fn hands_without_players_are_dropped() {
        let hands = build_hands(&log(&["-- starting hand #4 --", "-- ending hand #4 --"]));
        assert!(hands.is_empty());
    }

    #[test]
    fn unnumbered_hands_use_their_log_position() {
        let hands = build_hands(&log(&["-- starting hand --", "\"ann @ 1\" folds"]));
        assert_eq!(hands[0].hand_id, "@0");
    }
}
