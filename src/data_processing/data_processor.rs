use crate::data_processing::anomaly::Anomaly;
use crate::data_processing::player_stats::PlayerStats;
use crate::data_processing::threebet_mapping::ThreebetMapping;
use crate::hand_history::hand_record::HandRecord;

use std::collections::{BTreeSet, HashMap};

/// The result of one aggregation pass.
///
/// # Fields
///
/// * `stats` - Counters keyed by player identifier.
/// * `anomalies` - Data-quality problems that were skipped over, in the order found.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub stats: HashMap<String, PlayerStats>,
    pub anomalies: Vec<Anomaly>,
}

/// Tallies per-player counters over `hands` in a single pass.
///
/// When `threebets` is supplied, a player's external count replaces the
/// count derived from `3bet` tags. Players missing from the mapping keep
/// their derived count.
///
/// # Arguments
///
/// * `hands` - Validated hand records, in input order.
/// * `threebets` - Optional externally computed three-bet counts.
///
/// # Returns
///
/// An `Aggregation` with one `PlayerStats` per player seen in any hand's `players`.
pub fn aggregate(hands: &[HandRecord], threebets: Option<&ThreebetMapping>) -> Aggregation {
    let mut aggregation = Aggregation::default();

    if hands.is_empty() {
        aggregation.anomalies.push(Anomaly::EmptyInput);
    }
    for hand in hands {
        update_stats_from_hand(hand, &mut aggregation);
    }
    if let Some(mapping) = threebets {
        merge_threebet_mapping(mapping, &mut aggregation);
    }

    for anomaly in &aggregation.anomalies {
        match anomaly {
            Anomaly::EmptyInput => log::info!("{}", anomaly),
            _ => log::warn!("{}", anomaly),
        }
    }
    log::info!(
        "aggregated {} hands into {} players",
        hands.len(),
        aggregation.stats.len()
    );

    aggregation
}

/// Updates the counters of every player in a single hand.
///
/// Qualifying actions are collected into sets first so that a player is
/// counted once per hand however many times they call or raise.
fn update_stats_from_hand(hand: &HandRecord, aggregation: &mut Aggregation) {
    for player in &hand.players {
        aggregation.stats.entry(player.clone()).or_default().hands_played += 1;
    }

    let mut vpip_players = BTreeSet::new();
    let mut pfr_players = BTreeSet::new();
    let mut threebet_players = BTreeSet::new();
    let mut unknown_actors = BTreeSet::new();

    for entry in &hand.preflop_aggression {
        let player = entry.player.as_str();
        if !hand.players.contains(player) {
            if unknown_actors.insert(player) {
                aggregation.anomalies.push(Anomaly::UnknownActor {
                    hand: hand.hand_id.clone(),
                    player: player.to_owned(),
                });
            }
            continue;
        }
        if entry.action.is_voluntary() {
            vpip_players.insert(player);
        }
        if entry.action.is_raise() {
            pfr_players.insert(player);
        }
        if entry.is_threebet() {
            threebet_players.insert(player);
        }
    }
    log::debug!(
        "hand {}: {} players, vpip {:?}, pfr {:?}, 3bet {:?}",
        hand.hand_id,
        hand.players.len(),
        vpip_players,
        pfr_players,
        threebet_players
    );

    for player in vpip_players {
        stats_of(aggregation, player).vpip_count += 1;
    }
    for player in pfr_players {
        stats_of(aggregation, player).pfr_count += 1;
    }
    for player in threebet_players {
        stats_of(aggregation, player).threebet_count += 1;
    }
}

/// The player's counters, created zeroed on first use.
fn stats_of<'a>(aggregation: &'a mut Aggregation, player: &str) -> &'a mut PlayerStats {
    aggregation.stats.entry(player.to_owned()).or_default()
}

/// Replaces derived three-bet counts with the external ones.
///
/// Entries for players never dealt a hand, or claiming more three-bets than
/// hands played, are reported and skipped.
fn merge_threebet_mapping(mapping: &ThreebetMapping, aggregation: &mut Aggregation) {
    for (player, count) in mapping.iter() {
        match aggregation.stats.get_mut(player) {
            None => aggregation.anomalies.push(Anomaly::UnknownMappingPlayer {
                player: player.to_owned(),
            }),
            Some(stats) if count > stats.hands_played => {
                aggregation.anomalies.push(Anomaly::ThreebetExceedsHands {
                    player: player.to_owned(),
                    count,
                    hands_played: stats.hands_played,
                })
            }
            Some(stats) => stats.threebet_count = count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand_history::hand_record::{Action, ActionEntry};

    fn two_hands() -> Vec<HandRecord> {
        vec![
            HandRecord::new("1", ["A", "B"])
                .with_action(ActionEntry::new("A", Action::Calls))
                .with_action(ActionEntry::new("B", Action::Raises).with_details("3bet")),
            HandRecord::new("2", ["A", "B"])
                .with_action(ActionEntry::new("A", Action::Folds))
                .with_action(ActionEntry::new("B", Action::Calls)),
        ]
    }

    fn stats(hands_played: u32, vpip_count: u32, pfr_count: u32, threebet_count: u32) -> PlayerStats {
        PlayerStats {
            hands_played,
            vpip_count,
            pfr_count,
            threebet_count,
        }
    }

    #[test]
    fn two_hand_scenario() {
        let aggregation = aggregate(&two_hands(), None);
        assert_eq!(aggregation.stats.len(), 2);
        assert_eq!(aggregation.stats["A"], stats(2, 1, 0, 0));
        assert_eq!(aggregation.stats["B"], stats(2, 2, 1, 1));
        assert!(aggregation.anomalies.is_empty());
    }

    #[test]
    fn repeated_actions_count_once_per_hand() {
        let hand = HandRecord::new("1", ["A", "B"])
            .with_action(ActionEntry::new("A", Action::Raises))
            .with_action(ActionEntry::new("B", Action::Raises).with_details("3bet"))
            .with_action(ActionEntry::new("A", Action::Raises).with_details("4bet"))
            .with_action(ActionEntry::new("B", Action::Raises).with_details("3bet again"))
            .with_action(ActionEntry::new("B", Action::Calls));
        let aggregation = aggregate(&[hand], None);
        assert_eq!(aggregation.stats["A"], stats(1, 1, 1, 0));
        assert_eq!(aggregation.stats["B"], stats(1, 1, 1, 1));
    }

    #[test]
    fn counts_never_exceed_hands_played() {
        let mut hands = two_hands();
        hands.push(
            HandRecord::new("3", ["A", "C"])
                .with_action(ActionEntry::new("C", Action::Bets))
                .with_action(ActionEntry::new("A", Action::Raises).with_details("3bet"))
                .with_action(ActionEntry::new("C", Action::Raises).with_details("4bet, 3bet line")),
        );
        let aggregation = aggregate(&hands, None);
        for stats in aggregation.stats.values() {
            assert!(stats.vpip_count <= stats.hands_played);
            assert!(stats.pfr_count <= stats.hands_played);
            assert!(stats.threebet_count <= stats.hands_played);
        }
        assert_eq!(aggregation.stats["C"], stats(1, 1, 1, 1));
    }

    #[test]
    fn folds_and_checks_are_not_voluntary() {
        let hand = HandRecord::new("1", ["A", "B"])
            .with_action(ActionEntry::new("A", Action::Checks))
            .with_action(ActionEntry::new("B", Action::Folds));
        let aggregation = aggregate(&[hand], None);
        assert_eq!(aggregation.stats["A"], stats(1, 0, 0, 0));
        assert_eq!(aggregation.stats["B"], stats(1, 0, 0, 0));
    }

    #[test]
    fn actions_by_unlisted_players_are_reported_once() {
        let hand = HandRecord::new("9", ["A"])
            .with_action(ActionEntry::new("Z", Action::Calls))
            .with_action(ActionEntry::new("Z", Action::Raises));
        let aggregation = aggregate(&[hand], None);
        assert!(!aggregation.stats.contains_key("Z"));
        assert_eq!(
            aggregation.anomalies,
            vec![Anomaly::UnknownActor {
                hand: "9".to_owned(),
                player: "Z".to_owned()
            }]
        );
    }

    #[test]
    fn empty_input_yields_empty_stats() {
        let aggregation = aggregate(&[], None);
        assert!(aggregation.stats.is_empty());
        assert_eq!(aggregation.anomalies, vec![Anomaly::EmptyInput]);
    }

    #[test]
    fn external_threebets_replace_derived_counts() {
        let mapping: ThreebetMapping = vec![("A", 2), ("B", 0)].into_iter().collect();
        let aggregation = aggregate(&two_hands(), Some(&mapping));
        assert_eq!(aggregation.stats["A"].threebet_count, 2);
        assert_eq!(aggregation.stats["B"].threebet_count, 0);
        assert!(aggregation.anomalies.is_empty());
    }

    #[test]
    fn players_missing_from_mapping_keep_derived_count() {
        let mapping: ThreebetMapping = vec![("A", 1)].into_iter().collect();
        let aggregation = aggregate(&two_hands(), Some(&mapping));
        assert_eq!(aggregation.stats["A"].threebet_count, 1);
        assert_eq!(aggregation.stats["B"].threebet_count, 1);
    }

    #[test]
    fn unusable_mapping_entries_are_ignored() {
        let mapping: ThreebetMapping = vec![("ghost", 5), ("B", 3)].into_iter().collect();
        let aggregation = aggregate(&two_hands(), Some(&mapping));
        assert!(!aggregation.stats.contains_key("ghost"));
        assert_eq!(aggregation.stats["B"].threebet_count, 1);
        assert_eq!(
            aggregation.anomalies,
            vec![
                Anomaly::ThreebetExceedsHands {
                    player: "B".to_owned(),
                    count: 3,
                    hands_played: 2
                },
                Anomaly::UnknownMappingPlayer {
                    player: "ghost".to_owned()
                },
            ]
        );
    }
}
