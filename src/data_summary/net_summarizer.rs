use crate::data_summary::hand_net_summary::HandNet;
use crate::hand_history::hand_record::{Collection, HandRecord};

/// Computes the player's net result in every hand they were dealt into.
///
/// Players are matched case-insensitively. Invested chips are the amounts on
/// the player's actions across all streets, less uncalled bets returned to them.
pub fn net_results(hands: &[HandRecord], player: &str) -> Vec<HandNet> {
    let wanted = player.trim().to_lowercase();
    let is_player = |name: &str| name.trim().to_lowercase() == wanted;

    hands
        .iter()
        .filter(|hand| hand.players.iter().any(|name| is_player(name)))
        .map(|hand| {
            let wagered = hand
                .all_actions()
                .filter(|entry| is_player(&entry.player))
                .filter_map(|entry| entry.amount)
                .fold(0.0, |total, amount| total + amount);
            let invested = wagered - total_for(&hand.returned, &is_player);
            let collected = total_for(&hand.collected, &is_player);

            let cards = hand
                .shows
                .iter()
                .find(|show| is_player(&show.player))
                .map(|show| show.cards.clone())
                .unwrap_or_default();
            let opponents = hand
                .shows
                .iter()
                .filter(|show| !is_player(&show.player))
                .map(|show| format!("{}: {}", show.player, show.cards))
                .collect::<Vec<_>>()
                .join(", ");

            HandNet {
                hand_id: hand.hand_id.clone(),
                cards,
                flop: hand.board.flop.clone(),
                turn: hand.board.turn.clone(),
                river: hand.board.river.clone(),
                invested,
                collected,
                net: collected - invested,
                pot_size: hand.final_pot(),
                opponents,
            }
        })
        .collect()
}

fn total_for(collections: &[Collection], is_player: &impl Fn(&str) -> bool) -> f64 {
    collections
        .iter()
        .filter(|collection| is_player(&collection.player))
        .fold(0.0, |total, collection| total + collection.amount)
}

/// The `n` biggest wins, largest first.
pub fn top_wins(nets: &[HandNet], n: usize) -> Vec<HandNet> {
    let mut wins: Vec<_> = nets.iter().filter(|hand| hand.net > 0.0).cloned().collect();
    wins.sort_by(|a, b| b.net.total_cmp(&a.net).then_with(|| a.hand_id.cmp(&b.hand_id)));
    wins.truncate(n);
    wins
}

/// The `n` biggest losses, largest first.
pub fn top_losses(nets: &[HandNet], n: usize) -> Vec<HandNet> {
    let mut losses: Vec<_> = nets.iter().filter(|hand| hand.net < 0.0).cloned().collect();
    losses.sort_by(|a, b| a.net.total_cmp(&b.net).then_with(|| a.hand_id.cmp(&b.hand_id)));
    losses.truncate(n);
    losses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand_history::hand_record::{Action, ActionEntry, PotSnapshot, Street};

    fn hands() -> Vec<HandRecord> {
        vec![
            HandRecord::new("1", ["ann", "bo"])
                .with_action(ActionEntry::new("ann", Action::Raises).with_amount(60.0))
                .with_action(ActionEntry::new("bo", Action::Calls).with_amount(60.0))
                .with_collection("ann", 120.0),
            HandRecord::new("2", ["ann", "bo"])
                .with_action(ActionEntry::new("ann", Action::Calls).with_amount(20.0))
                .with_action(ActionEntry::new("bo", Action::Folds))
                .with_collection("bo", 20.0),
            HandRecord::new("3", ["bo", "cy"]).with_action(ActionEntry::new("cy", Action::Calls)),
            HandRecord::new("4", ["Ann", "cy"]).with_action(ActionEntry::new("Ann", Action::Checks)),
        ]
    }

    fn net(hand_id: &str, net: f64) -> HandNet {
        HandNet {
            hand_id: hand_id.to_owned(),
            net,
            ..HandNet::default()
        }
    }

    #[test]
    fn nets_cover_every_hand_played() {
        let nets = net_results(&hands(), "ann");
        let ids: Vec<_> = nets.iter().map(|hand| hand.hand_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
        assert_eq!(nets[0].net, 60.0);
        assert_eq!(nets[1].invested, 20.0);
        assert_eq!(nets[1].net, -20.0);
        assert_eq!(nets[2].net, 0.0);
    }

    #[test]
    fn postflop_bets_count_as_invested() {
        let hand = HandRecord::new("5", ["ann", "bo"])
            .with_action(ActionEntry::new("ann", Action::Calls).with_amount(20.0))
            .with_action(ActionEntry::new("bo", Action::Checks))
            .with_postflop_action(ActionEntry::new("ann", Action::Bets).with_amount(500.0))
            .with_postflop_action(ActionEntry::new("bo", Action::Calls).with_amount(500.0))
            .with_collection("bo", 1040.0);
        let nets = net_results(&[hand], "ann");
        assert_eq!(nets[0].invested, 520.0);
        assert_eq!(nets[0].collected, 0.0);
        assert_eq!(nets[0].net, -520.0);
    }

    #[test]
    fn returned_bets_are_not_invested() {
        let hand = HandRecord::new("6", ["ann", "bo"])
            .with_action(ActionEntry::new("ann", Action::Bets).with_amount(500.0))
            .with_action(ActionEntry::new("bo", Action::Folds))
            .with_returned("ann", 480.0)
            .with_collection("ann", 40.0);
        let nets = net_results(&[hand], "ann");
        assert_eq!(nets[0].invested, 20.0);
        assert_eq!(nets[0].net, 20.0);
    }

    #[test]
    fn hands_without_activity_net_positive_zero() {
        let nets = net_results(&[HandRecord::new("7", ["ann"])], "ann");
        assert_eq!(nets[0].net, 0.0);
        assert!(nets[0].net.is_sign_positive());
        assert!(nets[0].invested.is_sign_positive());
        assert!(nets[0].collected.is_sign_positive());
    }

    #[test]
    fn cards_board_pot_and_opponents_are_reported() {
        let mut hand = HandRecord::new("8", ["ann", "bo", "cy"])
            .with_show("bo", "7♣, 7♥")
            .with_show("ann", "A♠, K♥")
            .with_show("cy", "Q♦, J♦");
        hand.board.flop = vec!["7♦".into(), "2♣".into(), "K♠".into()];
        hand.pot_history = vec![
            PotSnapshot { street: Street::Preflop, pot: 60.0 },
            PotSnapshot { street: Street::Flop, pot: 260.0 },
        ];
        let nets = net_results(&[hand], "ANN");
        assert_eq!(nets[0].cards, "A♠, K♥");
        assert_eq!(nets[0].flop.len(), 3);
        assert!(nets[0].turn.is_empty());
        assert_eq!(nets[0].pot_size, Some(260.0));
        assert_eq!(nets[0].opponents, "bo: 7♣, 7♥, cy: Q♦, J♦");
    }

    #[test]
    fn wins_and_losses_are_ranked() {
        let nets = vec![net("a", 5.0), net("b", 50.0), net("c", -30.0), net("d", -3.0), net("e", 0.0)];
        let wins: Vec<_> = top_wins(&nets, 1).into_iter().map(|hand| hand.hand_id).collect();
        assert_eq!(wins, vec!["b"]);
        let losses: Vec<_> = top_losses(&nets, 10).into_iter().map(|hand| hand.hand_id).collect();
        assert_eq!(losses, vec!["c", "d"]);
    }
}
