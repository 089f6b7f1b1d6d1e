use crate::hand_history::hand_record::{HandRecord, Street};

/// The average pot at the close of one street.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreetPot {
    pub street: Street,
    pub average_pot: f64,
    pub hands: usize,
}

/// Averages the recorded pot of every street over the hands that reached it.
///
/// Every street is listed, in play order. A street no hand reached averages 0.0.
pub fn average_pot_by_street(hands: &[HandRecord]) -> Vec<StreetPot> {
    Street::ALL
        .into_iter()
        .map(|street| {
            let pots: Vec<f64> = hands
                .iter()
                .flat_map(|hand| hand.pot_history.iter())
                .filter(|snapshot| snapshot.street == street)
                .map(|snapshot| snapshot.pot)
                .collect();
            let average_pot = if pots.is_empty() {
                0.0
            } else {
                pots.iter().fold(0.0, |total, pot| total + pot) / pots.len() as f64
            };
            StreetPot {
                street,
                average_pot,
                hands: pots.len(),
            }
        })
        .collect()
}
