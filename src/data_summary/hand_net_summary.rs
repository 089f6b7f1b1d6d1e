/// A player's result in one hand.
///
/// # Fields
///
/// * `hand_id` - The hand the result belongs to.
/// * `cards` - The player's hole cards when they showed them, empty otherwise.
/// * `flop`, `turn`, `river` - The board dealt on each street.
/// * `invested` - Sum of the amounts of the player's actions on every street,
///   less any uncalled bet returned to them.
/// * `collected` - Sum of what the player collected from the pot.
/// * `net` - `collected - invested`.
/// * `pot_size` - The pot at the last street the hand reached.
/// * `opponents` - Other players who showed, as `name: cards`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandNet {
    pub hand_id: String,
    pub cards: String,
    pub flop: Vec<String>,
    pub turn: Vec<String>,
    pub river: Vec<String>,
    pub invested: f64,
    pub collected: f64,
    pub net: f64,
    pub pot_size: Option<f64>,
    pub opponents: String,
}
