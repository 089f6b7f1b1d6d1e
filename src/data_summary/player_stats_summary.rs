/// Summary of a player's preflop statistics.
///
/// # Fields
///
/// * `player` - The player identifier.
/// * `hands_played` - Hands the player was dealt into.
/// * `vpip_count`, `pfr_count`, `threebet_count` - Hands in which the player
///   voluntarily put money in, raised, or three-bet preflop.
/// * `vpip_pct`, `pfr_pct`, `threebet_pct` - The counts over `hands_played`, as
///   fractions in `[0, 1]`. All are `0.0` when `hands_played` is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatsSummary {
    pub player: String,
    pub hands_played: u32,
    pub vpip_count: u32,
    pub vpip_pct: f64,
    pub pfr_count: u32,
    pub pfr_pct: f64,
    pub threebet_count: u32,
    pub threebet_pct: f64,
}
