/// Per-player counters accumulated over a pass of hand records.
///
/// # Fields
///
/// * `hands_played` - Hands the player was dealt into.
/// * `vpip_count` - Hands with at least one voluntary preflop call, bet or raise.
/// * `pfr_count` - Hands with at least one preflop raise.
/// * `threebet_count` - Hands with a preflop action tagged `3bet`.
///
/// Each of the last three counts a hand at most once, so none exceeds `hands_played`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    pub(crate) hands_played: u32,
    pub(crate) vpip_count: u32,
    pub(crate) pfr_count: u32,
    pub(crate) threebet_count: u32,
}
