use crate::data_processing::player_stats::PlayerStats;
use crate::data_summary::player_stats_summary::PlayerStatsSummary;

use clap::ValueEnum;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Ready-made orderings for the statistics table.
///
/// Every ordering breaks ties by player identifier, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Highest VPIP % first.
    Vpip,
    /// Most hands played first.
    Hands,
    /// Player identifier, ascending.
    Player,
    /// Highest PFR % first.
    Pfr,
    /// Highest three-bet % first.
    Threebet,
}

impl SortKey {
    /// Orders two rows by this key, falling back to player name ascending on ties.
    pub fn compare(self, a: &PlayerStatsSummary, b: &PlayerStatsSummary) -> Ordering {
        let primary = match self {
            SortKey::Vpip => b.vpip_pct.total_cmp(&a.vpip_pct),
            SortKey::Hands => b.hands_played.cmp(&a.hands_played),
            SortKey::Player => Ordering::Equal,
            SortKey::Pfr => b.pfr_pct.total_cmp(&a.pfr_pct),
            SortKey::Threebet => b.threebet_pct.total_cmp(&a.threebet_pct),
        };
        primary.then_with(|| a.player.cmp(&b.player))
    }
}

/// Computes percentages for every player and orders the rows.
///
/// # Arguments
///
/// * `stats` - The per-player counters from an aggregation pass.
/// * `compare` - The row ordering, supplied by the caller.
///
/// # Returns
///
/// One `PlayerStatsSummary` per player, sorted by `compare`.
pub fn summarize<F>(stats: HashMap<String, PlayerStats>, mut compare: F) -> Vec<PlayerStatsSummary>
where
    F: FnMut(&PlayerStatsSummary, &PlayerStatsSummary) -> Ordering,
{
    let mut summaries: Vec<_> = stats
        .into_iter()
        .map(|(player, stats)| summarize_player(player, stats))
        .collect();
    summaries.sort_by(|a, b| compare(a, b));
    summaries
}

/// Turns one player's counters into a row, adding the three percentages.
fn summarize_player(player: String, stats: PlayerStats) -> PlayerStatsSummary {
    PlayerStatsSummary {
        player,
        hands_played: stats.hands_played,
        vpip_count: stats.vpip_count,
        vpip_pct: ratio(stats.vpip_count, stats.hands_played),
        pfr_count: stats.pfr_count,
        pfr_pct: ratio(stats.pfr_count, stats.hands_played),
        threebet_count: stats.threebet_count,
        threebet_pct: ratio(stats.threebet_count, stats.hands_played),
    }
}

/// `count / hands`, or `0.0` when no hands were played.
fn ratio(count: u32, hands: u32) -> f64 {
    if hands == 0 {
        return 0.0;
    }
    count as f64 / hands as f64
}

/// Keeps the rows of the named player, compared case-insensitively.
pub fn filter_player(summaries: Vec<PlayerStatsSummary>, player: &str) -> Vec<PlayerStatsSummary> {
    let wanted = player.trim().to_lowercase();
    summaries
        .into_iter()
        .filter(|summary| summary.player.to_lowercase() == wanted)
        .collect()
}
