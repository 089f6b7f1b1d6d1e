use crate::data_summary::hand_net_summary::HandNet;
use crate::data_summary::player_stats_summary::PlayerStatsSummary;
use crate::data_summary::pot_summarizer::StreetPot;
use crate::data_summary::showdown_summary::ShowdownAggression;
use crate::file_creation::file_creation_error::FileCreationError;

use csv::Writer;
use std::fs::{self, File};
use std::path::Path;

const STATS_HEADERS: [&str; 8] = [
    "Player",
    "Hands Played",
    "VPIP",
    "VPIP %",
    "Preflop Raise",
    "Preflop Raise %",
    "Threebet",
    "Threebet %",
];

const NET_HEADERS: [&str; 10] = [
    "Hand Number",
    "My Cards",
    "Flop",
    "Turn",
    "River",
    "Invested",
    "Collected",
    "Net",
    "Pot Size",
    "Opponent",
];

const SHOWS_HEADERS: [&str; 5] = ["Hand Number", "Player", "Show Details", "Preflop Amount", "Bet Level"];

const PLAYER_AGGRESSION_HEADERS: [&str; 4] = ["Hand Number", "Show Details", "Preflop Amount", "Bet Level"];

const POT_HEADERS: [&str; 3] = ["Stage", "Average Pot", "Hands"];

/// Writes the player statistics table as CSV.
///
/// The header row is written even when there are no players. Percentages are
/// rendered out of 100 with two decimals.
///
/// # Arguments
///
/// * `path` - Destination file. Missing parent directories are created.
/// * `summaries` - Rows, already in output order.
pub fn create_stats_csv(path: &Path, summaries: &[PlayerStatsSummary]) -> Result<(), FileCreationError> {
    let rows = summaries.iter().map(|summary| {
        vec![
            summary.player.clone(),
            summary.hands_played.to_string(),
            summary.vpip_count.to_string(),
            percentage(summary.vpip_pct),
            summary.pfr_count.to_string(),
            percentage(summary.pfr_pct),
            summary.threebet_count.to_string(),
            percentage(summary.threebet_pct),
        ]
    });
    write_table(path, &STATS_HEADERS, rows)?;
    log::info!("wrote {} player rows to {}", summaries.len(), path.display());
    Ok(())
}

/// Writes per-hand net results as CSV, board cards joined by commas.
pub fn create_net_csv(path: &Path, nets: &[HandNet]) -> Result<(), FileCreationError> {
    let rows = nets.iter().map(|hand| {
        vec![
            hand.hand_id.clone(),
            hand.cards.clone(),
            hand.flop.join(", "),
            hand.turn.join(", "),
            hand.river.join(", "),
            chips(hand.invested),
            chips(hand.collected),
            chips(hand.net),
            hand.pot_size.map(chips).unwrap_or_default(),
            hand.opponents.clone(),
        ]
    });
    write_table(path, &NET_HEADERS, rows)?;
    log::info!("wrote {} hands to {}", nets.len(), path.display());
    Ok(())
}

/// Writes showdown wagers as CSV.
///
/// With `separate_hands`, a blank row is inserted wherever the hand number
/// changes from one row to the next.
pub fn create_shows_csv(
    path: &Path,
    rows: &[ShowdownAggression],
    separate_hands: bool,
) -> Result<(), FileCreationError> {
    let mut table = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if separate_hands && i > 0 && rows[i - 1].hand_id != row.hand_id {
            table.push(vec![String::new(); SHOWS_HEADERS.len()]);
        }
        table.push(vec![
            row.hand_id.clone(),
            row.player.clone(),
            row.cards.clone(),
            chips(row.amount),
            row.bet_level.to_string(),
        ]);
    }
    write_table(path, &SHOWS_HEADERS, table)?;
    log::info!("wrote {} showdown wagers to {}", rows.len(), path.display());
    Ok(())
}

/// Writes one player's showdown wagers as CSV.
pub fn create_player_aggression_csv(path: &Path, rows: &[ShowdownAggression]) -> Result<(), FileCreationError> {
    let table = rows.iter().map(|row| {
        vec![
            row.hand_id.clone(),
            row.cards.clone(),
            chips(row.amount),
            row.bet_level.to_string(),
        ]
    });
    write_table(path, &PLAYER_AGGRESSION_HEADERS, table)?;
    log::debug!("wrote {} wagers to {}", rows.len(), path.display());
    Ok(())
}

/// Writes the average pot of each street as CSV.
pub fn create_pot_csv(path: &Path, pots: &[StreetPot]) -> Result<(), FileCreationError> {
    let rows = pots.iter().map(|pot| {
        vec![
            pot.street.to_string(),
            chips(pot.average_pot),
            pot.hands.to_string(),
        ]
    });
    write_table(path, &POT_HEADERS, rows)?;
    log::info!("wrote average pots to {}", path.display());
    Ok(())
}

fn percentage(fraction: f64) -> String {
    format!("{:.2}", fraction * 100.0)
}

fn chips(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Writes `headers` then every row to `path`, replacing any existing file.
fn write_table<I>(path: &Path, headers: &[&str], rows: I) -> Result<(), FileCreationError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = open_writer(path)?;
    let write_error = |source| FileCreationError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    writer.write_record(headers).map_err(write_error)?;
    for row in rows {
        writer.write_record(&row).map_err(write_error)?;
    }
    close_writer(path, writer)
}

/// Opens a CSV writer on `path`, creating its parent directories first.
fn open_writer(path: &Path) -> Result<Writer<File>, FileCreationError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| FileCreationError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Writer::from_path(path).map_err(|source| FileCreationError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Flushes buffered rows; a failure here means the file is incomplete.
fn close_writer(path: &Path, mut writer: Writer<File>) -> Result<(), FileCreationError> {
    writer.flush().map_err(|source| FileCreationError::Flush {
        path: path.to_path_buf(),
        source,
    })
}
