use crate::hand_history::hand_record::Street;
use crate::stats_error::StatsError;

use regex::{Regex, RegexSet};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

lazy_static::lazy_static! {
    static ref HAND_START: Regex = Regex::new(r"(?i)^-- starting hand\b(?:\s*#(\d+))?").expect("valid regex");
    static ref HAND_END: Regex = Regex::new(r"(?i)^-- ending hand\b(?:\s*#(\d+))?").expect("valid regex");
    static ref QUOTED_ACTOR: Regex = Regex::new(r#"^"([^"]+)"\s*(.*)$"#).expect("valid regex");
    static ref NUMBER: Regex = Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid regex");
    static ref SHOWS: Regex = Regex::new(r"(?i)^shows\b(?:\s+a\s)?\s*(.*?)\.?\s*$").expect("valid regex");
    static ref COLLECTED: Regex =
        Regex::new(r"(?i)^collected\s+(\d[\d,]*(?:\.\d+)?)\s+from pot").expect("valid regex");
    static ref RAISES_TO: Regex = Regex::new(r"(?i)\braises to\s+(\d[\d,]*(?:\.\d+)?)").expect("valid regex");
    static ref POSTS: Regex = Regex::new(r"(?i)^posts\b.*?(\d[\d,]*(?:\.\d+)?)").expect("valid regex");
    static ref STREET_MARKER: Regex = Regex::new(r"(?i)^(flop|turn|river)\b").expect("valid regex");
    static ref DEALT_CARDS: Regex = Regex::new(r"\[([^\]]*)\]\s*$").expect("valid regex");
    static ref UNCALLED_BET: Regex =
        Regex::new(r#"(?i)^uncalled bet of\s+(\d[\d,]*(?:\.\d+)?)\s+returned to\s+"?([^"]+?)"?\s*$"#)
            .expect("valid regex");
    // Checked in order: the first pattern that matches decides the kind.
    static ref ACTION_WORDS: RegexSet = RegexSet::new([
        r"(?i)\bfolds\b",
        r"(?i)\bcalls\b",
        r"(?i)\bbets\b",
        r"(?i)\bchecks\b",
        r"(?i)\bstand up\b",
        r"(?i)\bquits\b",
    ])
    .expect("valid regex set");
}

/// What a raw log line describes.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    HandStart(Option<String>),
    HandEnd(Option<String>),
    Shows,
    Collected(f64),
    Folds,
    Calls,
    Bets,
    Checks,
    StandUp,
    Quits,
    Other,
    Unknown,
}

/// One line of a table log, classified.
///
/// # Fields
///
/// * `kind` - What the line describes.
/// * `player` - The quoted actor, as written (`name @ id`), when the line has one.
/// * `details` - The text following the actor, or the whole line otherwise.
/// * `at` - Timestamp as written in the log.
/// * `order` - Sort key of the line within the log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub player: Option<String>,
    pub details: String,
    pub at: Option<String>,
    pub order: i64,
}

#[derive(Debug, Deserialize)]
struct LogRow {
    entry: String,
    at: Option<String>,
    order: Option<i64>,
}

impl LogEntry {
    /// Classifies a raw `entry` cell.
    pub fn parse(entry: &str, at: Option<String>, order: i64) -> LogEntry {
        let cleaned = entry.trim().replace("\"\"", "\"");

        if let Some(caps) = HAND_START.captures(&cleaned) {
            let number = caps.get(1).map(|m| m.as_str().to_owned());
            return LogEntry::dealer(EntryKind::HandStart(number), cleaned, at, order);
        }
        if let Some(caps) = HAND_END.captures(&cleaned) {
            let number = caps.get(1).map(|m| m.as_str().to_owned());
            return LogEntry::dealer(EntryKind::HandEnd(number), cleaned, at, order);
        }
        if cleaned.is_empty() {
            return LogEntry::dealer(EntryKind::Unknown, cleaned, at, order);
        }

        match QUOTED_ACTOR.captures(&cleaned) {
            Some(caps) => {
                let details = caps[2].trim().to_owned();
                LogEntry {
                    kind: classify_action(&details),
                    player: Some(caps[1].trim().to_owned()),
                    details,
                    at,
                    order,
                }
            }
            None => {
                let details = cleaned.trim_matches('"').trim().to_owned();
                LogEntry::dealer(EntryKind::Other, details, at, order)
            }
        }
    }

    fn dealer(kind: EntryKind, details: String, at: Option<String>, order: i64) -> LogEntry {
        LogEntry {
            kind,
            player: None,
            details,
            at,
            order,
        }
    }

    /// The player's display name: everything before the `@` of their identity.
    pub fn player_name(&self) -> Option<String> {
        self.player.as_deref().map(player_name)
    }

    /// Whether the actor is a seated player (`name @ id`), not a dealer message.
    pub fn has_player_identity(&self) -> bool {
        self.player.as_deref().map_or(false, |player| player.contains('@'))
    }

    /// The street a dealer line opens (`Flop:  [..]`, `Turn: .. [..]`).
    pub fn street(&self) -> Option<Street> {
        if self.player.is_some() {
            return None;
        }
        STREET_MARKER
            .captures(&self.details)
            .and_then(|caps| caps[1].parse().ok())
    }

    /// The cards between the last pair of brackets: the ones just dealt.
    pub fn dealt_cards(&self) -> Vec<String> {
        DEALT_CARDS
            .captures(&self.details)
            .map(|caps| split_cards(&caps[1]))
            .unwrap_or_default()
    }

    /// The amount of a `raises to N` line.
    pub fn raise_amount(&self) -> Option<f64> {
        RAISES_TO
            .captures(&self.details)
            .and_then(|caps| parse_number(&caps[1]))
    }

    /// The amount of a `posts a small blind of N` line.
    pub fn posted_amount(&self) -> Option<f64> {
        POSTS
            .captures(&self.details)
            .and_then(|caps| parse_number(&caps[1]))
    }

    /// The cards of a `shows a A♠, A♥.` line, without the verb or the final dot.
    pub fn shown_cards(&self) -> Option<String> {
        if self.kind != EntryKind::Shows {
            return None;
        }
        SHOWS
            .captures(&self.details)
            .map(|caps| caps[1].trim().to_owned())
            .filter(|cards| !cards.is_empty())
    }

    /// The player name and amount of an `Uncalled bet of N returned to "name @ id"` line.
    pub fn returned_bet(&self) -> Option<(String, f64)> {
        if self.player.is_some() {
            return None;
        }
        let caps = UNCALLED_BET.captures(&self.details)?;
        Some((player_name(&caps[2]), parse_number(&caps[1])?))
    }
}

/// Trims a `name @ id` identity down to the name.
pub fn player_name(identity: &str) -> String {
    identity.split('@').next().unwrap_or_default().trim().to_owned()
}

/// The first decimal number appearing in `text`, ignoring thousands separators.
pub fn first_number(text: &str) -> Option<f64> {
    NUMBER.find(text).and_then(|m| parse_number(m.as_str()))
}

fn parse_number(text: &str) -> Option<f64> {
    text.replace(',', "").parse().ok()
}

fn split_cards(cards: &str) -> Vec<String> {
    cards
        .split(',')
        .map(|card| card.trim().to_owned())
        .filter(|card| !card.is_empty())
        .collect()
}

/// Picks the kind of a line spoken by a quoted actor from its details.
///
/// `shows` and `collected N from pot` are recognized by their leading verb;
/// otherwise the first of folds, calls, bets, checks, stand up and quits that
/// appears as a word wins, in that priority.
fn classify_action(details: &str) -> EntryKind {
    if SHOWS.is_match(details) {
        return EntryKind::Shows;
    }
    if let Some(amount) = COLLECTED
        .captures(details)
        .and_then(|caps| parse_number(&caps[1]))
    {
        return EntryKind::Collected(amount);
    }
    match ACTION_WORDS.matches(details).iter().next() {
        Some(0) => EntryKind::Folds,
        Some(1) => EntryKind::Calls,
        Some(2) => EntryKind::Bets,
        Some(3) => EntryKind::Checks,
        Some(4) => EntryKind::StandUp,
        Some(5) => EntryKind::Quits,
        _ => EntryKind::Other,
    }
}

/// Reads a raw table log (`entry,at,order` CSV) and returns its lines sorted by `order`.
pub fn read_log_entries(path: &Path) -> Result<Vec<LogEntry>, StatsError> {
    let file = std::fs::File::open(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = read_log_entries_from(file, &path.display().to_string())?;
    log::info!("read {} log lines from {}", entries.len(), path.display());
    Ok(entries)
}

/// Reads log lines from any CSV source; `source` names it in errors.
pub fn read_log_entries_from<R: Read>(reader: R, source: &str) -> Result<Vec<LogEntry>, StatsError> {
    let mut reader = csv::Reader::from_reader(reader);
    if !reader.headers()?.iter().any(|header| header == "entry") {
        return Err(StatsError::malformed(source, "entry"));
    }

    let mut entries = Vec::new();
    for (index, row) in reader.deserialize::<LogRow>().enumerate() {
        let row = row?;
        let order = row.order.unwrap_or(index as i64);
        entries.push(LogEntry::parse(&row.entry, row.at, order));
    }
    entries.sort_by_key(|entry| entry.order);

    Ok(entries)
}
