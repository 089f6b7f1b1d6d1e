use crate::hand_history::hand_record::{
    Action, ActionEntry, Board, Collection, HandRecord, PotSnapshot, Showdown, Street,
};
use crate::stats_error::StatsError;

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Loads and validates the hand records stored as a JSON array in `path`.
///
/// # Arguments
///
/// * `path` - The JSON file holding the ordered list of hand records.
///
/// # Returns
///
/// * `Ok(hands)` - Every record, validated, in input order.
/// * `Err(StatsError)` - The file could not be read or parsed, or a record is malformed.
///   No records are returned once any record fails validation.
pub fn load_hand_records(path: &Path) -> Result<Vec<HandRecord>, StatsError> {
    let content = fs::read_to_string(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let hands = parse_hand_records(&content)?;
    log::info!("loaded {} hands from {}", hands.len(), path.display());
    Ok(hands)
}

/// Parses and validates hand records from a JSON array held in memory.
pub fn parse_hand_records(content: &str) -> Result<Vec<HandRecord>, StatsError> {
    let values: Vec<Value> = serde_json::from_str(content)?;
    values
        .iter()
        .enumerate()
        .map(|(index, value)| validate_record(value, index))
        .collect()
}

/// Checks one JSON record field by field and builds the hand from it.
///
/// A field that is missing where required, or present with the wrong JSON
/// type, fails with `MalformedRecord` naming the hand and the field path
/// (`preflop_aggression[2].amount`). The hand is named `#<index>` until its
/// id has been read.
pub fn validate_record(value: &Value, index: usize) -> Result<HandRecord, StatsError> {
    let position = format!("#{}", index);
    let record = value
        .as_object()
        .ok_or_else(|| StatsError::malformed(&position, "record"))?;

    let hand_id = match present(record, "hand_id").or_else(|| present(record, "hand_number")) {
        Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_owned(),
        Some(Value::Number(number)) => number.to_string(),
        _ => return Err(StatsError::malformed(&position, "hand_id")),
    };
    let fields = Fields { hand: &hand_id };

    let listed = fields.list(present(record, "players"), "players")?;
    if listed.is_empty() {
        return Err(fields.malformed("players"));
    }
    let mut players = std::collections::BTreeSet::new();
    for (i, player) in listed.iter().enumerate() {
        players.insert(fields.text(Some(player), &format!("players[{}]", i))?);
    }

    Ok(HandRecord {
        preflop_aggression: fields.actions(record, "preflop_aggression")?,
        postflop_aggression: fields.actions(record, "postflop_aggression")?,
        collected: fields.collections(record, "collected")?,
        returned: fields.collections(record, "returned")?,
        shows: fields.shows(record)?,
        board: fields.board(record)?,
        pot_history: fields.pot_history(record)?,
        hand_id,
        players,
    })
}

/// A field that is absent and a field set to `null` are the same thing.
fn present<'v>(object: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
    object.get(name).filter(|value| !value.is_null())
}

struct Fields<'a> {
    hand: &'a str,
}

impl Fields<'_> {
    fn malformed(&self, field: &str) -> StatsError {
        StatsError::malformed(self.hand, field)
    }

    fn text(&self, value: Option<&Value>, field: &str) -> Result<String, StatsError> {
        match value {
            Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.trim().to_owned()),
            _ => Err(self.malformed(field)),
        }
    }

    fn optional_text(&self, value: Option<&Value>, field: &str) -> Result<Option<String>, StatsError> {
        match value {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone()).filter(|text| !text.is_empty())),
            Some(_) => Err(self.malformed(field)),
        }
    }

    fn number(&self, value: Option<&Value>, field: &str) -> Result<f64, StatsError> {
        value
            .and_then(Value::as_f64)
            .ok_or_else(|| self.malformed(field))
    }

    fn optional_number(&self, value: Option<&Value>, field: &str) -> Result<Option<f64>, StatsError> {
        value.map(|_| self.number(value, field)).transpose()
    }

    fn list<'v>(&self, value: Option<&'v Value>, field: &str) -> Result<&'v [Value], StatsError> {
        match value {
            Some(Value::Array(items)) => Ok(items.as_slice()),
            _ => Err(self.malformed(field)),
        }
    }

    /// A list that may be left out entirely.
    fn optional_list<'v>(&self, value: Option<&'v Value>, field: &str) -> Result<&'v [Value], StatsError> {
        match value {
            None => Ok(&[][..]),
            Some(_) => self.list(value, field),
        }
    }

    fn object<'v>(&self, value: &'v Value, field: &str) -> Result<&'v Map<String, Value>, StatsError> {
        value.as_object().ok_or_else(|| self.malformed(field))
    }

    fn actions(&self, record: &Map<String, Value>, name: &str) -> Result<Vec<ActionEntry>, StatsError> {
        let mut actions = Vec::new();
        for (i, item) in self.optional_list(present(record, name), name)?.iter().enumerate() {
            let field = format!("{}[{}]", name, i);
            let entry = self.object(item, &field)?;
            let action_field = format!("{}.action", field);
            let action = self
                .text(present(entry, "action"), &action_field)?
                .parse::<Action>()
                .map_err(|_| self.malformed(&action_field))?;
            actions.push(ActionEntry {
                player: self.text(present(entry, "player"), &format!("{}.player", field))?,
                action,
                amount: self.optional_number(present(entry, "amount"), &format!("{}.amount", field))?,
                details: self.optional_text(present(entry, "details"), &format!("{}.details", field))?,
            });
        }
        Ok(actions)
    }

    fn collections(&self, record: &Map<String, Value>, name: &str) -> Result<Vec<Collection>, StatsError> {
        let mut collected = Vec::new();
        for (i, item) in self.optional_list(present(record, name), name)?.iter().enumerate() {
            let field = format!("{}[{}]", name, i);
            let entry = self.object(item, &field)?;
            collected.push(Collection {
                player: self.text(present(entry, "player"), &format!("{}.player", field))?,
                amount: self.number(present(entry, "amount"), &format!("{}.amount", field))?,
            });
        }
        Ok(collected)
    }

    fn shows(&self, record: &Map<String, Value>) -> Result<Vec<Showdown>, StatsError> {
        let mut shows = Vec::new();
        for (i, item) in self.optional_list(present(record, "shows"), "shows")?.iter().enumerate() {
            let field = format!("shows[{}]", i);
            let entry = self.object(item, &field)?;
            shows.push(Showdown {
                player: self.text(present(entry, "player"), &format!("{}.player", field))?,
                cards: self.text(present(entry, "cards"), &format!("{}.cards", field))?,
            });
        }
        Ok(shows)
    }

    fn board(&self, record: &Map<String, Value>) -> Result<Board, StatsError> {
        let Some(value) = present(record, "board") else {
            return Ok(Board::default());
        };
        let board = self.object(value, "board")?;
        let cards = |street: Street| -> Result<Vec<String>, StatsError> {
            let field = format!("board.{}", street);
            self.optional_list(present(board, street.name()), &field)?
                .iter()
                .enumerate()
                .map(|(i, card)| self.text(Some(card), &format!("{}[{}]", field, i)))
                .collect()
        };
        Ok(Board {
            flop: cards(Street::Flop)?,
            turn: cards(Street::Turn)?,
            river: cards(Street::River)?,
        })
    }

    fn pot_history(&self, record: &Map<String, Value>) -> Result<Vec<PotSnapshot>, StatsError> {
        let mut history = Vec::new();
        for (i, item) in self.optional_list(present(record, "pot_history"), "pot_history")?.iter().enumerate() {
            let field = format!("pot_history[{}]", i);
            let entry = self.object(item, &field)?;
            let street_field = format!("{}.street", field);
            let street = self
                .text(present(entry, "street"), &street_field)?
                .parse::<Street>()
                .map_err(|_| self.malformed(&street_field))?;
            history.push(PotSnapshot {
                street,
                pot: self.number(present(entry, "pot"), &format!("{}.pot", field))?,
            });
        }
        Ok(history)
    }
}
