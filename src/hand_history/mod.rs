pub mod hand_builder;
pub mod hand_record;
pub mod log_entry;
pub mod record_loader;

use crate::hand_history::hand_record::HandRecord;
use crate::stats_error::StatsError;

use clap::ValueEnum;
use std::path::Path;

/// How an input file encodes its hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// A JSON array of hand records.
    Json,
    /// A raw table log with `entry,at,order` columns.
    Log,
}

impl InputFormat {
    /// Guesses the format from the file extension: `.json` is JSON, anything else a log.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Log,
        }
    }
}

/// Loads every hand from `path`, reconstructing them first when it is a raw log.
pub fn load_hands(path: &Path, format: InputFormat) -> Result<Vec<HandRecord>, StatsError> {
    match format {
        InputFormat::Json => record_loader::load_hand_records(path),
        InputFormat::Log => {
            let entries = log_entry::read_log_entries(path)?;
            Ok(hand_builder::build_hands(&entries))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(InputFormat::from_path(Path::new("hands.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("poker_now_log.csv")), InputFormat::Log);
        assert_eq!(InputFormat::from_path(Path::new("log")), InputFormat::Log);
    }

    #[test]
    fn raw_logs_are_rebuilt_into_hands() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(
            &path,
            "entry,at,order\n\
             \"-- starting hand #1 --\",t,1\n\
             \"\"\"ann @ 1\"\" calls 20\",t,2\n\
             \"-- ending hand #1 --\",t,3\n",
        )
        .unwrap();
        let hands = load_hands(&path, InputFormat::Log).unwrap();
        assert_eq!(hands.len(), 1);
        assert!(hands[0].players.contains("ann"));
    }
}
