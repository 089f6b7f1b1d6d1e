use crate::stats_error::StatsError;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Three-bet counts per player computed outside this tool.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThreebetMapping {
    counts: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct MappingRow {
    #[serde(alias = "Player")]
    player: String,
    #[serde(alias = "threebet", alias = "Threebet")]
    threebet_count: u32,
}

impl ThreebetMapping {
    pub fn insert(&mut self, player: &str, count: u32) {
        if let Some(previous) = self.counts.insert(player.trim().to_owned(), count) {
            log::warn!(
                "three-bet mapping lists {} twice ({} then {}), keeping the last",
                player.trim(),
                previous,
                count
            );
        }
    }

    #[cfg(test)]
    pub fn get(&self, player: &str) -> Option<u32> {
        self.counts.get(player).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(player, count)| (player.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Reads a `player,threebet_count` CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, StatsError> {
        let file = std::fs::File::open(path).map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mapping = Self::from_reader(file)?;
        if mapping.is_empty() {
            log::warn!("{} holds no three-bet counts", path.display());
        }
        log::info!(
            "loaded three-bet counts for {} players from {}",
            mapping.len(),
            path.display()
        );
        Ok(mapping)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StatsError> {
        let mut mapping = ThreebetMapping::default();
        for row in csv::Reader::from_reader(reader).deserialize::<MappingRow>() {
            let row = row?;
            mapping.insert(&row.player, row.threebet_count);
        }
        Ok(mapping)
    }
}

#[cfg(test)]
impl<'a> FromIterator<(&'a str, u32)> for ThreebetMapping {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        let mut mapping = ThreebetMapping::default();
        for (player, count) in iter {
            mapping.insert(player, count);
        }
        mapping
    }
}
