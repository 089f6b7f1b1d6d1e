pub mod anomaly;
pub mod data_processor;
pub mod player_stats;
pub mod threebet_mapping;
