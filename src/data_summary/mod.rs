pub mod data_summarizer;
pub mod hand_net_summary;
pub mod net_summarizer;
pub mod player_stats_summary;
pub mod pot_summarizer;
pub mod showdown_summarizer;
pub mod showdown_summary;
