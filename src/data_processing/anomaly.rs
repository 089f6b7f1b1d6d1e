use thiserror::Error;

/// Data-quality problems found while aggregating that do not stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Anomaly {
    #[error("no hands supplied, the statistics table is empty")]
    EmptyInput,
    #[error("hand {hand}: action by {player}, who is not listed among the hand's players, ignored")]
    UnknownActor { hand: String, player: String },
    #[error("three-bet mapping names unknown player {player}, ignored")]
    UnknownMappingPlayer { player: String },
    #[error("three-bet mapping gives {player} {count} three-bets in {hands_played} hands, ignored")]
    ThreebetExceedsHands {
        player: String,
        count: u32,
        hands_played: u32,
    },
}
