use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("total stake across the pool is zero")]
    DivisionByZero,

    #[error("invalid candidate pool: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("draw {draw} is above the top of the ladder ({top})")]
    NoCandidateFound { draw: u64, top: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("pool has no candidates")]
    EmptyPool,

    #[error("got {stake} stake values but {honesty} honesty values")]
    LengthMismatch { stake: usize, honesty: usize },

    #[error("candidate {index} has a non-finite stake or honesty value")]
    NonFinite { index: usize },

    #[error("stake or honesty values are too large to weigh")]
    Overflow,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tier table is empty")]
    EmptyTierTable,

    #[error("tier {index} does not have a larger pool size bound than the tier before it")]
    UnorderedTiers { index: usize },

    #[error("tier {index} is unbounded but is not the last tier")]
    UnboundedTierNotLast { index: usize },

    #[error("the last tier must be unbounded so every pool size has a tier")]
    BoundedLastTier,

    #[error("tier {index} has a zero stake multiplier")]
    ZeroMultiplier { index: usize },

    #[error("panel size must be at least 1")]
    ZeroPanelSize,
}
