mod config;
mod error;
mod ladder;
mod lottery;
mod selector;
mod tier;

pub use config::{SelectorConfig, DEFAULT_PANEL_SIZE};
pub use error::{ConfigError, InvalidInput, SelectionError};
pub use ladder::{Ladder, Weighting};
pub use lottery::{draw_panel, DrawSource};
pub use selector::JurySelector;
pub use tier::{Tier, TierTable, DEFAULT_TIERS};

/// Builds the ticket ladder for a pool using the default tier table.
pub fn compute_ladder(stake: &[f64], honesty: &[f64]) -> Result<Ladder, SelectionError> {
    Ladder::compute(stake, honesty, &TierTable::default())
}

/// Selects a panel of [`DEFAULT_PANEL_SIZE`] jurors using the default tier table.
pub fn select_jurors(stake: &[f64], honesty: &[f64]) -> Result<Vec<usize>, SelectionError> {
    JurySelector::default().select(stake, honesty)
}
