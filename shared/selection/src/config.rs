use crate::TierTable;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PANEL_SIZE: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    pub panel_size: usize,
    pub tiers: TierTable,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            panel_size: DEFAULT_PANEL_SIZE,
            tiers: TierTable::default(),
        }
    }
}
