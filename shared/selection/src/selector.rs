use crate::{
    draw_panel, ConfigError, DrawSource, Ladder, SelectionError, SelectorConfig, Tier, TierTable,
    DEFAULT_PANEL_SIZE,
};

/// Picks a panel of jurors from a pool described by parallel stake and honesty arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct JurySelector {
    panel_size: usize,
    tiers: TierTable,
}

impl Default for JurySelector {
    fn default() -> Self {
        Self {
            panel_size: DEFAULT_PANEL_SIZE,
            tiers: TierTable::default(),
        }
    }
}

impl JurySelector {
    pub fn new(panel_size: usize, tiers: TierTable) -> Result<Self, ConfigError> {
        if panel_size == 0 {
            return Err(ConfigError::ZeroPanelSize);
        }
        Ok(Self { panel_size, tiers })
    }

    pub fn from_config(config: SelectorConfig) -> Result<Self, ConfigError> {
        Self::new(config.panel_size, config.tiers)
    }

    pub fn tier_for(&self, pool_size: usize) -> &Tier {
        self.tiers.for_pool_size(pool_size)
    }

    pub fn compute_ladder(&self, stake: &[f64], honesty: &[f64]) -> Result<Ladder, SelectionError> {
        Ladder::compute(stake, honesty, &self.tiers)
    }

    /// Selects a panel using a fresh thread-local generator.
    pub fn select(&self, stake: &[f64], honesty: &[f64]) -> Result<Vec<usize>, SelectionError> {
        self.select_with_rng(stake, honesty, &mut rand::thread_rng())
    }

    pub fn select_with_rng<D: DrawSource + ?Sized>(
        &self,
        stake: &[f64],
        honesty: &[f64],
        rng: &mut D,
    ) -> Result<Vec<usize>, SelectionError> {
        let ladder = self.compute_ladder(stake, honesty)?;
        let jurors = draw_panel(&ladder, self.panel_size, rng)?;
        tracing::info!(
            pool_size = ladder.len(),
            weighting = %ladder.weighting(),
            ?jurors,
            "Selected jury"
        );
        Ok(jurors)
    }

    pub fn panel_size(&self) -> usize {
        self.panel_size
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }
}
