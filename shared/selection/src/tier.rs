use crate::ConfigError;

use serde::{Deserialize, Serialize};

/// A pool-size bracket fixing the probability scale of the ladder and the range of the draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Exclusive upper bound on the pool size. `None` means unbounded.
    pub pool_size_upper_bound: Option<usize>,
    /// Scale applied to the normalized stake and honesty shares.
    pub stake_multiplier: u64,
    /// Inclusive upper bound of the uniform draw.
    pub draw_bound: u64,
}

impl Tier {
    pub const fn new(
        pool_size_upper_bound: Option<usize>,
        stake_multiplier: u64,
        draw_bound: u64,
    ) -> Self {
        Self {
            pool_size_upper_bound,
            stake_multiplier,
            draw_bound,
        }
    }

    pub fn contains(&self, pool_size: usize) -> bool {
        match self.pool_size_upper_bound {
            Some(bound) => pool_size < bound,
            None => true,
        }
    }
}

// The first tier draws over twice its multiplier while the others draw over exactly their
// multiplier. Pools under 600 can therefore reach the whole ladder, larger pools only its
// lower half.
pub const DEFAULT_TIERS: [Tier; 4] = [
    Tier::new(Some(600), 5_000, 10_000),
    Tier::new(Some(1_800), 15_000, 15_000),
    Tier::new(Some(4_800), 45_000, 45_000),
    Tier::new(None, 150_000, 150_000),
];

/// Ordered tier table. Tiers are checked in order and the first one containing the pool size wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierTable(Vec<Tier>);

impl TierTable {
    pub fn new(tiers: Vec<Tier>) -> Result<Self, ConfigError> {
        let Some(last) = tiers.last() else {
            return Err(ConfigError::EmptyTierTable);
        };
        if last.pool_size_upper_bound.is_some() {
            return Err(ConfigError::BoundedLastTier);
        }

        let mut previous_bound = 0;
        for (index, tier) in tiers.iter().enumerate() {
            if tier.stake_multiplier == 0 {
                return Err(ConfigError::ZeroMultiplier { index });
            }
            match tier.pool_size_upper_bound {
                Some(bound) if bound <= previous_bound => {
                    return Err(ConfigError::UnorderedTiers { index });
                }
                Some(bound) => previous_bound = bound,
                None if index != tiers.len() - 1 => {
                    return Err(ConfigError::UnboundedTierNotLast { index });
                }
                None => {}
            }
        }

        Ok(Self(tiers))
    }

    pub fn for_pool_size(&self, pool_size: usize) -> &Tier {
        self.0
            .iter()
            .find(|tier| tier.contains(pool_size))
            // validation guarantees an unbounded last tier
            .unwrap_or_else(|| &self.0[self.0.len() - 1])
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.0
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self(DEFAULT_TIERS.to_vec())
    }
}

impl TryFrom<Vec<Tier>> for TierTable {
    type Error = ConfigError;

    fn try_from(value: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TierTable> for Vec<Tier> {
    fn from(value: TierTable) -> Self {
        value.0
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pool_size_upper_bound {
            Some(bound) => write!(f, "pools under {bound}")?,
            None => write!(f, "unbounded pools")?,
        }
        write!(
            f,
            " (multiplier {}, draws 0..={})",
            self.stake_multiplier, self.draw_bound
        )
    }
}
