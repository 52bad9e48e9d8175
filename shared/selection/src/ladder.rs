use crate::{InvalidInput, SelectionError, Tier, TierTable};

use serde::{Deserialize, Serialize};

/// How the ladder's rungs were built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weighting {
    /// Stake and honesty shares are summed and every running total is rounded up.
    NormalWeighting,
    /// No honesty share contributed anything, so stake shares count double and the running
    /// totals are kept unrounded. The top rung can then land a hair under the draw bound, in
    /// which case a draw of exactly the bound finds no candidate.
    StakeOnlyFallback,
}

impl std::fmt::Display for Weighting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weighting::NormalWeighting => write!(f, "Normal weighting"),
            Weighting::StakeOnlyFallback => write!(f, "Stake-only fallback"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Rungs {
    Rounded(Vec<u64>),
    Unrounded(Vec<f64>),
}

/// Cumulative ticket table for one candidate pool. Non-decreasing, one rung per candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Ladder {
    rungs: Rungs,
    tier: Tier,
}

impl Ladder {
    pub fn compute(
        stake: &[f64],
        honesty: &[f64],
        tiers: &TierTable,
    ) -> Result<Self, SelectionError> {
        validate_pool(stake, honesty)?;

        let tier = *tiers.for_pool_size(stake.len());
        let multiplier = tier.stake_multiplier as f64;

        let total_stake: f64 = stake.iter().sum();
        if total_stake == 0.0 {
            return Err(SelectionError::DivisionByZero);
        }
        if !total_stake.is_finite() {
            return Err(InvalidInput::Overflow.into());
        }

        // a pool without any honesty history yet still needs a usable denominator
        let mut total_honesty: f64 = honesty.iter().filter(|h| **h >= 0.0).sum();
        if total_honesty == 0.0 {
            total_honesty = 1.0;
        }
        if !total_honesty.is_finite() {
            return Err(InvalidInput::Overflow.into());
        }

        // divide before scaling so stakes near f64::MAX stay finite
        let stake_shares = stake.iter().map(|s| s / total_stake * multiplier);
        let honesty_shares: Vec<f64> = honesty
            .iter()
            .map(|h| match *h < 0.0 {
                true => 0.0,
                false => h / total_honesty * multiplier,
            })
            .collect();
        let tickets: Vec<f64> = stake_shares
            .zip(&honesty_shares)
            .map(|(s, h)| s + h)
            .collect();

        let rungs = match honesty_shares.iter().sum::<f64>() == 0.0 {
            true => {
                tracing::warn!(
                    pool_size = stake.len(),
                    "No honesty signal in pool, weighting by stake only"
                );
                let rungs: Vec<f64> = running_sum(tickets.iter().map(|t| 2.0 * t)).collect();
                if rungs.iter().any(|r| !r.is_finite()) {
                    return Err(InvalidInput::Overflow.into());
                }
                Rungs::Unrounded(rungs)
            }
            false => Rungs::Rounded(
                running_sum(tickets.into_iter())
                    .map(|total| match total.is_finite() {
                        true => Ok(total.ceil() as u64),
                        false => Err(InvalidInput::Overflow),
                    })
                    .collect::<Result<_, _>>()?,
            ),
        };

        let ladder = Self { rungs, tier };
        tracing::debug!(
            pool_size = ladder.len(),
            weighting = %ladder.weighting(),
            tier = %ladder.tier,
            top = ladder.last(),
            "Computed ticket ladder"
        );
        Ok(ladder)
    }

    pub fn weighting(&self) -> Weighting {
        match self.rungs {
            Rungs::Rounded(_) => Weighting::NormalWeighting,
            Rungs::Unrounded(_) => Weighting::StakeOnlyFallback,
        }
    }

    pub fn tier(&self) -> &Tier {
        &self.tier
    }

    pub fn len(&self) -> usize {
        match &self.rungs {
            Rungs::Rounded(r) => r.len(),
            Rungs::Unrounded(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        match &self.rungs {
            Rungs::Rounded(r) => r.get(index).map(|v| *v as f64),
            Rungs::Unrounded(r) => r.get(index).copied(),
        }
    }

    pub fn values(&self) -> Vec<f64> {
        match &self.rungs {
            Rungs::Rounded(r) => r.iter().map(|v| *v as f64).collect(),
            Rungs::Unrounded(r) => r.clone(),
        }
    }

    /// Rounded rungs, if the ladder was built with [`Weighting::NormalWeighting`].
    pub fn rounded(&self) -> Option<&[u64]> {
        match &self.rungs {
            Rungs::Rounded(r) => Some(r),
            Rungs::Unrounded(_) => None,
        }
    }

    pub fn last(&self) -> f64 {
        self.value(self.len().saturating_sub(1)).unwrap_or(0.0)
    }

    /// First candidate whose cumulative ticket value reaches `draw`, scanning from index 0.
    pub fn first_at_or_above(&self, draw: u64) -> Option<usize> {
        match &self.rungs {
            Rungs::Rounded(r) => r.iter().position(|v| *v >= draw),
            Rungs::Unrounded(r) => r.iter().position(|v| *v >= draw as f64),
        }
    }

    /// Chance of each candidate being picked by a single draw over `0..=draw_bound`.
    /// Sums to less than one when part of the draw range lies above the ladder.
    pub fn odds(&self) -> Vec<f64> {
        let draw_bound = self.tier.draw_bound;
        let outcomes = draw_bound as f64 + 1.0;
        // number of draws v in 0..=draw_bound with v <= rung
        let covered = |rung: f64| -> u64 {
            match rung < 0.0 {
                true => 0,
                false => (rung.floor() as u64).min(draw_bound) + 1,
            }
        };

        let mut below = 0;
        self.values()
            .into_iter()
            .map(|rung| {
                let reached = covered(rung).max(below);
                let won = reached - below;
                below = reached;
                won as f64 / outcomes
            })
            .collect()
    }
}

fn validate_pool(stake: &[f64], honesty: &[f64]) -> Result<(), InvalidInput> {
    if stake.len() != honesty.len() {
        return Err(InvalidInput::LengthMismatch {
            stake: stake.len(),
            honesty: honesty.len(),
        });
    }
    if stake.is_empty() {
        return Err(InvalidInput::EmptyPool);
    }
    if let Some(index) = stake
        .iter()
        .zip(honesty)
        .position(|(s, h)| !s.is_finite() || !h.is_finite())
    {
        return Err(InvalidInput::NonFinite { index });
    }
    Ok(())
}

fn running_sum(values: impl Iterator<Item = f64>) -> impl Iterator<Item = f64> {
    values.scan(0.0, |total, v| {
        *total += v;
        Some(*total)
    })
}
