use crate::{Ladder, SelectionError};

use rand::Rng;

/// Source of uniform integer draws.
pub trait DrawSource {
    /// Uniform integer in `0..=bound`.
    fn draw(&mut self, bound: u64) -> u64;
}

impl<R: Rng + ?Sized> DrawSource for R {
    fn draw(&mut self, bound: u64) -> u64 {
        self.gen_range(0..=bound)
    }
}

/// Draws `panel_size` winning numbers up to the ladder tier's draw bound and maps each to the
/// first candidate whose rung reaches it. The same candidate may win more than once.
pub fn draw_panel<D: DrawSource + ?Sized>(
    ladder: &Ladder,
    panel_size: usize,
    rng: &mut D,
) -> Result<Vec<usize>, SelectionError> {
    let draw_bound = ladder.tier().draw_bound;
    let winning_numbers: Vec<u64> = (0..panel_size).map(|_| rng.draw(draw_bound)).collect();

    tracing::trace!(?winning_numbers, draw_bound, "Drew winning numbers");

    winning_numbers
        .into_iter()
        .map(|draw| {
            ladder
                .first_at_or_above(draw)
                .ok_or_else(|| SelectionError::NoCandidateFound {
                    draw,
                    top: ladder.last(),
                })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::TierTable;
    use std::collections::VecDeque;

    /// Replays a fixed list of draws, ignoring the bound.
    pub struct FixedDraws(pub VecDeque<u64>);

    impl FixedDraws {
        pub fn new(draws: &[u64]) -> Self {
            Self(draws.iter().copied().collect())
        }
    }

    impl DrawSource for FixedDraws {
        fn draw(&mut self, _bound: u64) -> u64 {
            self.0.pop_front().expect("ran out of fixed draws")
        }
    }

    fn ladder() -> Ladder {
        // rungs 3750, 10000
        Ladder::compute(&[1.0, 3.0], &[1.0, 1.0], &TierTable::default()).unwrap()
    }

    #[test]
    fn test_draws_map_to_first_reaching_rung() {
        let mut draws = FixedDraws::new(&[0, 3750, 3751]);
        assert_eq!(draw_panel(&ladder(), 3, &mut draws), Ok(vec![0, 0, 1]));
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut draws = FixedDraws::new(&[9000, 10000, 5000]);
        assert_eq!(draw_panel(&ladder(), 3, &mut draws), Ok(vec![1, 1, 1]));
    }

    #[test]
    fn test_draw_above_ladder_fails() {
        let mut draws = FixedDraws::new(&[0, 10001, 0]);
        assert_eq!(
            draw_panel(&ladder(), 3, &mut draws),
            Err(SelectionError::NoCandidateFound {
                draw: 10001,
                top: 10000.0
            })
        );
    }

    #[test]
    fn test_fallback_top_can_miss_draw_bound() {
        let stake = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 1.0, 2.0, 3.0, 4.0];
        let ladder = Ladder::compute(&stake, &[-1.0; 11], &TierTable::default()).unwrap();
        assert!(ladder.last() < 10_000.0);
        assert!(ladder.last() > 9_999.999);

        let mut draws = FixedDraws::new(&[9_999, 10_000]);
        assert_eq!(draw_panel(&ladder, 1, &mut draws), Ok(vec![10]));
        assert!(matches!(
            draw_panel(&ladder, 1, &mut draws),
            Err(SelectionError::NoCandidateFound { draw: 10_000, .. })
        ));
    }

    #[test]
    fn test_draws_all_before_mapping() {
        let mut draws = FixedDraws::new(&[20000, 0, 0]);
        assert!(draw_panel(&ladder(), 3, &mut draws).is_err());
        assert!(draws.0.is_empty());
    }

    #[test]
    fn test_rng_draws_stay_in_bound() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            assert!(rng.draw(10) <= 10);
        }
        assert_eq!(rng.draw(0), 0);
    }

    #[test]
    fn test_panel_size() {
        let mut rng = rand::thread_rng();
        assert_eq!(draw_panel(&ladder(), 5, &mut rng).unwrap().len(), 5);
        assert_eq!(draw_panel(&ladder(), 1, &mut rng).unwrap().len(), 1);
    }
}
