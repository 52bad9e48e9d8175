use jury_selection::{compute_ladder, JurySelector};
use rstest::rstest;

#[rstest]
#[case(1, 5_000, 10_000)]
#[case(599, 5_000, 10_000)]
#[case(600, 15_000, 15_000)]
#[case(1_799, 15_000, 15_000)]
#[case(1_800, 45_000, 45_000)]
#[case(4_799, 45_000, 45_000)]
#[case(4_800, 150_000, 150_000)]
#[case(10_000, 150_000, 150_000)]
fn tier_boundaries(
    #[case] pool_size: usize,
    #[case] stake_multiplier: u64,
    #[case] draw_bound: u64,
) {
    let tier = JurySelector::default().tier_for(pool_size).to_owned();
    assert_eq!(tier.stake_multiplier, stake_multiplier);
    assert_eq!(tier.draw_bound, draw_bound);

    let stake: Vec<f64> = (0..pool_size).map(|i| (i % 7) as f64 + 1.0).collect();
    let honesty: Vec<f64> = (0..pool_size).map(|i| (i % 5) as f64 - 1.0).collect();
    let ladder = compute_ladder(&stake, &honesty).unwrap();
    assert_eq!(ladder.tier(), &tier);
    assert_eq!(ladder.len(), pool_size);

    let values = ladder.values();
    assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    // stake and honesty each contribute one multiplier's worth of tickets, plus ceiling slack
    let top = ladder.last();
    let expected = 2.0 * stake_multiplier as f64;
    assert!(top >= expected - 1e-6 && top <= expected + 1.0, "top {top}");
}
