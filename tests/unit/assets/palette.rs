use super::*;

#[test]
fn seeded_rng_is_reproducible_per_slot() {
    let pool = default_colors();
    let a = pick_color(&pool, &mut source_rng(Some(7), 3)).unwrap();
    let b = pick_color(&pool, &mut source_rng(Some(7), 3)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn picks_come_from_the_pool() {
    let pool = default_gradients();
    let mut rng = source_rng(None, 0);
    for _ in 0..32 {
        let g = pick_gradient(&pool, &mut rng).unwrap();
        assert!(pool.contains(&g));
    }
}

#[test]
fn empty_pools_are_validation_errors() {
    let mut rng = source_rng(Some(1), 0);
    assert!(matches!(
        pick_color(&[], &mut rng),
        Err(ReelError::Validation(_))
    ));
    assert!(pick_gradient(&[], &mut rng).is_err());
}
