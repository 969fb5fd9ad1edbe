//! Property tests for target motion and hit testing.

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use sniper_range::consts::{ARENA_MAX, ARENA_MIN};
use sniper_range::sim::{Arena, TargetRegistry, TargetValue, pick_target};

fn value_strategy() -> impl Strategy<Value = TargetValue> {
    prop::sample::select(TargetValue::ALL.to_vec())
}

proptest! {
    #[test]
    fn targets_never_leave_the_arena(
        x in 0.0f32..100.0,
        y in 0.0f32..100.0,
        dx in -5.0f32..5.0,
        dy in -5.0f32..5.0,
        value in value_strategy(),
        frames in 1usize..400,
    ) {
        let mut registry = TargetRegistry::new();
        registry.insert(Vec2::new(x, y), Vec2::new(dx, dy), value);
        for _ in 0..frames {
            registry.integrate();
        }
        let pos = registry.targets()[0].pos;
        prop_assert!((ARENA_MIN..=ARENA_MAX).contains(&pos.x));
        prop_assert!((ARENA_MIN..=ARENA_MAX).contains(&pos.y));
    }

    #[test]
    fn spawned_and_split_targets_stay_inside(seed in any::<u64>(), round in 1u32..20) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut registry = TargetRegistry::new();
        let id = registry.spawn(&mut rng, round, false);
        let origin = registry.get(id).map(|t| t.pos).unwrap_or_default();
        registry.spawn_split(&mut rng, origin, TargetValue::V50);

        for _ in 0..600 {
            registry.integrate();
        }
        for target in registry.targets() {
            prop_assert!((ARENA_MIN..=ARENA_MAX).contains(&target.pos.x));
            prop_assert!((ARENA_MIN..=ARENA_MAX).contains(&target.pos.y));
        }
    }

    #[test]
    fn hit_targets_are_never_picked(
        ax in 0.0f32..1000.0,
        ay in 0.0f32..1000.0,
        value in value_strategy(),
    ) {
        let arena = Arena::new(1000.0, 1000.0);
        let mut registry = TargetRegistry::new();
        let id = registry.insert(Vec2::new(ax / 10.0, ay / 10.0), Vec2::ZERO, value);
        let aim = Vec2::new(ax, ay);

        prop_assert_eq!(
            pick_target(aim, registry.targets(), &arena).map(|p| p.target_id),
            Some(id)
        );
        registry.mark_hit(id);
        prop_assert!(pick_target(aim, registry.targets(), &arena).is_none());
    }
}
