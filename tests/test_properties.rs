use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use mystic_quest::compute::{init_state, tick, TickInput, TickOutcome};
use mystic_quest::difficulty::{shoot_interval_for, Difficulty, MIN_SHOOT_INTERVAL, MIN_SPAWN_RATE};
use mystic_quest::entities::{Player, ARENA_HEIGHT, ARENA_WIDTH};

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<[bool; 4]>(), 0u32..3).prop_map(|([up, down, left, right], casts)| TickInput {
        up,
        down,
        left,
        right,
        casts,
        ..Default::default()
    })
}

proptest! {
    #[test]
    fn player_stays_in_arena(moves in prop::collection::vec((-1i8..=1, -1i8..=1), 0..400)) {
        let mut p = Player::spawn();
        for (dx, dy) in moves {
            p.move_by(dx, dy);
            prop_assert!(p.rect.pos.x >= 0.0 && p.rect.pos.y >= 0.0);
            prop_assert!(p.rect.right() <= ARENA_WIDTH);
            prop_assert!(p.rect.bottom() <= ARENA_HEIGHT);
        }
    }

    #[test]
    fn shoot_interval_never_below_floor(score in any::<u32>()) {
        prop_assert!(shoot_interval_for(score) >= MIN_SHOOT_INTERVAL);
    }

    #[test]
    fn checkpoints_fire_once_per_boundary(steps in prop::collection::vec(1u32..4, 1..200)) {
        let mut d = Difficulty::new(0);
        let mut score = 0u32;
        let mut fired = 0u32;
        for step in steps {
            for _ in 0..step {
                score += 1;
                if d.register_score(score, &mut []) {
                    fired += 1;
                }
            }
            prop_assert!(d.current_spawn_rate >= MIN_SPAWN_RATE);
        }
        prop_assert_eq!(fired, score / 10);
        prop_assert_eq!(d.last_score_checkpoint, score / 10);
    }

    #[test]
    fn ticks_keep_difficulty_floors(
        seed in any::<u64>(),
        frames in prop::collection::vec((arb_input(), 1u64..400), 1..300),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(0);
        let mut now = 0;
        for (input, dt) in frames {
            now += dt;
            let report = tick(&mut state, &input, now, &mut rng);

            prop_assert!(state.difficulty.current_spawn_rate >= MIN_SPAWN_RATE);
            for enemy in &state.enemies {
                prop_assert!(enemy.shoot_interval >= MIN_SHOOT_INTERVAL);
                prop_assert!(enemy.health > 0);
            }
            prop_assert!(state.player.rect.pos.x >= 0.0);
            prop_assert!(state.player.rect.right() <= ARENA_WIDTH);
            if report.outcome == TickOutcome::PlayerDied {
                break;
            }
        }
    }
}
