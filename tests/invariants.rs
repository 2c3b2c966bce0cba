//! Property tests for the session-level invariants.

use proptest::prelude::*;

use egg_storm::consts::*;
use egg_storm::sim::{GamePhase, GameState, TickInput, spawn_wave, tick};

/// Decode three input bits into a tick's worth of commands
fn input_from_bits(bits: u8) -> TickInput {
    TickInput {
        move_left: bits & 1 != 0,
        move_right: bits & 2 != 0,
        shoot: bits & 4 != 0,
        restart: false,
    }
}

proptest! {
    /// Lives only ever go down (absent a restart), score only ever goes up,
    /// and an empty life pool always means game over.
    #[test]
    fn lives_and_score_are_monotonic(
        seed in any::<u64>(),
        steps in proptest::collection::vec(0u8..8, 1..400),
    ) {
        let mut state = GameState::new(seed);
        spawn_wave(&mut state);

        let mut prev_lives = state.lives;
        let mut prev_score = state.score;

        for (i, bits) in steps.iter().enumerate() {
            let now = i as f64 * SIM_DT;
            tick(&mut state, &input_from_bits(*bits), now);

            prop_assert!(state.lives <= prev_lives);
            prop_assert!(state.score >= prev_score);
            if state.lives == 0 {
                prop_assert_eq!(state.phase, GamePhase::GameOver);
            }

            prev_lives = state.lives;
            prev_score = state.score;
        }
    }

    /// The ship never leaves the screen, whatever the input mix.
    #[test]
    fn player_stays_on_screen(
        seed in any::<u64>(),
        steps in proptest::collection::vec(0u8..8, 1..300),
    ) {
        let mut state = GameState::new(seed);
        spawn_wave(&mut state);

        for (i, bits) in steps.iter().enumerate() {
            let now = i as f64 * SIM_DT;
            tick(&mut state, &input_from_bits(*bits), now);

            let half = PLAYER_WIDTH / 2.0;
            prop_assert!(state.player.pos.x >= half);
            prop_assert!(state.player.pos.x <= SCREEN_WIDTH - half);
        }
    }

    /// Restarting from game over yields a pristine session whatever came
    /// before.
    #[test]
    fn restart_yields_pristine_session(
        seed in any::<u64>(),
        steps in proptest::collection::vec(0u8..8, 1..200),
    ) {
        let mut state = GameState::new(seed);
        spawn_wave(&mut state);

        for (i, bits) in steps.iter().enumerate() {
            let now = i as f64 * SIM_DT;
            tick(&mut state, &input_from_bits(*bits), now);
        }

        // Force the end of the run, then restart
        state.lives = 0;
        tick(&mut state, &TickInput::default(), 0.0);
        prop_assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput { restart: true, ..Default::default() };
        tick(&mut state, &restart, 0.0);

        prop_assert_eq!(state.phase, GamePhase::Playing);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.lives, STARTING_LIVES);
        prop_assert!(state.player.projectiles.is_empty());
        prop_assert!(state.eggs.is_empty());
        prop_assert!(state.powerups.is_empty());
        prop_assert!(state.explosions.is_empty());
    }

    /// Live entities stay inside screen bounds until they are removed.
    #[test]
    fn entities_live_inside_the_screen(
        seed in any::<u64>(),
        ticks in 1usize..500,
    ) {
        let mut state = GameState::new(seed);
        spawn_wave(&mut state);

        let input = TickInput { shoot: true, ..Default::default() };
        for i in 0..ticks {
            let now = i as f64 * SIM_DT;
            tick(&mut state, &input, now);

            for egg in &state.eggs {
                prop_assert!(egg.pos.y - EGG_HEIGHT / 2.0 <= SCREEN_HEIGHT);
            }
            for p in &state.player.projectiles {
                prop_assert!(p.pos.y + p.size().y / 2.0 >= 0.0);
            }
        }
    }
}
