//! Fixed timestep simulation tick
//!
//! One call advances the whole game by a single 60 Hz step: input, player
//! upkeep, formation march, falling objects, collision passes, and the
//! phase transitions.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{Egg, Enemy, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held: move left this tick
    pub move_left: bool,
    /// Held: move right this tick
    pub move_right: bool,
    /// Edge-triggered: fire (subject to the ship's cooldown)
    pub shoot: bool,
    /// Edge-triggered: restart; only honored on the game-over screen
    pub restart: bool,
}

/// Advance the game state by one fixed timestep.
///
/// `now` is wall-clock seconds from the frontend; it only drives power-up
/// expiry. Everything else counts ticks, so tests can step time freely.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    match state.phase {
        GamePhase::GameOver => {
            // Explosions keep burning out behind the game-over card
            state.explosions.retain_mut(|e| e.update());
            if input.restart {
                restart(state);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Input
    if input.move_left {
        state.player.move_by(-1.0);
    }
    if input.move_right {
        state.player.move_by(1.0);
    }
    if input.shoot && state.player.shoot() {
        state.events.push(GameEvent::ShotFired);
    }

    state.player.update(now);

    update_wave(state);

    // Falling objects and animations
    state.eggs.retain_mut(|egg| {
        egg.update();
        !egg.off_screen()
    });
    state.powerups.retain_mut(|p| {
        p.update();
        !p.off_screen()
    });
    state.explosions.retain_mut(|e| e.update());

    collision::projectiles_vs_enemies(state);
    collision::eggs_vs_player(state);
    collision::powerups_vs_player(state, now);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("game over at {} points, wave {}", state.score, state.wave);
    } else if state.enemies.is_empty() {
        if state.wave > 0 {
            state.events.push(GameEvent::WaveCleared);
        }
        spawn_wave(state);
    }
}

/// March the formation: advance every member, then apply the collective
/// reversal if any member has reached an edge. The whole wave flips and
/// steps down together, even members nowhere near the edge.
fn update_wave(state: &mut GameState) {
    let mut hit_edge = false;
    let mut drops: Vec<Vec2> = Vec::new();

    for enemy in &mut state.enemies {
        enemy.advance();
        if enemy.at_edge() {
            hit_edge = true;
        }
        if state.rng.random_bool(EGG_DROP_CHANCE) {
            drops.push(Vec2::new(enemy.pos.x, enemy.pos.y + ENEMY_HEIGHT / 2.0));
        }
    }

    if hit_edge {
        for enemy in &mut state.enemies {
            enemy.direction = -enemy.direction;
            enemy.pos.y += FORMATION_DROP;
        }
    }

    for pos in drops {
        let egg = Egg::new(pos, &mut state.rng);
        state.eggs.push(egg);
    }
}

/// Spawn a fresh formation grid. Row count scales with score, capped.
pub fn spawn_wave(state: &mut GameState) {
    let rows = (WAVE_BASE_ROWS + state.score / WAVE_SCORE_PER_ROW).min(WAVE_MAX_ROWS);
    state.wave += 1;
    log::info!("wave {}: spawning {}x{} formation", state.wave, rows, WAVE_COLS);

    for row in 0..rows {
        for col in 0..WAVE_COLS {
            let pos = Vec2::new(
                col as f32 * WAVE_COL_SPACING + WAVE_LEFT_OFFSET + ENEMY_WIDTH / 2.0,
                row as f32 * WAVE_ROW_SPACING + WAVE_TOP_OFFSET + ENEMY_HEIGHT / 2.0,
            );
            let enemy = Enemy::new(pos, &mut state.rng);
            state.enemies.push(enemy);
        }
    }
}

/// Reset the session in place, reusing the original seed
fn restart(state: &mut GameState) {
    log::info!("session restarted");
    *state = GameState::new(state.seed);
    spawn_wave(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PowerUpKind;

    /// Run `n` ticks with no input, advancing wall-clock at the tick rate
    fn run_idle(state: &mut GameState, n: usize) {
        let input = TickInput::default();
        for _ in 0..n {
            let now = state.time_ticks as f64 * SIM_DT;
            tick(state, &input, now);
        }
    }

    #[test]
    fn first_tick_spawns_base_wave() {
        let mut state = GameState::new(11);
        run_idle(&mut state, 1);
        assert_eq!(state.wave, 1);
        assert_eq!(
            state.enemies.len(),
            (WAVE_BASE_ROWS * WAVE_COLS) as usize
        );
        // No wave-cleared event for the opening spawn
        assert!(!state.events.contains(&GameEvent::WaveCleared));
    }

    #[test]
    fn wave_rows_scale_with_score_and_cap() {
        let mut state = GameState::new(11);
        state.score = 420; // 3 + 420/200 = 5 rows
        spawn_wave(&mut state);
        assert_eq!(state.enemies.len(), (5 * WAVE_COLS) as usize);

        let mut state = GameState::new(11);
        state.score = 10_000; // capped
        spawn_wave(&mut state);
        assert_eq!(state.enemies.len(), (WAVE_MAX_ROWS * WAVE_COLS) as usize);
    }

    #[test]
    fn clearing_the_wave_respawns_and_reports() {
        let mut state = GameState::new(11);
        spawn_wave(&mut state);
        state.enemies.clear();

        run_idle(&mut state, 1);

        assert_eq!(state.wave, 2);
        assert!(state.events.contains(&GameEvent::WaveCleared));
        assert!(!state.enemies.is_empty());
    }

    #[test]
    fn formation_reverses_collectively_at_edge() {
        let mut state = GameState::new(11);
        spawn_wave(&mut state);

        let rows_y: Vec<f32> = state.enemies.iter().map(|e| e.pos.y).collect();

        // Park the rightmost member against the edge; the rest stay inland
        let last = state.enemies.len() - 1;
        state.enemies[last].pos.x = SCREEN_WIDTH - ENEMY_WIDTH / 2.0;

        run_idle(&mut state, 1);

        // Every member reversed and stepped down, simultaneously
        for (enemy, old_y) in state.enemies.iter().zip(&rows_y) {
            assert_eq!(enemy.direction, -1.0);
            assert_eq!(enemy.pos.y, old_y + FORMATION_DROP);
        }
    }

    #[test]
    fn formation_does_not_reverse_mid_screen() {
        let mut state = GameState::new(11);
        spawn_wave(&mut state);
        run_idle(&mut state, 1);
        assert!(state.enemies.iter().all(|e| e.direction == 1.0));
    }

    #[test]
    fn game_over_freezes_simulation() {
        let mut state = GameState::new(11);
        spawn_wave(&mut state);
        state.phase = GamePhase::GameOver;

        let ticks_before = state.time_ticks;
        let enemies_before: Vec<f32> = state.enemies.iter().map(|e| e.pos.x).collect();
        run_idle(&mut state, 10);

        assert_eq!(state.time_ticks, ticks_before);
        let enemies_after: Vec<f32> = state.enemies.iter().map(|e| e.pos.x).collect();
        assert_eq!(enemies_before, enemies_after);
    }

    #[test]
    fn restart_resets_everything() {
        let mut state = GameState::new(42);
        spawn_wave(&mut state);

        // Dirty up the session
        state.score = 730;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.player.pos.x = 13.0;
        state.player.activate_powerup(PowerUpKind::Multi, 0.0);
        let mut egg_rng = state.rng.clone();
        state.eggs.push(Egg::new(Vec2::new(1.0, 1.0), &mut egg_rng));

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 99.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.wave, 1);
        assert_eq!(state.player.pos.x, SCREEN_WIDTH / 2.0);
        assert_eq!(state.player.current_powerup(), None);
        assert!(state.player.projectiles.is_empty());
        assert!(state.eggs.is_empty());
        assert!(state.powerups.is_empty());
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn restart_is_ignored_while_playing() {
        let mut state = GameState::new(42);
        spawn_wave(&mut state);
        state.score = 50;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);

        assert_eq!(state.score, 50);
    }

    #[test]
    fn shot_fired_event_respects_cooldown() {
        let mut state = GameState::new(42);
        spawn_wave(&mut state);

        let input = TickInput {
            shoot: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert!(state.take_events().contains(&GameEvent::ShotFired));

        // Immediately again: still cooling down, no event
        tick(&mut state, &input, SIM_DT);
        assert!(!state.take_events().contains(&GameEvent::ShotFired));
    }

    #[test]
    fn determinism_same_seed_same_run() {
        let mut a = GameState::new(99_999);
        let mut b = GameState::new(99_999);
        spawn_wave(&mut a);
        spawn_wave(&mut b);

        let input = TickInput {
            shoot: true,
            move_left: true,
            ..Default::default()
        };
        for i in 0..600 {
            let now = i as f64 * SIM_DT;
            tick(&mut a, &input, now);
            tick(&mut b, &input, now);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.eggs.len(), b.eggs.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
