//! Collision detection and response
//!
//! Everything is axis-aligned rectangle overlap. Three independent passes run
//! each tick, one per entity-pair category; within a pass, encounter order
//! over the collections decides simultaneous hits. Removal is deferred until
//! after the scan so iteration never mutates the list it walks.

use glam::Vec2;
use rand::Rng;

use super::state::{Explosion, GameEvent, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Shrink by `inset` on every side. Used to keep hitboxes a little
    /// tighter than the sprite so grazing shots don't register.
    pub fn shrunk(&self, inset: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(inset),
            max: self.max - Vec2::splat(inset),
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Pass 1: player projectiles against the wave.
///
/// Each hit removes one projectile and one enemy, scores, spawns an explosion
/// at the enemy's center, and rolls the power-up drop.
pub fn projectiles_vs_enemies(state: &mut GameState) {
    let GameState {
        player,
        enemies,
        explosions,
        powerups,
        rng,
        score,
        events,
        ..
    } = state;

    let mut spent = vec![false; player.projectiles.len()];
    let mut killed = vec![false; enemies.len()];

    for (pi, projectile) in player.projectiles.iter().enumerate() {
        let shot_box = Rect::centered(projectile.pos, projectile.size());
        for (ei, enemy) in enemies.iter().enumerate() {
            if killed[ei] {
                continue;
            }
            let enemy_box = Rect::centered(enemy.pos, enemy.size()).shrunk(HITBOX_INSET);
            if shot_box.overlaps(&enemy_box) {
                spent[pi] = true;
                killed[ei] = true;
                break;
            }
        }
    }

    for (ei, enemy) in enemies.iter().enumerate() {
        if !killed[ei] {
            continue;
        }
        *score += SCORE_PER_KILL;
        explosions.push(Explosion::new(enemy.pos));
        events.push(GameEvent::EnemyDestroyed);

        if rng.random_bool(POWERUP_DROP_CHANCE) {
            let kind = match rng.random_range(0..3) {
                0 => PowerUpKind::Triple,
                1 => PowerUpKind::Laser,
                _ => PowerUpKind::Multi,
            };
            powerups.push(PowerUp::new(enemy.pos, kind, rng));
        }
    }

    let mut i = 0;
    player.projectiles.retain(|_| {
        let keep = !spent[i];
        i += 1;
        keep
    });
    let mut i = 0;
    enemies.retain(|_| {
        let keep = !killed[i];
        i += 1;
        keep
    });
}

/// Pass 2: falling eggs against the player.
///
/// Each hit removes the egg, costs a life, spawns an explosion at the player,
/// and strips the active power-up.
pub fn eggs_vs_player(state: &mut GameState) {
    let GameState {
        player,
        eggs,
        explosions,
        lives,
        events,
        ..
    } = state;

    let player_box = Rect::centered(player.pos, player.size()).shrunk(HITBOX_INSET);
    let mut hit_any = false;

    eggs.retain(|egg| {
        let egg_box = Rect::centered(egg.pos, egg.size()).shrunk(HITBOX_INSET);
        if egg_box.overlaps(&player_box) {
            *lives = lives.saturating_sub(1);
            explosions.push(Explosion::new(player.pos));
            events.push(GameEvent::PlayerHit);
            hit_any = true;
            false
        } else {
            true
        }
    });

    // Taking damage strips the buff
    if hit_any {
        player.powerup = None;
    }
}

/// Pass 3: falling power-ups against the player. Full-size boxes, no inset.
pub fn powerups_vs_player(state: &mut GameState, now: f64) {
    let GameState {
        player,
        powerups,
        events,
        ..
    } = state;

    let player_box = Rect::centered(player.pos, player.size());

    powerups.retain(|powerup| {
        let pickup_box = Rect::centered(powerup.pos, powerup.size());
        if pickup_box.overlaps(&player_box) {
            player.activate_powerup(powerup.kind, now);
            events.push(GameEvent::PowerUpCollected);
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Egg, Enemy, Projectile};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1)
    }

    #[test]
    fn rect_overlap_basics() {
        let a = Rect::centered(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::centered(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Rect::centered(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn rect_touching_edges_do_not_overlap() {
        let a = Rect::centered(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::centered(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn shrunk_rect_rejects_grazing_hit() {
        let enemy = Rect::centered(Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0));
        // A shot clipping 3 px into the sprite edge
        let shot = Rect::centered(Vec2::new(27.0, 0.0), Vec2::new(10.0, 20.0));

        assert!(enemy.overlaps(&shot));
        assert!(!enemy.shrunk(HITBOX_INSET).overlaps(&shot));
    }

    #[test]
    fn projectile_hit_removes_both_and_scores() {
        let mut state = GameState::new(1);
        let target = Vec2::new(400.0, 300.0);
        state.enemies.push(Enemy::new(target, &mut rng()));
        state.player.projectiles.push(Projectile::basic(target));

        projectiles_vs_enemies(&mut state);

        assert!(state.enemies.is_empty());
        assert!(state.player.projectiles.is_empty());
        assert_eq!(state.score, SCORE_PER_KILL);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.events, vec![GameEvent::EnemyDestroyed]);
    }

    #[test]
    fn one_projectile_kills_at_most_one_enemy() {
        let mut state = GameState::new(1);
        let target = Vec2::new(400.0, 300.0);
        // Two enemies stacked on the same spot, one shot
        state.enemies.push(Enemy::new(target, &mut rng()));
        state.enemies.push(Enemy::new(target, &mut rng()));
        state.player.projectiles.push(Projectile::basic(target));

        projectiles_vs_enemies(&mut state);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, SCORE_PER_KILL);
    }

    #[test]
    fn egg_hit_costs_life_and_strips_powerup() {
        let mut state = GameState::new(1);
        state.player.activate_powerup(PowerUpKind::Multi, 0.0);
        state.eggs.push(Egg::new(state.player.pos, &mut rng()));

        eggs_vs_player(&mut state);

        assert!(state.eggs.is_empty());
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.player.current_powerup(), None);
        assert_eq!(state.events, vec![GameEvent::PlayerHit]);
    }

    #[test]
    fn lives_saturate_at_zero() {
        let mut state = GameState::new(1);
        state.lives = 0;
        state.eggs.push(Egg::new(state.player.pos, &mut rng()));

        eggs_vs_player(&mut state);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn powerup_pickup_activates_and_removes() {
        let mut state = GameState::new(1);
        state
            .powerups
            .push(PowerUp::new(state.player.pos, PowerUpKind::Laser, &mut rng()));

        powerups_vs_player(&mut state, 5.0);

        assert!(state.powerups.is_empty());
        assert_eq!(state.player.current_powerup(), Some(PowerUpKind::Laser));
        let active = state.player.powerup.unwrap();
        assert_eq!(active.until, 5.0 + POWERUP_DURATION_SECS);
        assert_eq!(state.events, vec![GameEvent::PowerUpCollected]);
    }

    #[test]
    fn distant_powerup_is_left_alone() {
        let mut state = GameState::new(1);
        state
            .powerups
            .push(PowerUp::new(Vec2::new(100.0, 100.0), PowerUpKind::Triple, &mut rng()));

        powerups_vs_player(&mut state, 0.0);

        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.player.current_powerup(), None);
    }
}
