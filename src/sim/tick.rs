//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one host frame. The order of
//! the passes below is part of the contract: tests replay it exactly.

use super::collision::{bullet_hits, hits_player};
use super::input::TickInput;
use super::spawn::{obstacle_speed, roll_obstacle, spawn_interval};
use super::state::{GameEvent, GamePhase, GameState};
use crate::sanitize_delta;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Menu and GameOver are frozen
    if !state.is_playing() {
        return;
    }

    let dt = sanitize_delta(dt);
    state.events.clear();
    state.time_ticks += 1;

    // Input is visible to this tick's collision tests
    if let Some(lane) = input.lane {
        state.player_lane = lane.min(state.tuning.last_lane());
    }
    if input.shoot {
        state.fire_bullet();
    }

    state.elapsed += f64::from(dt);

    // Difficulty ramp, fresh from the current score
    let speed = obstacle_speed(state.score, &state.tuning);
    let interval = spawn_interval(state.score, &state.tuning);

    // Spawn
    if state.elapsed - state.last_spawn > f64::from(interval) {
        state.last_spawn = state.elapsed;
        let (lane, kind) = roll_obstacle(&mut state.rng, &state.tuning);
        let id = state.spawn_obstacle(lane, kind);
        log::debug!("Spawned {:?} #{} in lane {}", kind, id, lane);
    }

    // Advance obstacles, award the ones that made it past the player
    let step = speed * dt;
    for obstacle in state.obstacles.iter_active_mut() {
        obstacle.z += step;
        if obstacle.z > state.tuning.despawn_z {
            obstacle.active = false;
            state.score += state.tuning.survive_score;
            state.events.push(GameEvent::Survived { id: obstacle.id });
        }
    }

    // Player collision ends the run on the spot
    let crash = state
        .obstacles
        .iter_active()
        .find(|o| hits_player(o, state.player_lane, &state.tuning))
        .map(|o| o.id);
    if let Some(obstacle) = crash {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Crashed { obstacle });
        log::info!(
            "Crashed into #{} in lane {} - final score {} after {:.1}s",
            obstacle,
            state.player_lane,
            state.score,
            state.elapsed
        );
        compact(state);
        return;
    }

    // Advance bullets, drop the ones that left the track
    let bullet_despawn_z = state.tuning.bullet_despawn_z();
    for bullet in state.bullets.iter_active_mut() {
        bullet.z -= bullet.speed * dt;
        if bullet.z < bullet_despawn_z {
            bullet.active = false;
        }
    }

    // Bullets vs enemies, each entity resolves at most once
    for bullet in state.bullets.iter_active_mut() {
        for obstacle in state.obstacles.iter_active_mut() {
            if bullet_hits(bullet, obstacle, &state.tuning) {
                bullet.active = false;
                obstacle.active = false;
                state.score += state.tuning.kill_score;
                state.events.push(GameEvent::Destroyed {
                    obstacle: obstacle.id,
                    bullet: bullet.id,
                });
                log::debug!("Bullet #{} destroyed enemy #{}", bullet.id, obstacle.id);
                break;
            }
        }
    }

    compact(state);
}

fn compact(state: &mut GameState) {
    state.obstacles.compact();
    state.bullets.compact();
}
