//! Fixed timestep simulation tick
//!
//! Advances one run deterministically: integrate, detect contacts, resolve
//! velocity per contact, then controls, hazards, and dust.

use glam::Vec2;
use rand::Rng;

use super::slope::SlopeResolver;
use super::state::{Actor, DustParticle, GamePhase, GameState, MAX_DUST_PARTICLES, RunOutcome};
use super::terrain::{Contact, Terrain};
use crate::consts::*;

/// Input sampled once per tick. Movement keys are held state; pause and
/// restart are edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dive: bool,
    pub pause: bool,
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::Complete(_) => {}
        }
    }
    if input.restart {
        state.reset();
        return;
    }
    match state.phase {
        GamePhase::Paused | GamePhase::Complete(_) => return,
        GamePhase::Playing => {}
    }

    // End conditions carry over from last tick's state
    if state.health <= 0 {
        state.phase = GamePhase::Complete(RunOutcome::Wrecked);
        log::info!("run wrecked after {:.1}s", state.time_secs());
        return;
    }
    if state.actor.pos.x >= state.finish_x() || state.actor.pos.y < FALL_OUT_Y {
        state.phase = GamePhase::Complete(RunOutcome::Cleared);
        log::info!("run cleared in {:.1}s", state.time_secs());
        return;
    }

    state.time_ticks += 1;
    if state.invuln_secs > 0.0 {
        state.invuln_secs = (state.invuln_secs - dt).max(0.0);
    }

    state.actor.prev_speed = state.actor.speed();

    // Integrate, then resolve whatever we ran into
    state.actor.pos += state.actor.vel * dt;
    let contacts = state.terrain.contacts(&state.actor.aabb());

    apply_hazards(state);

    state.actor.grounded = !contacts.is_empty();
    if contacts.is_empty() {
        // Plain gravity, clamped to terminal fall speed
        let actor = &mut state.actor;
        actor.vel.y -= GRAVITY * dt * FRAME_SCALE;
        if actor.vel.y < -MAX_FALL_SPEED {
            actor.vel.y = -MAX_FALL_SPEED;
        }
        actor.vel *= 1.0 - actor.air_friction;
    } else {
        resolve_contacts(
            &mut state.actor,
            &state.terrain,
            &state.resolver,
            &contacts,
            dt,
        );
    }

    apply_controls(&mut state.actor, input, dt);
    cap_ground_speed(&mut state.actor);
    update_dust(state, dt);

    state.actor.walking = state.actor.vel.x.abs() > 15.0;
}

/// The per-tick contact resolution loop.
///
/// Slopes run the resolver then settle out of the surface with the capped
/// nudge loop; flat contacts ground the actor and bleed horizontal speed.
/// After a slope, a flat next contact (or none) ends the pass.
fn resolve_contacts(
    actor: &mut Actor,
    terrain: &Terrain,
    resolver: &SlopeResolver,
    contacts: &[Contact],
    dt: f32,
) {
    for (i, contact) in contacts.iter().enumerate() {
        if contact.angle_deg.abs() > FLAT_ANGLE_EPS {
            let response = resolver.resolve(contact.angle_deg, actor.vel, dt);
            actor.vel = response.velocity;
            if response.promote_airborne {
                actor.grounded = false;
            }

            let Some(tile) = terrain.tile(contact.tile) else {
                break;
            };
            let local = tile.to_local(actor.pos);

            if !nudge_clear(actor, terrain, contact.tile) {
                actor.grounded = false;
                return;
            }
            // Rest right at the boundary
            actor.pos.y -= 1.0;

            // Contact under the tile's belly: pop onto the top face instead
            if local.y < -contact.half_height {
                actor.vel.y += 5.0;
                let lifted = Vec2::new(local.x, -contact.half_height + actor.half_height() + 5.0);
                actor.pos = tile.to_world(lifted);
            }

            // First slope wins
            match contacts.get(i + 1) {
                Some(next) if next.angle_deg.abs() <= FLAT_ANGLE_EPS => break,
                None => break,
                Some(_) => {}
            }
        } else {
            // Flat ground: never sink, bleed horizontal speed
            actor.vel.y = actor.vel.y.max(0.0);
            actor.vel.x *= actor.friction;
            if !nudge_clear(actor, terrain, contact.tile) {
                actor.grounded = false;
                return;
            }
        }
    }
}

/// Step the actor upward one unit at a time until the tile stops
/// overlapping. Returns false when the cap runs out - the caller degrades
/// to airborne rather than looping forever.
fn nudge_clear(actor: &mut Actor, terrain: &Terrain, tile: usize) -> bool {
    let mut steps = 0;
    while terrain.tile_overlaps(tile, &actor.aabb()) {
        actor.pos.y += 1.0;
        steps += 1;
        if steps >= MAX_NUDGE_STEPS {
            log::warn!("penetration unresolved after {MAX_NUDGE_STEPS} nudges, going airborne");
            return false;
        }
    }
    true
}

/// Spike overlap: damage, knock upward, open the immunity window
fn apply_hazards(state: &mut GameState) {
    if state.invuln_secs > 0.0 {
        return;
    }
    let aabb = state.actor.aabb();
    if state.hazards.iter().any(|s| s.overlaps_aabb(&aabb)) {
        state.health -= SPIKE_DAMAGE;
        state.actor.pos.y += 25.0;
        state.actor.vel.y += 50.0;
        state.invuln_secs = INVULN_SECS;
        log::debug!("spiked, {} hp left", state.health);
    }
}

fn apply_controls(actor: &mut Actor, input: &TickInput, dt: f32) {
    let control = if actor.grounded { 1.0 } else { AIR_CONTROL };
    if input.left {
        actor.facing = -1;
        actor.vel.x -= MOVE_ACCEL * dt * control;
    }
    if input.right {
        actor.facing = 1;
        actor.vel.x += MOVE_ACCEL * dt * control;
    }
    if input.jump && actor.grounded {
        actor.vel.y = JUMP_SPEED;
        actor.grounded = false;
    }
    if input.dive && actor.grounded {
        actor.vel.x += BOOST_ACCEL * f32::from(actor.facing) * dt;
    }
}

/// Uniformly rescale velocity to the cap while grounded
fn cap_ground_speed(actor: &mut Actor) {
    if !actor.grounded {
        return;
    }
    let speed = actor.speed();
    if speed > actor.speed_cap {
        actor.vel *= actor.speed_cap / speed;
    }
}

/// Kick up dust at the actor's heels while skidding along the ground
fn update_dust(state: &mut GameState, dt: f32) {
    state.particles.retain_mut(|p| p.update(dt));

    // Resting contact flickers between grounded and airborne tick to tick,
    // so the timer carries across the gaps instead of resetting
    let xs = state.actor.vel.x;
    if !state.actor.grounded || xs.abs() <= 50.0 {
        return;
    }

    state.dust_timer += dt;
    if state.dust_timer < 0.05 {
        return;
    }
    state.dust_timer = 0.0;

    let heel = Vec2::new(
        state.actor.pos.x - 10.0 * f32::from(state.actor.facing),
        state.actor.pos.y - state.actor.half_height() + 5.0,
    );
    let count = ((xs.abs() / 100.0) as usize).min(5);
    for _ in 0..count {
        if state.particles.len() >= MAX_DUST_PARTICLES {
            break;
        }
        let vel = Vec2::new(
            state.rng.random_range(-30.0..30.0) + xs * 0.1,
            state.rng.random_range(5.0..25.0),
        );
        state.particles.push(DustParticle {
            pos: heel,
            vel,
            radius: state.rng.random_range(1.0..3.0),
            age: 0.0,
            lifetime: 0.4,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::TerrainTile;

    /// A run with hand-placed terrain instead of the generated level
    fn state_with_tiles(tiles: Vec<TerrainTile>) -> GameState {
        let mut state = GameState::new(1, 42);
        state.terrain = Terrain::new(tiles);
        state.hazards.clear();
        state
    }

    fn flat_tile(center: Vec2) -> TerrainTile {
        TerrainTile::new(center, 0.0, Vec2::new(200.0, 16.0))
    }

    #[test]
    fn test_no_contacts_means_airborne() {
        let mut state = state_with_tiles(vec![]);
        state.actor.pos = Vec2::new(400.0, 1000.0);
        state.actor.vel = Vec2::new(0.0, -100.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.actor.grounded);
        assert!(state.actor.vel.y < -100.0);
    }

    #[test]
    fn test_fall_speed_clamped() {
        let mut state = state_with_tiles(vec![]);
        state.actor.pos = Vec2::new(400.0, 40000.0);
        state.actor.vel = Vec2::new(0.0, -790.0);

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.actor.vel.y >= -MAX_FALL_SPEED - 0.001);
    }

    #[test]
    fn test_flat_landing_settles_on_surface() {
        // Falling hard onto level ground: vertical velocity dies, the actor
        // grounds, and no overlap remains
        let tile = flat_tile(Vec2::new(400.0, 0.0));
        let mut state = state_with_tiles(vec![tile.clone()]);
        state.actor.pos = Vec2::new(400.0, 10.0);
        state.actor.vel = Vec2::new(0.0, -1000.0);

        tick(&mut state, &TickInput::default(), 0.016);

        assert!(state.actor.grounded);
        assert_eq!(state.actor.vel.y, 0.0);
        assert!(!tile.overlaps_aabb(&state.actor.aabb()));
    }

    #[test]
    fn test_flat_drag_never_amplifies() {
        let mut state = state_with_tiles(vec![flat_tile(Vec2::new(400.0, 0.0))]);
        state.actor.pos = Vec2::new(400.0, 20.0);
        state.actor.vel = Vec2::new(100.0, 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.actor.grounded);
        assert!(state.actor.vel.x.abs() <= 100.0);
    }

    #[test]
    fn test_slope_contact_keeps_normal_component_clean() {
        let tile = TerrainTile::new(Vec2::new(400.0, 0.0), 30.0, Vec2::new(200.0, 16.0));
        let mut state = state_with_tiles(vec![tile]);
        state.actor.pos = Vec2::new(400.0, 20.0);
        state.actor.vel = Vec2::new(500.0, -200.0);

        tick(&mut state, &TickInput::default(), 0.016);

        let rad = 30.0_f32.to_radians();
        let normal = Vec2::new(-rad.sin(), rad.cos());
        assert!(state.actor.vel.dot(normal) >= -0.01);
    }

    #[test]
    fn test_fast_slope_contact_promotes_airborne() {
        let tile = TerrainTile::new(Vec2::new(400.0, 0.0), 30.0, Vec2::new(400.0, 16.0));
        let mut state = state_with_tiles(vec![tile]);
        state.actor.pos = Vec2::new(400.0, 20.0);
        state.actor.vel = Vec2::new(1900.0, -100.0);

        tick(&mut state, &TickInput::default(), 0.016);
        assert!(!state.actor.grounded);
    }

    #[test]
    fn test_unresolvable_penetration_degrades_to_airborne() {
        // Actor buried in the middle of an absurdly thick tile: the nudge
        // cap trips and the tick bails out instead of spinning
        let tile = TerrainTile::new(Vec2::new(400.0, 0.0), 5.0, Vec2::new(64.0, 10000.0));
        let mut state = state_with_tiles(vec![tile]);
        state.actor.pos = Vec2::new(400.0, 0.0);
        state.actor.vel = Vec2::new(0.0, -10.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.actor.grounded);
    }

    #[test]
    fn test_first_slope_wins_skips_flat_neighbor() {
        let slope = TerrainTile::new(Vec2::new(390.0, 0.0), 20.0, Vec2::new(200.0, 16.0));
        let flat = flat_tile(Vec2::new(410.0, 0.0));

        let mut both = state_with_tiles(vec![slope.clone(), flat]);
        both.actor.pos = Vec2::new(400.0, 18.0);
        both.actor.vel = Vec2::new(300.0, -150.0);

        let mut slope_only = state_with_tiles(vec![slope]);
        slope_only.actor.pos = Vec2::new(400.0, 18.0);
        slope_only.actor.vel = Vec2::new(300.0, -150.0);

        tick(&mut both, &TickInput::default(), SIM_DT);
        tick(&mut slope_only, &TickInput::default(), SIM_DT);

        // The flat tile after the slope is never processed, so both runs
        // resolve to the same velocity
        assert!((both.actor.vel - slope_only.actor.vel).length() < 0.001);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut state = state_with_tiles(vec![]);
        state.actor.pos = Vec2::new(400.0, 1000.0);
        state.actor.vel = Vec2::ZERO;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.actor.vel.y < 0.0);

        let mut state = state_with_tiles(vec![flat_tile(Vec2::new(400.0, 0.0))]);
        state.actor.pos = Vec2::new(400.0, 20.0);
        state.actor.vel = Vec2::ZERO;
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.actor.vel.y, JUMP_SPEED);
        assert!(!state.actor.grounded);
    }

    #[test]
    fn test_ground_speed_cap() {
        let mut state = state_with_tiles(vec![flat_tile(Vec2::new(400.0, 0.0))]);
        state.actor.pos = Vec2::new(400.0, 20.0);
        state.actor.vel = Vec2::new(5000.0, 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.actor.speed() <= state.actor.speed_cap + 0.001);
    }

    #[test]
    fn test_spike_damage_once_per_window() {
        let mut state = state_with_tiles(vec![]);
        state.actor.pos = Vec2::new(400.0, 1000.0);
        state.actor.vel = Vec2::ZERO;
        state.hazards = vec![TerrainTile::new(
            Vec2::new(400.0, 1000.0),
            0.0,
            Vec2::new(26.0, 26.0),
        )];

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.health, 100 - SPIKE_DAMAGE);
        assert!(state.invuln_secs > 0.0);
        assert!(state.actor.vel.y > 0.0);

        // Still overlapping, but immune
        state.actor.pos = Vec2::new(400.0, 1000.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.health, 100 - SPIKE_DAMAGE);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = state_with_tiles(vec![]);
        state.actor.pos = Vec2::new(400.0, 1000.0);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Paused runs don't advance
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_run_clears_at_finish_line() {
        let mut state = state_with_tiles(vec![]);
        state.actor.pos = Vec2::new(state.finish_x() + 1.0, 300.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Complete(RunOutcome::Cleared));
    }

    #[test]
    fn test_run_clears_on_drop_out() {
        let mut state = state_with_tiles(vec![]);
        state.actor.pos = Vec2::new(500.0, FALL_OUT_Y - 10.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Complete(RunOutcome::Cleared));
    }

    #[test]
    fn test_run_wrecks_at_zero_health() {
        let mut state = state_with_tiles(vec![]);
        state.actor.pos = Vec2::new(400.0, 1000.0);
        state.health = 0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Complete(RunOutcome::Wrecked));
    }

    #[test]
    fn test_dust_only_while_skidding() {
        let mut state = state_with_tiles(vec![flat_tile(Vec2::new(400.0, 0.0))]);
        state.actor.pos = Vec2::new(400.0, 20.0);
        state.actor.vel = Vec2::new(600.0, 0.0);

        for _ in 0..20 {
            tick(&mut state, &TickInput {
                right: true,
                ..Default::default()
            }, SIM_DT);
        }
        assert!(!state.particles.is_empty());
        assert!(state.particles.len() <= MAX_DUST_PARTICLES);
    }

    #[test]
    fn test_determinism() {
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        let mut a = GameState::new(2, 777);
        let mut b = GameState::new(2, 777);
        for _ in 0..600 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.actor.pos, b.actor.pos);
        assert_eq!(a.actor.vel, b.actor.vel);
        assert_eq!(a.time_ticks, b.time_ticks);
    }
}
