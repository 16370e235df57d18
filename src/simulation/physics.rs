//! Per-tick movement, collision and control.
//!
//! Each live agent, in order: falls under gravity (clamped), moves, looks up
//! the obstacle it is heading for, dies on a boundary or obstacle hit, and
//! otherwise asks its network whether to flap.

use super::agent::Agent;
use super::error::SimError;
use super::obstacle::{Obstacle, ObstacleTrack};
use super::params::Params;

/// Network inputs for an agent heading toward `next`.
///
/// Horizontal distance to the obstacle scaled by the playfield width, and the
/// vertical offset to the gap center shifted into `[0, 1]` for on-screen
/// positions.
pub fn sense(agent: &Agent, next: &Obstacle, params: &Params) -> [f32; 2] {
    [
        (next.x - agent.x) / params.width,
        (next.gap_y - agent.y + params.height) / (params.height * 2.0),
    ]
}

/// Whether the agent's circle overlaps the solid part of `obstacle`.
pub fn collides(agent: &Agent, obstacle: &Obstacle, obstacle_width: f32) -> bool {
    let half_width = obstacle_width * 0.5;
    if agent.x - agent.radius > obstacle.x + half_width
        || obstacle.x - half_width > agent.x + agent.radius
    {
        return false;
    }
    agent.y - agent.radius < obstacle.gap_top() || agent.y + agent.radius > obstacle.gap_bottom()
}

/// Obstacle collision test against the track.
///
/// Only the front obstacle is tested. The second obstacle never counts, even
/// when the agent is inside its footprint.
pub fn hits_track(
    agent: &Agent,
    track: &ObstacleTrack,
    params: &Params,
) -> Result<bool, SimError> {
    let (first, _) = track.leading_pair()?;
    Ok(collides(agent, first, params.obstacle_width))
}

/// Whether the agent has left `[0, height]`.
pub fn out_of_bounds(agent: &Agent, params: &Params) -> bool {
    agent.y < 0.0 || agent.y > params.height
}

/// Advances one agent by a tick. Dead agents are left untouched.
///
/// `score` is the number of ticks survived so far this generation.
pub fn step_agent(
    agent: &mut Agent,
    track: &ObstacleTrack,
    score: u64,
    params: &Params,
) -> Result<(), SimError> {
    if !agent.is_alive() {
        return Ok(());
    }

    agent.dy = (agent.dy + params.gravity).min(params.max_fall_speed);
    agent.y += agent.dy;

    let next = track.next_for(agent.x)?;

    if out_of_bounds(agent, params) || hits_track(agent, track, params)? {
        let fitness = score as f32 - (agent.y - next.gap_y).abs();
        log::trace!("agent died at y={:.1} with fitness {:.1}", agent.y, fitness);
        agent.kill(fitness);
        return Ok(());
    }

    let output = agent.genome().evaluate(&sense(agent, next, params))?;
    if output > params.jump_threshold {
        agent.dy = params.jump_impulse;
    }
    Ok(())
}

/// Advances every live agent by a tick and returns how many are still alive.
pub fn step_population(
    population: &mut [Agent],
    track: &ObstacleTrack,
    score: u64,
    params: &Params,
) -> Result<usize, SimError> {
    let mut alive = 0;
    for agent in population.iter_mut() {
        step_agent(agent, track, score, params)?;
        if agent.is_alive() {
            alive += 1;
        }
    }
    Ok(alive)
}
