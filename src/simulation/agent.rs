//! Agent state and lifecycle.
//!
//! An agent is alive from the moment its generation starts until the tick it
//! dies. Its fitness is written exactly once, at death; after that nothing
//! about it changes until the population is replaced.

use rand::Rng;

use super::brain::Genome;
use super::params::Params;

/// A flapping agent controlled by a genome.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Horizontal position, fixed for the whole run.
    pub x: f32,
    /// Vertical position (down is positive).
    pub y: f32,
    /// Vertical velocity.
    pub dy: f32,
    /// Collision radius.
    pub radius: f32,
    /// Display hue in degrees, only used for drawing.
    pub hue: u16,
    alive: bool,
    fitness: f32,
    genome: Genome,
}

impl Agent {
    /// Spawns an agent at a random height in the middle half of the playfield.
    pub fn spawn<R: Rng + ?Sized>(genome: Genome, params: &Params, rng: &mut R) -> Self {
        let y = rng.random::<f32>() * params.height / 2.0 + params.height / 4.0;
        let hue = rng.random_range(0..=360);
        Self::at(genome, params.agent_x, y, params.agent_radius, hue)
    }

    /// Creates a live agent at an explicit position, at rest.
    pub fn at(genome: Genome, x: f32, y: f32, radius: f32, hue: u16) -> Self {
        Self {
            x,
            y,
            dy: 0.0,
            radius,
            hue,
            alive: true,
            fitness: 0.0,
            genome,
        }
    }

    /// Checks if the agent is alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Fitness assigned at death. Zero while alive.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// The network steering this agent.
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Marks the agent dead with its final fitness.
    ///
    /// Dead agents are frozen: later calls leave the first fitness in place.
    pub fn kill(&mut self, fitness: f32) {
        if self.alive {
            self.alive = false;
            self.fitness = fitness;
        }
    }
}
