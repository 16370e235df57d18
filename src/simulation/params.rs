use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, SimError};

/// Simulation parameters that control physics, the track and breeding.
///
/// Missing fields in a JSON document fall back to [`Params::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Playfield width.
    pub width: f32,
    /// Playfield height. Agents die when they leave `[0, height]`.
    pub height: f32,
    /// Target number of agents per generation.
    pub population_size: usize,
    /// Number of fittest agents kept as breeding stock.
    pub elite_size: usize,
    /// Fixed horizontal position of every agent.
    pub agent_x: f32,
    /// Agent collision radius.
    pub agent_radius: f32,
    /// Downward acceleration added to velocity each tick.
    pub gravity: f32,
    /// Velocity set when the network decides to flap (negative is up).
    pub jump_impulse: f32,
    /// Maximum downward speed.
    pub max_fall_speed: f32,
    /// Network output above which the agent flaps.
    pub jump_threshold: f32,
    /// Vertical size of the opening in each obstacle.
    pub obstacle_gap: f32,
    /// Horizontal distance between consecutive obstacles.
    pub obstacle_spacing: f32,
    /// Horizontal footprint of an obstacle.
    pub obstacle_width: f32,
    /// Horizontal displacement per tick (negative moves toward agents).
    pub obstacle_speed: f32,
    /// Number of obstacles on the track.
    pub obstacle_count: usize,
    /// First obstacle spawns at `width * obstacle_start_fraction`.
    pub obstacle_start_fraction: f32,
    /// Fraction of the height kept free of gap centers at top and bottom.
    pub gap_margin_fraction: f32,
    /// Initial weights and biases are drawn from `[-range, range)`.
    pub init_weight_range: f32,
    /// Per-bias probability of mutation.
    pub mutation_rate: f32,
    /// Width of the zero-centered mutation factor range.
    pub mutation_scale: f32,
    /// Per-bias probability of swapping during crossover.
    pub crossover_rate: f32,
    /// Vertical position agents are moved to by the nudge command.
    pub nudge_y: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            population_size: 200,
            elite_size: 20,
            agent_x: 80.0,
            agent_radius: 8.0,
            gravity: 0.25,
            jump_impulse: -7.0,
            max_fall_speed: 9.0,
            jump_threshold: 0.5,
            obstacle_gap: 150.0,
            obstacle_spacing: 400.0,
            obstacle_width: 64.0,
            obstacle_speed: -4.0,
            obstacle_count: 4,
            obstacle_start_fraction: 0.75,
            gap_margin_fraction: 0.15,
            init_weight_range: 0.5,
            mutation_rate: 0.2,
            mutation_scale: 3.0,
            crossover_rate: 0.2,
            nudge_y: -100.0,
        }
    }
}

impl Params {
    /// Parses parameters from a JSON string and validates them.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads parameters from a JSON file and validates them.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks every value for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ConfigError::InvalidPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.elite_size == 0 || self.elite_size > self.population_size {
            return Err(ConfigError::InvalidEliteSize {
                elite_size: self.elite_size,
                population_size: self.population_size,
            });
        }
        if self.obstacle_count < 2 {
            return Err(ConfigError::TooFewObstacles(self.obstacle_count));
        }

        for (name, value) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
            ("obstacle_start_fraction", self.obstacle_start_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        if !(0.0..0.5).contains(&self.gap_margin_fraction) {
            return Err(ConfigError::InvalidProbability {
                name: "gap_margin_fraction",
                value: self.gap_margin_fraction,
            });
        }

        for (name, value) in [
            ("agent_radius", self.agent_radius),
            ("max_fall_speed", self.max_fall_speed),
            ("obstacle_gap", self.obstacle_gap),
            ("obstacle_spacing", self.obstacle_spacing),
            ("obstacle_width", self.obstacle_width),
            ("init_weight_range", self.init_weight_range),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        for (name, value) in [
            ("agent_x", self.agent_x),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("jump_threshold", self.jump_threshold),
            ("obstacle_speed", self.obstacle_speed),
            ("mutation_scale", self.mutation_scale),
            ("nudge_y", self.nudge_y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        Ok(())
    }
}
