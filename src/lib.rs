//! # Flappy Evo - Neuroevolution of Flapping Agents
//!
//! A population of tiny feed-forward networks learns to steer agents through
//! a scrolling track of gap obstacles. Every agent that survives longer, or
//! dies closer to the gap it was aiming for, gets a better fitness, and the
//! fittest genomes breed the next generation.
//!
//! ## Features
//!
//! - Fixed 2-5-1 perceptron with logistic activation
//! - Elitist genetic algorithm (cloning, bias mutation, bias crossover)
//! - Deterministic per-tick physics with gravity, speed clamp and collisions
//! - Recycling obstacle track
//! - Seedable randomness for reproducible runs
//! - Real-time visualization with macroquad
//!
//! ## Core Modules
//!
//! - [`simulation::brain`] - Genome and network evaluation
//! - [`simulation::agent`] - Agent state and lifecycle
//! - [`simulation::obstacle`] - Scrolling obstacle track
//! - [`simulation::physics`] - Per-tick movement, collision and control
//! - [`simulation::evolution`] - Generation lifecycle and breeding operators
//! - [`simulation::params`] - Simulation parameters

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agents steered by a genome.
    pub mod agent;
    /// Genome representation and forward evaluation.
    pub mod brain;
    /// Error types shared by every simulation component.
    pub mod error;
    /// Generation lifecycle, selection and breeding.
    pub mod evolution;
    /// Scrolling, recycling obstacle track.
    pub mod obstacle;
    /// Simulation parameters.
    pub mod params;
    /// Per-tick movement, collision and control step.
    pub mod physics;
    /// Selection, mutation and crossover operators.
    pub mod reproduction;
}
