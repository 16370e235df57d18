//! The scrolling obstacle track.
//!
//! Obstacles are vertical walls with a gap. The track scrolls them toward the
//! agents and recycles the one leaving the left edge to the back of the line,
//! so the track length never changes and always holds at least two entries.

use std::collections::VecDeque;

use rand::Rng;

use super::error::SimError;
use super::params::Params;

/// A wall with a single opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Horizontal center.
    pub x: f32,
    /// Vertical center of the gap.
    pub gap_y: f32,
    /// Vertical size of the gap.
    pub gap: f32,
}

impl Obstacle {
    /// Top edge of the gap.
    pub fn gap_top(&self) -> f32 {
        self.gap_y - self.gap * 0.5
    }

    /// Bottom edge of the gap.
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + self.gap * 0.5
    }
}

/// Ordered ring of obstacles, front is the one nearest the left edge.
#[derive(Debug, Clone)]
pub struct ObstacleTrack {
    obstacles: VecDeque<Obstacle>,
}

impl ObstacleTrack {
    /// Builds a track from explicit obstacles.
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Result<Self, SimError> {
        if obstacles.len() < 2 {
            return Err(SimError::InvariantViolation(format!(
                "obstacle track needs at least 2 obstacles, got {}",
                obstacles.len()
            )));
        }
        Ok(Self {
            obstacles: obstacles.into(),
        })
    }

    /// Creates a freshly laid out track.
    pub fn new<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Self, SimError> {
        let mut track = Self {
            obstacles: VecDeque::with_capacity(params.obstacle_count),
        };
        track.reset(params, rng)?;
        Ok(track)
    }

    /// Re-lays the whole track: `obstacle_count` obstacles spaced
    /// `obstacle_spacing` apart, the first at `width * obstacle_start_fraction`,
    /// each with an independent gap center inside the safe vertical band.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        params: &Params,
        rng: &mut R,
    ) -> Result<(), SimError> {
        if params.obstacle_count < 2 {
            return Err(SimError::InvariantViolation(format!(
                "obstacle track needs at least 2 obstacles, got {}",
                params.obstacle_count
            )));
        }

        let base = params.width * params.obstacle_start_fraction;
        let margin = params.height * params.gap_margin_fraction;
        let band = params.height - 2.0 * margin;

        self.obstacles.clear();
        for i in 0..params.obstacle_count {
            self.obstacles.push_back(Obstacle {
                x: base + i as f32 * params.obstacle_spacing,
                gap_y: rng.random::<f32>() * band + margin,
                gap: params.obstacle_gap,
            });
        }
        Ok(())
    }

    /// Shifts every obstacle horizontally by `speed`.
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x += speed;
        }
    }

    /// Moves the front obstacle to the back once it has fully left the
    /// playfield (its center is more than half a width past zero).
    ///
    /// The gap center is kept. Returns `true` if an obstacle was recycled.
    pub fn recycle(&mut self, spacing: f32, width: f32) -> bool {
        if self.obstacles.len() < 2 {
            return false;
        }
        let leaves = self
            .obstacles
            .front()
            .is_some_and(|front| front.x < -width * 0.5);
        if !leaves {
            return false;
        }

        let last_x = self.obstacles.back().map_or(0.0, |back| back.x);
        if let Some(mut obstacle) = self.obstacles.pop_front() {
            obstacle.x = last_x + spacing;
            log::debug!("recycled obstacle to x={:.1}", obstacle.x);
            self.obstacles.push_back(obstacle);
            return true;
        }
        false
    }

    /// The obstacle an agent at `x` is heading for: the front obstacle if it
    /// is still ahead, otherwise the second one.
    pub fn next_for(&self, x: f32) -> Result<&Obstacle, SimError> {
        let (first, second) = self.leading_pair()?;
        Ok(if first.x > x { first } else { second })
    }

    /// The first two obstacles of the track.
    pub fn leading_pair(&self) -> Result<(&Obstacle, &Obstacle), SimError> {
        match (self.obstacles.front(), self.obstacles.get(1)) {
            (Some(first), Some(second)) => Ok((first, second)),
            _ => Err(SimError::InvariantViolation(format!(
                "obstacle track has {} obstacles, need at least 2",
                self.obstacles.len()
            ))),
        }
    }

    /// Number of obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether the track holds no obstacles. Never true for a constructed track.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Iterates obstacles front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}
