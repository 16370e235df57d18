//! Generation lifecycle.
//!
//! The engine owns the population, the obstacle track, the tick counter and
//! the champion snapshots. A host calls [`Engine::tick`] once per frame; the
//! engine either advances the live population or, once every agent is dead,
//! harvests the generation and breeds the next one.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::agent::Agent;
use super::brain::Genome;
use super::error::SimError;
use super::obstacle::ObstacleTrack;
use super::params::Params;
use super::physics;
use super::reproduction;

/// Snapshot of a single agent's genome and final fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Champion {
    /// Fitness the agent reached.
    pub fitness: f32,
    /// Deep copy of its genome.
    pub genome: Genome,
}

impl Champion {
    fn of(agent: &Agent) -> Self {
        Self {
            fitness: agent.fitness(),
            genome: agent.genome().clone(),
        }
    }
}

/// What a call to [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The live population was advanced.
    Stepped {
        /// Agents still alive after the step.
        alive: usize,
    },
    /// The previous generation went extinct and a new one was created.
    NewGeneration {
        /// Number of the generation that just started.
        generation: u32,
    },
}

/// Read-only summary for heads-up displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Agents currently alive.
    pub alive: usize,
    /// Ticks survived this generation.
    pub score: u64,
    /// Current generation number.
    pub generation: u32,
    /// Best fitness of the last harvested generation.
    pub last_best: Option<f32>,
    /// Best fitness seen so far.
    pub best_ever: Option<f32>,
}

/// Owns all simulation state and drives the generation lifecycle.
#[derive(Debug, Clone)]
pub struct Engine {
    params: Params,
    rng: StdRng,
    population: Vec<Agent>,
    track: ObstacleTrack,
    score: u64,
    generation: u32,
    last_best: Option<Champion>,
    best_ever: Option<Champion>,
    running: bool,
}

impl Engine {
    /// Creates an engine with a reproducible random stream.
    ///
    /// The population starts empty; the first [`tick`](Self::tick) creates
    /// generation 1.
    pub fn new(params: Params, seed: u64) -> Result<Self, SimError> {
        Self::with_rng(params, StdRng::seed_from_u64(seed), Vec::new())
    }

    /// Creates an engine seeded from the operating system.
    pub fn from_entropy(params: Params) -> Result<Self, SimError> {
        Self::with_rng(params, StdRng::from_os_rng(), Vec::new())
    }

    /// Creates an engine around an existing population.
    pub fn with_population(
        params: Params,
        seed: u64,
        population: Vec<Agent>,
    ) -> Result<Self, SimError> {
        Self::with_rng(params, StdRng::seed_from_u64(seed), population)
    }

    fn with_rng(
        params: Params,
        mut rng: StdRng,
        population: Vec<Agent>,
    ) -> Result<Self, SimError> {
        params.validate()?;
        let track = ObstacleTrack::new(&params, &mut rng)?;
        Ok(Self {
            params,
            rng,
            population,
            track,
            score: 0,
            generation: 0,
            last_best: None,
            best_ever: None,
            running: true,
        })
    }

    /// Advances the simulation by one step.
    ///
    /// If no agent is alive, the score resets, the track is re-laid and a new
    /// generation is bred. Otherwise the score increments, the track scrolls
    /// (recycling its front obstacle if needed) and every live agent moves.
    pub fn tick(&mut self) -> Result<TickOutcome, SimError> {
        if !self.population.iter().any(Agent::is_alive) {
            self.score = 0;
            self.track.reset(&self.params, &mut self.rng)?;
            self.new_generation()?;
            return Ok(TickOutcome::NewGeneration {
                generation: self.generation,
            });
        }

        self.score += 1;
        self.track.advance(self.params.obstacle_speed);
        self.track
            .recycle(self.params.obstacle_spacing, self.params.obstacle_width);

        let alive = physics::step_population(
            &mut self.population,
            &self.track,
            self.score,
            &self.params,
        )?;
        Ok(TickOutcome::Stepped { alive })
    }

    /// Runs `n` ticks back to back.
    pub fn step_n(&mut self, n: usize) -> Result<(), SimError> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Harvests the current population and replaces it with the next one.
    ///
    /// An empty population is replaced by random agents. Otherwise the elite
    /// pool is selected, the champions are updated and the next population is
    /// bred from the pool.
    pub fn new_generation(&mut self) -> Result<(), SimError> {
        self.generation += 1;

        if self.population.is_empty() {
            self.population = reproduction::random_population(
                self.params.population_size,
                &self.params,
                &mut self.rng,
            );
            log::info!(
                "generation {} seeded with {} random agents",
                self.generation,
                self.population.len()
            );
            return Ok(());
        }

        let elite = reproduction::select_elite(&self.population, self.params.elite_size)?;
        let best = Champion::of(elite[0]);

        if self
            .best_ever
            .as_ref()
            .is_none_or(|champion| champion.fitness < best.fitness)
        {
            self.best_ever = Some(best.clone());
        }
        let best_ever = self.best_ever.as_ref().map_or(&best.genome, |c| &c.genome);

        let next = reproduction::breed(&elite, best_ever, &self.params, &mut self.rng)?;

        log::info!(
            "generation {}: previous best {:.1}, best ever {:.1}",
            self.generation,
            best.fitness,
            self.best_ever.as_ref().map_or(best.fitness, |c| c.fitness)
        );

        self.last_best = Some(best);
        self.population = next;
        Ok(())
    }

    /// Moves every live agent to the nudge height, which kills them all on
    /// the next tick. Dead agents keep their final position.
    pub fn nudge_all(&mut self) {
        log::debug!("nudging {} agents off-screen", self.alive_count());
        for agent in self.population.iter_mut().filter(|a| a.is_alive()) {
            agent.y = self.params.nudge_y;
        }
    }

    /// JSON dump of the best-ever genome, if any generation has been
    /// harvested.
    pub fn dump_best_genome(&self) -> Result<Option<String>, SimError> {
        self.best_ever
            .as_ref()
            .map(|champion| champion.genome.to_json())
            .transpose()
    }

    /// Whether the host should keep requesting ticks.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sets the run flag.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flips the run flag and returns the new value.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Current population.
    pub fn population(&self) -> &[Agent] {
        &self.population
    }

    /// Current obstacle track.
    pub fn track(&self) -> &ObstacleTrack {
        &self.track
    }

    /// Ticks survived this generation.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current generation number, zero before the first tick.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Best agent of the last harvested generation.
    pub fn last_best(&self) -> Option<&Champion> {
        self.last_best.as_ref()
    }

    /// Best agent seen so far.
    pub fn best_ever(&self) -> Option<&Champion> {
        self.best_ever.as_ref()
    }

    /// Parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Number of agents still alive.
    pub fn alive_count(&self) -> usize {
        self.population.iter().filter(|a| a.is_alive()).count()
    }

    /// Summary for display.
    pub fn stats(&self) -> Stats {
        Stats {
            alive: self.alive_count(),
            score: self.score,
            generation: self.generation,
            last_best: self.last_best.as_ref().map(|c| c.fitness),
            best_ever: self.best_ever.as_ref().map(|c| c.fitness),
        }
    }
}
