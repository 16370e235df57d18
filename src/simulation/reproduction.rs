//! Selection and breeding operators.
//!
//! Mutation and crossover act on biases only; weights pass through unchanged
//! from whichever parent is cloned.

use ndarray::Zip;
use rand::Rng;

use super::agent::Agent;
use super::brain::{Genome, Topology};
use super::error::SimError;
use super::params::Params;

/// Number of offspring each elite member contributes.
pub const OFFSPRING_PER_ELITE: usize = 5;

/// Returns a mutated copy of `genome`.
///
/// Each bias is, with probability `rate`, multiplied by a factor drawn from
/// `[-scale / 2, scale / 2)`. A rate of zero returns an identical genome.
pub fn mutate<R: Rng + ?Sized>(genome: &Genome, rate: f32, scale: f32, rng: &mut R) -> Genome {
    let mut child = genome.clone();
    child.biases_mut().mapv_inplace(|bias| {
        if rng.random::<f32>() < rate {
            bias * (rng.random::<f32>() - 0.5) * scale
        } else {
            bias
        }
    });
    child
}

/// Mixes the biases of two parents.
///
/// Each bias index is swapped between the two copies with probability
/// `rate`, then one of the two copies is returned on a fair coin flip. The
/// child's weights are those of the copy that wins the flip.
pub fn crossover<R: Rng + ?Sized>(a: &Genome, b: &Genome, rate: f32, rng: &mut R) -> Genome {
    let mut first = a.clone();
    let mut second = b.clone();
    {
        let mut first_biases = first.biases_mut();
        let mut second_biases = second.biases_mut();
        Zip::from(&mut first_biases)
            .and(&mut second_biases)
            .for_each(|x, y| {
                if rng.random::<f32>() < rate {
                    std::mem::swap(x, y);
                }
            });
    }

    if rng.random::<f32>() > 0.5 { first } else { second }
}

/// The `k` fittest agents, fittest first. Ties keep population order.
pub fn select_elite(population: &[Agent], k: usize) -> Result<Vec<&Agent>, SimError> {
    if population.is_empty() || k == 0 {
        return Err(SimError::InvariantViolation(format!(
            "elite pool of {k} requested from a population of {}",
            population.len()
        )));
    }

    let mut ranked: Vec<&Agent> = population.iter().collect();
    ranked.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    ranked.truncate(k);
    Ok(ranked)
}

/// Fresh agents with random genomes.
pub fn random_population<R: Rng + ?Sized>(
    count: usize,
    params: &Params,
    rng: &mut R,
) -> Vec<Agent> {
    (0..count).map(|_| random_agent(params, rng)).collect()
}

fn random_agent<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Agent {
    let genome = Genome::random(Topology::PERCEPTRON, params.init_weight_range, rng);
    Agent::spawn(genome, params, rng)
}

/// Breeds the next population from an elite pool.
///
/// For every elite member, fittest first: a clone of `best_ever`, a clone of
/// the member, a mutated clone of the member, a crossover of `best_ever` with
/// the member, and a crossover of the runner-up with the member. Random
/// agents fill any remaining room and the result is capped at
/// `population_size`.
pub fn breed<R: Rng + ?Sized>(
    elite: &[&Agent],
    best_ever: &Genome,
    params: &Params,
    rng: &mut R,
) -> Result<Vec<Agent>, SimError> {
    let (Some(first), runner_up) = (elite.first(), elite.get(1)) else {
        return Err(SimError::InvariantViolation(
            "cannot breed from an empty elite pool".into(),
        ));
    };
    // A single-member pool is its own runner-up.
    let runner_up = runner_up.unwrap_or(first).genome();

    let capacity = params
        .population_size
        .max(elite.len() * OFFSPRING_PER_ELITE);
    let mut next = Vec::with_capacity(capacity);
    for parent in elite {
        let genome = parent.genome();
        let offspring = [
            best_ever.clone(),
            genome.clone(),
            mutate(genome, params.mutation_rate, params.mutation_scale, rng),
            crossover(best_ever, genome, params.crossover_rate, rng),
            crossover(runner_up, genome, params.crossover_rate, rng),
        ];
        for child in offspring {
            next.push(Agent::spawn(child, params, rng));
        }
    }

    while next.len() < params.population_size {
        next.push(random_agent(params, rng));
    }
    next.truncate(params.population_size);
    Ok(next)
}
