//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use super::config::GaConfig;
use super::selection::tournament;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index; `0` is the initial population.
    pub generation: usize,
    /// Best fitness seen so far in the run. Never increases.
    pub best_fitness: f64,
    /// Mean fitness of this generation's population.
    pub mean_fitness: f64,
    /// Worst fitness of this generation's population.
    pub worst_fitness: f64,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// All `max_generations` generations ran.
    GenerationLimit,
    /// The best fitness stopped improving.
    Stagnated,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Total number of generations evaluated, including the initial one.
    pub generations: usize,

    /// Generation at which `best` was first found.
    pub convergence_generation: usize,

    pub termination: Termination,

    /// One entry per evaluated generation.
    pub history: Vec<GenerationStats>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Fails if the configuration is invalid or the problem rejects an
    /// individual in [`GaProblem::verify`].
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before breeding the next generation and returns the best solution
    /// found so far.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            population = config.population_size,
            max_generations = config.max_generations,
            seed = ?config.seed
        )
    )]
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>> {
        config.validate()?;

        let started = Instant::now();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));

        // 1. Initialize population
        let mut population = problem.initial_population(config.population_size, &mut rng);
        population.truncate(config.population_size);
        while population.len() < config.population_size {
            population.push(problem.create_individual(&mut rng));
        }
        for ind in &population {
            problem.verify(ind)?;
        }

        // 2. Evaluate initial population
        evaluate(problem, &mut population);

        // 3. Track best
        let mut best = population[find_best(&population)].clone();
        let mut history = Vec::with_capacity(config.max_generations.min(1024));
        history.push(generation_stats(0, best.fitness(), &population));
        debug_generation(&history[0]);

        let mut convergence_generation = 0usize;
        let mut stagnation_counter = 0usize;
        let mut termination = Termination::GenerationLimit;

        // 4. Evolutionary loop
        for gen in 1..config.max_generations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                termination = Termination::Cancelled;
                break;
            }
            if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                termination = Termination::TimeLimit;
                break;
            }

            population = breed(problem, config, &population, &mut rng)?;

            // Elites keep their fitness from the previous generation
            evaluate(problem, &mut population[config.elite_count..]);

            let gen_best = &population[find_best(&population)];
            if gen_best.fitness() < best.fitness() {
                best = gen_best.clone();
                convergence_generation = gen;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            let stats = generation_stats(gen, best.fitness(), &population);
            debug_generation(&stats);
            history.push(stats);

            if config.stagnation_limit > 0 && stagnation_counter > config.stagnation_limit {
                termination = Termination::Stagnated;
                break;
            }
        }

        let elapsed = started.elapsed();
        info!(
            ?termination,
            generations = history.len(),
            convergence_generation,
            best_fitness = best.fitness().to_f64(),
            elapsed_ms = elapsed.as_millis() as u64,
            "ga run finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: history.len(),
            convergence_generation,
            termination,
            history,
            elapsed,
        })
    }
}

/// Builds the next generation: elites first, then offspring.
fn breed<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &[P::Individual],
    rng: &mut R,
) -> Result<Vec<P::Individual>> {
    // Sort indices by fitness (ascending = best first); stable for ties
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        population[a]
            .fitness()
            .partial_cmp(&population[b].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut next_gen: Vec<P::Individual> = order[..config.elite_count]
        .iter()
        .map(|&i| population[i].clone())
        .collect();

    while next_gen.len() < config.population_size {
        // Selection
        let p1 = &population[tournament(population, config.tournament_size, rng)];
        let p2 = &population[tournament(population, config.tournament_size, rng)];

        // Crossover
        let children = if rng.random::<f64>() < config.crossover_rate {
            problem.crossover(p1, p2, rng)
        } else {
            vec![p1.clone(), p2.clone()]
        };

        for mut child in children {
            // Mutation
            if rng.random::<f64>() < config.mutation_rate {
                problem.mutate(&mut child, rng);
            }
            problem.verify(&child)?;

            if next_gen.len() < config.population_size {
                next_gen.push(child);
            }
        }
    }

    Ok(next_gen)
}

/// Evaluate all individuals in the slice.
fn evaluate<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Index of the individual with the best (lowest) fitness; first on ties.
fn find_best<I: Individual>(population: &[I]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness() < population[best].fitness() {
            best = i;
        }
    }
    best
}

fn generation_stats<I: Individual>(
    generation: usize,
    best_so_far: I::Fitness,
    population: &[I],
) -> GenerationStats {
    let values = population.iter().map(|ind| ind.fitness().to_f64());
    let sum: f64 = values.clone().sum();
    let worst = values.fold(f64::NEG_INFINITY, f64::max);

    GenerationStats {
        generation,
        best_fitness: best_so_far.to_f64(),
        mean_fitness: sum / population.len() as f64,
        worst_fitness: worst,
    }
}

fn debug_generation(stats: &GenerationStats) {
    debug!(
        generation = stats.generation,
        best = stats.best_fitness,
        mean = stats.mean_fitness,
        worst = stats.worst_fitness,
        "generation evaluated"
    );
}

// ============================================================================
// Tests
// ============================================================================
