use anyhow::Result;
use blique_core::{Evolution, EvolutionConfig, Individual};
use blique_world::{SimulationConfig, spawn_population};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let sim_config = SimulationConfig {
        grid_width: 60,
        grid_height: 20,
        population_size: 40,
        rng_seed: Some(0xB11C_0DE5),
        ..SimulationConfig::default()
    };
    let evo_config = EvolutionConfig {
        generations: 50,
        ..EvolutionConfig::default()
    };

    let mut rng = sim_config.seeded_rng();
    let environment = sim_config.build_environment(&mut rng)?;
    let mut population = spawn_population(&sim_config, &mut rng)?;
    let mut evolution = Evolution::new(evo_config);

    info!(
        grid_width = sim_config.grid_width,
        grid_height = sim_config.grid_height,
        population = sim_config.population_size,
        generations = evo_config.generations,
        "Starting blique evolution",
    );

    for _ in 0..evo_config.generations {
        environment.simulate(&mut population)?;
        let fittest = population.get_fittest();
        info!(
            generation = evolution.generation(),
            avg_fitness = population.avg_fitness(),
            best_fitness = fittest.fitness(),
            best = fittest.name(),
            "Generation complete",
        );
        population = evolution.step(&population, &mut rng)?;
    }

    environment.simulate(&mut population)?;
    for entry in environment.leaderboard(&population).iter().take(10) {
        info!(
            rank = entry.rank,
            name = entry.name.as_str(),
            fitness = entry.fitness,
            age = entry.age,
            distance = entry.distance_traveled,
            "Final standings",
        );
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
