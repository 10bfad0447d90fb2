use std::error::Error;

use qroute::{
    algo::{QTableTrainer, TrainerConfig},
    env::{FixedTopology, FixedTopologyConfig},
    gym::{self, canvas_paths},
    present::LogPresenter,
};

const NUM_EPISODES: u32 = 1000;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let routes = canvas_paths();
    let source = FixedTopology::new(
        routes.clone(),
        FixedTopologyConfig {
            optimal: gym::canvas::OPTIMAL,
            ..Default::default()
        },
    );
    let config = TrainerConfig {
        episodes: NUM_EPISODES,
        seed: Some(2024),
        ..Default::default()
    };
    let mut trainer = QTableTrainer::new(config, source)?;

    let outcome = trainer.train()?;
    for state in 0..trainer.table().states() {
        println!("Path {}: {:?}", state, trainer.table().row(state)?);
    }
    println!("Best path identified: path {}", outcome.best_route);

    trainer.present(&mut LogPresenter::new(routes))?;
    Ok(())
}
