//! Choose among alternative routes by cost
//!
//! Pass saved directions responses (GeoJSON, one file per route) as arguments, or nothing to
//! train on synthetic alternatives between two fixed points.

use std::{env, error::Error, fs, path::Path};

use qroute::{
    algo::{QTableTrainer, TrainerConfig},
    env::{CostDriven, CostDrivenConfig},
    gym::Jittered,
    present::{CsvPresenter, LogPresenter},
    provider::{collect_routes, GeoJsonRoutes, RouteProvider},
};
use serde::Deserialize;

const ORIGIN: (f64, f64) = (80.92238882182758, 26.83293623332243);
const DESTINATION: (f64, f64) = (80.95041842860792, 26.914135557686038);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    trainer: TrainerConfig,
    rewards: CostDrivenConfig,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = Path::new("demos/cost_driven_routes");
    let config: Config = serde_json::from_str(&fs::read_to_string(path.join("config.json"))?)?;

    let files = env::args().skip(1).collect::<Vec<_>>();
    let mut provider: Box<dyn RouteProvider> = if files.is_empty() {
        Box::new(Jittered::new(ORIGIN, DESTINATION, 7))
    } else {
        Box::new(GeoJsonRoutes::from_files(files))
    };
    let routes = collect_routes(provider.as_mut());

    let source = CostDriven::new(routes.clone(), config.rewards);
    let mut trainer = QTableTrainer::new(config.trainer, source)?;
    let outcome = trainer.train()?;

    println!("Optimal route found: route {}", outcome.best_route);
    if !outcome.excluded.is_empty() {
        println!("Excluded routes: {:?}", outcome.excluded);
    }

    fs::create_dir_all(path.join("out"))?;
    trainer.present(&mut LogPresenter::new(routes.clone()))?;
    trainer.present(&mut CsvPresenter::from_path(routes, path.join("out/routes.csv"))?)?;
    println!("Routes written to {}", path.join("out/routes.csv").display());

    Ok(())
}
