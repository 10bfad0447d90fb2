use std::error::Error;

use qroute::{
    algo::{QTableTrainer, TrainerConfig},
    env::{FixedTopology, FixedTopologyConfig},
    gym::canvas_paths,
    viz::{self, CanvasPresenter},
};

const NUM_EPISODES: u32 = 1000;

fn main() -> Result<(), Box<dyn Error>> {
    let routes = canvas_paths();
    let source = FixedTopology::new(routes.clone(), FixedTopologyConfig::default());
    let config = TrainerConfig {
        episodes: NUM_EPISODES,
        ..Default::default()
    };
    let mut trainer = QTableTrainer::new(config, source)?;

    let (handle, tx) = viz::init(routes, true, &trainer.report.keys(), NUM_EPISODES);

    for i in 0..NUM_EPISODES {
        trainer.go()?;
        let report = trainer.report.take();
        tx.send(viz::Message::Episode(viz::Update {
            episode: i,
            data: report.values().copied().collect(),
        }))?;
    }

    trainer.present(&mut CanvasPresenter::new(tx))?;

    if let Ok(result) = handle.join() {
        result?;
    }
    Ok(())
}
