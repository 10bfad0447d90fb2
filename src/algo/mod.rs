pub mod tabular;

pub use tabular::{
    extract::{extract, Extraction},
    q_table::{q_update, Outcome, QTableTrainer, TrainerConfig},
    value_table::ValueTable,
};
