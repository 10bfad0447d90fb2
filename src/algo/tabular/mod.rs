pub mod extract;
pub mod q_table;
pub mod value_table;
