pub mod engine;
pub mod error;
pub mod lookup_table;
