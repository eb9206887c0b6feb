//! Subcommand modules for the `bgcdist` binary.

pub mod assign;
pub mod matrix;
pub mod pair;
pub mod upgma;
pub mod utils;
