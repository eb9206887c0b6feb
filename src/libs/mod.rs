pub mod assign;
pub mod cluster;
pub mod error;
pub mod gamma;
pub mod identity;
pub mod matrix;
pub mod phylo;
pub mod score;

pub use error::BgcError;
