// Word search engine modules

pub mod grid;
pub mod validator;

pub use grid::{GeneratorOptions, GridGenerator};
pub use validator::PlacementValidator;
