pub mod puzzle;

pub use puzzle::{Direction, GenerationResult, Grid, Position, WordPlacement};
