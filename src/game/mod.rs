pub mod executor;
pub mod local;

pub use executor::{ExecutorError, MoveExecutor, MoveRequest};
pub use local::{GameEnding, LocalGame, MoveRecord};
