//! Domain layer: the carbon model tree and how it is read from disk
//!
//! This layer knows nothing about reports or the CLI.

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;

pub use arena::{ModelArena, ModelIterator, ModelNode, ModelNodeKind};
pub use builder::{ModelBuilder, FRACTION_TAG, STOCK_TAG, WORLD_TAG};
pub use entities::*;
pub use error::{DomainError, DomainResult};
