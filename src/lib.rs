pub mod derive;
pub mod dimension;
pub mod error;
pub mod graph;
pub mod host;
pub mod math;

pub use error::{AutodimError, Result};
