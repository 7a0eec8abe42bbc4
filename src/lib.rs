pub mod app;
pub mod compare;
pub mod error;
pub mod generators;
pub mod maze;
pub mod render;
pub mod solvers;
pub mod step;

pub use error::{Error, Result};
