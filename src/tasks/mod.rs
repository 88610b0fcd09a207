pub mod pipeline;
pub mod queue;

pub use pipeline::{Pipeline, RunOptions};
