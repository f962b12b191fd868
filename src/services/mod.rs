mod chain;
mod pipeline;

pub use chain::{ExtractionChain, Readiness, TableSource};
pub use pipeline::Pipeline;
