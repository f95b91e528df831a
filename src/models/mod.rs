pub mod format;
pub mod solution;

pub use format::{FontChoice, OutputFormat};
pub use solution::SolutionResult;
