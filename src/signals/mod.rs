//! Insight synthesis and confidence scoring.

pub mod categories;
pub mod engine;
pub mod insights;
pub mod scoring;

pub use categories::*;
pub use engine::*;
pub use insights::*;
pub use scoring::*;
