pub mod error;
pub mod validation;

pub mod momentum;
pub mod structure;

pub use error::IndicatorError;
pub use validation::*;
