use thiserror::Error;

/// Failures raised while preparing indicator inputs.
///
/// The indicators themselves degrade gracefully (an undersized window yields
/// an empty series); these errors only cover inputs that cannot produce a
/// meaningful session picture at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("No price bars supplied")]
    EmptySeries,
    #[error("Incomplete opening range data: need {required} bars, got {available}")]
    IncompleteOpeningRange { required: usize, available: usize },
    #[error("Invalid RSI settings: {0}")]
    InvalidSettings(String),
    #[error("Unknown smoothing method: {0}")]
    InvalidSmoothing(String),
}
