//! Opening range and the projected level ladder
//!
//! The opening range is the high/low band of the session's first bars.
//! Resistances and supports are stepped away from it with a doubling ladder
//! of proportional increments, each step compounding on the previous level.

use crate::indicators::error::IndicatorError;
use crate::models::bar::PriceBar;
use crate::models::indicators::{Levels, OpeningRange};

/// Number of bars that make up the opening range.
pub const OPENING_RANGE_BARS: usize = 5;

/// Proportional step applied at each rung, nearest rung first.
pub const LEVEL_INCREMENTS: [f64; 4] = [0.0009, 0.0018, 0.0036, 0.0072];

/// Derive the opening range from the first [`OPENING_RANGE_BARS`] bars.
pub fn derive_opening_range(bars: &[PriceBar]) -> Result<OpeningRange, IndicatorError> {
    if bars.len() < OPENING_RANGE_BARS {
        return Err(IndicatorError::IncompleteOpeningRange {
            required: OPENING_RANGE_BARS,
            available: bars.len(),
        });
    }

    let opening = &bars[..OPENING_RANGE_BARS];
    let high = opening.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = opening.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

    Ok(OpeningRange {
        high,
        low,
        start: opening[0].time,
        end: opening[OPENING_RANGE_BARS - 1].time,
    })
}

fn build_ladder(base: f64, direction: f64) -> Vec<f64> {
    let mut previous = base;
    LEVEL_INCREMENTS
        .iter()
        .map(|increment| {
            previous += direction * previous * increment;
            previous
        })
        .collect()
}

/// Project four resistances above `opening_high` and four supports below
/// `opening_low`.
pub fn project_levels(opening_high: f64, opening_low: f64) -> Levels {
    Levels {
        resistances: build_ladder(opening_high, 1.0),
        supports: build_ladder(opening_low, -1.0),
    }
}

/// Project levels straight from an [`OpeningRange`].
pub fn project_from_range(range: &OpeningRange) -> Levels {
    project_levels(range.high, range.low)
}
