//! Market structure: opening range and projected levels

pub mod opening_range;

pub use opening_range::*;
