//! # trispin-exact — Exact probability engine
//!
//! Computes exact round-clear probabilities for the three-round bar-fill
//! game without sampling:
//!
//! 1. Enumerate the raw three-draw outcome space (symbols³, 125 for the
//!    baseline alphabet) and collapse it to the distinct millibar fill
//!    increments with exact probabilities derived from the weight table.
//! 2. Dynamic programming over cumulative millibar states below the target:
//!    each spin convolves the unreached mass with the single-spin increment
//!    distribution, absorbing everything at or above the target.
//! 3. Strategy evaluation applies upgrades strictly in round order, so a
//!    purchase entering round 2 never changes round-1 figures.
//!
//! The fill arithmetic is shared with `trispin-engine`, so the enumerated
//! increments match the stochastic path exactly on every raw outcome.

pub mod analysis;
pub mod dist;
pub mod dp;

pub use analysis::*;
pub use dist::*;
pub use dp::*;
