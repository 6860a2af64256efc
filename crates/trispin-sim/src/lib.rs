//! # trispin-sim — Monte Carlo batch simulator
//!
//! Replays the full three-round progression stochastically for each of the
//! 13 catalogue strategies and compares the empirical figures against the
//! exact probability engine.
//!
//! Trials are embarrassingly parallel: each owns an independent `Game` and
//! a ChaCha RNG stream derived from the run seed and trial index, so a
//! batch is a rayon map over trial indices reduced into one accumulator.
//! No shared mutable state crosses trial boundaries.

pub mod monte_carlo;
pub mod report;

pub use monte_carlo::*;
pub use report::*;
