//! # trispin-engine — Three-round bar-fill slot game engine
//!
//! Models a slot game where each of three rounds must fill a progress bar to
//! a rising target (1.0, 1.5, 2.0 bars) within a bounded spin budget. Each
//! spin draws three symbols from a weighted reel; three-of-a-kind and
//! two-of-a-kind outcomes fill the bar in proportion to the matched symbol's
//! multiplier. Purchasable upgrades (reel bias, extra spins, bonus
//! multiplier) shift the odds from the round of purchase onward.
//!
//! ## Architecture
//!
//! ```text
//! GameConfig ──▶ ReelSet (base + biased WeightTable)
//!     │
//!     ├── FillTable (millibar increments per outcome category)
//!     └── Game ──▶ Round state machine ──▶ PlaythroughResult
//!                        ▲
//!                   Strategy (round-2 / round-3 purchases)
//! ```
//!
//! Bar progress is tracked in fixed-point millibars so the stochastic path
//! and the exact enumeration in `trispin-exact` agree on every raw outcome.

pub mod config;
pub mod error;
pub mod game;
pub mod round;
pub mod spin;
pub mod strategy;
pub mod symbols;
pub mod upgrade;

pub use config::*;
pub use error::*;
pub use game::*;
pub use round::*;
pub use spin::*;
pub use strategy::*;
pub use symbols::*;
pub use upgrade::*;
