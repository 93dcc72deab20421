//! # scratch-engine: Scratch Card Round Evaluator
//!
//! Evaluates a single round of a scratch-card style game: fills a grid from
//! weighted per-cell distributions, detects the configured winning patterns
//! and composes the reward for a bet.
//!
//! ## Features
//!
//! - **Weighted Generation**: Per-cell symbol tables with a 0:0 fallback
//! - **Bonus Placement**: One bonus symbol per round at a uniform random cell
//! - **Win Matching**: `same_symbols` tiers and `linear_symbols` covered areas
//! - **Reward Composition**: Symbol × combination multipliers, then the bonus
//! - **Injectable Randomness**: Seeded or scripted sources for exact replays
//!
//! ## Architecture
//!
//! ```text
//! GameConfig (validated)
//!     │
//!     ├── MatrixGenerator ──→ Matrix (+ BonusPlacement)
//!     │                          │
//!     ├── CombinationMatcher ──→ MatchResult
//!     │                          │
//!     └── RewardCalculator ───→ RewardBreakdown
//!                                │
//!                                v
//!                           RoundResult
//! ```

pub mod combinations;
pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod position;
pub mod reward;
pub mod rng;
pub mod round;
pub mod symbols;

pub use combinations::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use matrix::*;
pub use position::*;
pub use reward::*;
pub use rng::*;
pub use round::*;
pub use symbols::*;
