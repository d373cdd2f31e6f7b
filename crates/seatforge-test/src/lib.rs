//! Shared test fixtures for SeatForge crates.
//!
//! - [`problem`] - fluent builder for seating problems
//! - [`invariants`] - checks every returned plan must satisfy
//! - [`scenarios`] - ready-made problems of realistic shape
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! seatforge-test = { workspace = true }
//! ```

pub mod invariants;
pub mod problem;
pub mod scenarios;

pub use invariants::assert_plan_valid;
pub use problem::ProblemBuilder;
