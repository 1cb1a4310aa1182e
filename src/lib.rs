//! # LC Filter Core
//!
//! Component-value synthesis for passive LC filters used in RF and
//! electronics work.
//!
//! This library provides:
//! - Normalized prototype element values for Butterworth, Chebyshev and Bessel responses
//! - Pi/T ladder synthesis for low-pass and high-pass filters
//! - Coupled-resonator band-pass synthesis (top-C and shunt-C coupling)
//! - Magnitude response evaluation for plotting and data export
//! - Matching of computed values to E12/E24/E96 standard components
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`prototype`] - g-value generation and tables
//! - [`synthesis`] - ladder and band-pass component synthesis
//! - [`response`] - transfer-function magnitude evaluation and sweeps
//! - [`eseries`] - standard component value matching
//! - [`units`] - engineering-unit parsing and formatting
//! - [`report`] - table/JSON/CSV rendering, ASCII diagrams and plots
//! - `cli`, `wizard` - command-line front end (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! filtercalc lowpass butterworth pi 10MHz -n 5
//! filtercalc highpass chebyshev t 3.5MHz -r 0.1 --format json
//! filtercalc bandpass bw top -f 14.175MHz -b 350kHz -n 3 --plot
//! ```
//!
//! ### Library
//!
//! ```
//! use lc_filter_core::synthesis::{synthesize_ladder, LadderShape, LadderSpec, Topology};
//! use lc_filter_core::prototype::ResponseFamily;
//!
//! let spec = LadderSpec::new(LadderShape::LowPass, ResponseFamily::Butterworth, 10e6)
//!     .with_topology(Topology::Pi)
//!     .with_order(5);
//! let result = synthesize_ladder(&spec).unwrap();
//! assert_eq!(result.capacitors.len(), 3);
//! assert_eq!(result.inductors.len(), 2);
//! ```
//!
//! ## Synthesis Method
//!
//! Every design starts from a normalized prototype (1 rad/s, 1 Ω):
//!
//! 1. Compute or look up the prototype element values g[1]..g[n]
//! 2. Ladder filters: scale each g-value by impedance and cutoff, placing it
//!    as a series or shunt L/C according to topology and position parity
//! 3. Band-pass filters: derive coupling coefficients and external Q from the
//!    g-values, then size identical parallel tanks and their coupling
//!    capacitors, compensating each tank for the coupling it sees

pub mod error;
pub mod eseries;
pub mod prototype;
pub mod report;
pub mod response;
pub mod synthesis;
pub mod units;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub mod wizard;

// Re-export main types for convenience
pub use error::{FilterError, Result};
pub use eseries::{match_component, ESeries, ESeriesMatch, ParallelMode};
pub use prototype::{GValues, ResponseFamily};
pub use report::{render_design, OutputFormat, RenderOptions};
pub use response::{magnitude_db, FilterResponse, ResponseShape};
pub use synthesis::{
    synthesize_bandpass, synthesize_ladder, BandpassResult, BandpassSpec, Coupling, Design,
    FilterKind, LadderResult, LadderShape, LadderSpec, Topology,
};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::*;

/// Smallest supported filter order / resonator count
pub const MIN_ORDER: usize = 2;

/// Largest supported filter order / resonator count
pub const MAX_ORDER: usize = 9;

/// Default system impedance in Ohms
pub const DEFAULT_IMPEDANCE_OHMS: f64 = 50.0;

/// Default Chebyshev passband ripple in dB
pub const DEFAULT_RIPPLE_DB: f64 = 0.5;

/// Default number of ladder elements
pub const DEFAULT_ORDER: usize = 3;

/// Default number of band-pass resonators
pub const DEFAULT_RESONATORS: usize = 2;

/// Default multiplier applied to the loaded Q when sizing component Q
pub const DEFAULT_Q_SAFETY: f64 = 2.0;

/// Default E-series used for component recommendations
pub const DEFAULT_E_SERIES: ESeries = ESeries::E24;
