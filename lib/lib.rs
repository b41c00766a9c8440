#![allow(dead_code)]

//! Provides constructs for describing atomic electron configurations and for
//! handling functions sampled on radial meshes, as used in the construction
//! and testing of pseudopotentials.
//!
//! Provides the following:
//! - Orbital states and configurations:
//!     - [`QState`][qstate::QState] and [`NlkState`][qstate::NlkState] orbital
//!       descriptions
//!     - Compact configuration notation (e.g. `"[Ne] 3s2 3p5"`) via
//!       [`notation`]
//!     - Neutral ground-state configurations for Z = 1 to 92 via [`database`]
//!     - [`AtomicConfiguration`][atomconf::AtomicConfiguration]
//! - Radial functions:
//!     - Not-a-knot [cubic splines][interp::CubicSpline] with root finding,
//!       derivatives, and exact integrals
//!     - [`RadialFunction`][radial::RadialFunction] and
//!       [`RadialWaveFunction`][radial::RadialWaveFunction], with cumulative
//!       integrals, radial index lookup, and the Fourier-Bessel (`j0`)
//!       transform used to check convergence against a kinetic energy cutoff
//!     - Pairing of all-electron and pseudized functions via [`compare`]
//!
//! Diagnostics are emitted through the [`log`] facade; no logger is installed
//! by this crate.

pub mod error;
pub mod qstate;
pub mod notation;
pub mod database;
pub mod atomconf;
pub mod utils;
pub mod interp;
pub mod loadtxt;
pub mod radial;
pub mod compare;

/// Default number of momentum points for
/// [`RadialFunction::get_intr2j0`][radial::RadialFunction::get_intr2j0].
pub const DEF_NUMQ: usize = 3001;

/// Default absolute tolerance for
/// [`RadialFunction::ir_small`][radial::RadialFunction::ir_small].
pub const DEF_IR_SMALL_TOL: f64 = 0.01;

/// Magnitude below which the tail of a wavefunction is considered zero.
pub const TOL_BOUND: f64 = 1e-10;

/// Number of trailing mesh points inspected by
/// [`RadialWaveFunction::isbound`][radial::RadialWaveFunction::isbound].
pub const BOUND_WINDOW: usize = 10;

/// Tolerance on the net charge of a neutral configuration.
pub const NEUTRAL_TOL: f64 = 1e-8;
