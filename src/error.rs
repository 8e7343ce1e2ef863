//! Error types for the viewport engine.

use thiserror::Error;

/// Errors raised when the engine is asked to compute from an invalid state.
///
/// These are contract violations: the engine refuses to produce geometry
/// rather than emitting `NaN` or infinite coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// World bounds are not finite or have a non-positive span.
    #[error("invalid viewport: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    InvalidViewport {
        /// Minimum X bound.
        x_min: f64,
        /// Maximum X bound.
        x_max: f64,
        /// Minimum Y bound.
        y_min: f64,
        /// Maximum Y bound.
        y_max: f64,
    },

    /// Canvas dimensions are not finite and positive.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas {
        /// Canvas width in device pixels.
        width: f64,
        /// Canvas height in device pixels.
        height: f64,
    },

    /// A grid range was not finite and positive.
    #[error("grid range must be finite and positive, got {0}")]
    InvalidRange(f64),

    /// A sampling resolution was not finite and positive.
    #[error("sampling resolution must be finite and positive, got {0}")]
    InvalidResolution(f64),

    /// Sampling the visible range would exceed the sample budget.
    #[error("sampling {count} points exceeds the limit of {limit}")]
    TooManySamples {
        /// Requested number of points.
        count: u64,
        /// Maximum number of points.
        limit: u64,
    },

    /// A grid spacing would produce too many lines along one axis.
    #[error("grid spacing {spacing} yields {count} lines, more than the limit of {limit}")]
    GridTooDense {
        /// Offending spacing.
        spacing: f64,
        /// Number of lines the spacing would produce.
        count: u64,
        /// Maximum number of lines per axis.
        limit: u64,
    },

    /// No function exists at the given catalogue index.
    #[error("unknown function index {0}")]
    UnknownFunction(usize),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
