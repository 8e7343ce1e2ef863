//! Engine configuration.

use std::time::Duration;

use crate::error::PlotError;
use crate::state::LineWidths;

/// Tunables for the viewport engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Scale applied per zoom step; must be greater than one.
    pub zoom_factor: f64,
    /// Smallest major grid spacing a zoom-in may reach.
    pub min_grid_spacing: f64,
    /// Largest major grid spacing a zoom-out may reach.
    pub max_grid_spacing: f64,
    /// Half of the initial visible height. The initial half width is this
    /// value times the canvas aspect ratio.
    pub initial_half_height: f64,
    /// Initial curve samples per world unit.
    pub initial_resolution: f64,
    /// Stroke widths in pixels, converted to world units at start-up.
    pub pixel_line_widths: LineWidths,
    /// Duration of the ease-to-home animation.
    pub home_duration: Duration,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            zoom_factor: 1.05,
            min_grid_spacing: 1e-6,
            max_grid_spacing: 2e18,
            initial_half_height: 5.0,
            initial_resolution: 100.0,
            pixel_line_widths: LineWidths::default(),
            home_duration: Duration::from_millis(500),
        }
    }
}

impl PlotConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), PlotError> {
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 1.0 {
            return Err(PlotError::InvalidConfig("zoom factor must be greater than 1"));
        }
        if !(self.min_grid_spacing > 0.0
            && self.min_grid_spacing < self.max_grid_spacing
            && self.max_grid_spacing.is_finite())
        {
            return Err(PlotError::InvalidConfig(
                "grid spacing limits must satisfy 0 < min < max < inf",
            ));
        }
        if !self.initial_half_height.is_finite() || self.initial_half_height <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "initial half height must be finite and positive",
            ));
        }
        if !self.initial_resolution.is_finite() || self.initial_resolution <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "initial resolution must be finite and positive",
            ));
        }
        Ok(())
    }
}
