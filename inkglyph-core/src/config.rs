//! Session configuration.
//!
//! Every section carries `#[serde(default)]`, so an empty JSON object is a
//! complete configuration. Values are checked by [`Config::validate`] after
//! loading.

use inkglyph_graphics::types::Scalar;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// When the pipeline runs during input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Throttled staged reveal while the pointer is down, full run on commit.
    #[default]
    Preview,
    /// Run only when a stroke is committed.
    Stable,
}

/// What a committed gesture reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitReveal {
    /// Every component, regardless of how much has been drawn.
    #[default]
    Full,
    /// The stage the committed strokes earn on their own; the Jong
    /// component shows in full once stage 4 is reached.
    Staged,
}

/// Smallest gap the layout ever leaves between components.
pub const GAP_FLOOR: Scalar = 14.0;

/// Tunables of the form synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Floor for every inter-component gap, never below [`GAP_FLOOR`].
    pub min_gap: Scalar,
    /// Extra weight added to the top strokes, as a fraction of their weight.
    pub weight_bump_ratio: Scalar,
    /// Upper bound on that extra weight.
    pub weight_bump_max: Scalar,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            min_gap: GAP_FLOOR,
            weight_bump_ratio: 0.06,
            weight_bump_max: 10.0,
        }
    }
}

/// Output canvas and stroke settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: Scalar,
    pub height: Scalar,
    /// Uniform scale applied to the centred glyph.
    pub scale: Scalar,
    pub miter_limit: Scalar,
    /// Decimal places in emitted coordinates.
    pub precision: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            scale: 0.9,
            miter_limit: 1.6,
            precision: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: Mode,
    pub commit_reveal: CommitReveal,
    pub layout: LayoutParams,
    pub render: RenderConfig,
}

impl Config {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the synthesizer or renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gap = self.layout.min_gap;
        if !gap.is_finite() || gap < GAP_FLOOR {
            return Err(ConfigError::invalid(
                "layout.min_gap",
                format!("{gap} is below the floor of {GAP_FLOOR}"),
            ));
        }
        let ratio = self.layout.weight_bump_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::invalid(
                "layout.weight_bump_ratio",
                format!("{ratio} is outside [0, 1]"),
            ));
        }
        let bump = self.layout.weight_bump_max;
        if !bump.is_finite() || bump < 0.0 {
            return Err(ConfigError::invalid(
                "layout.weight_bump_max",
                format!("{bump} is not a finite non-negative number"),
            ));
        }
        positive("render.width", self.render.width)?;
        positive("render.height", self.render.height)?;
        positive("render.scale", self.render.scale)?;
        positive("render.miter_limit", self.render.miter_limit)?;
        if self.render.precision > 12 {
            return Err(ConfigError::invalid(
                "render.precision",
                "at most 12 decimal places are supported",
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, v: Scalar) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{v} is not a finite positive number"),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
