use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::classifier::{Tolerances, DEFAULT_CUSP_TOLERANCE, DEFAULT_SINGULAR_TOLERANCE};
use crate::params::{InputBounds, InputPolicy};
use crate::plot::PlotSpec;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyzerConfig {
    #[serde(default = "default_singular_tolerance")]
    pub singular_tolerance: f64,
    #[serde(default = "default_cusp_tolerance")]
    pub cusp_tolerance: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            singular_tolerance: default_singular_tolerance(),
            cusp_tolerance: default_cusp_tolerance(),
        }
    }
}

impl AnalyzerConfig {
    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            singular_delta: self.singular_tolerance,
            cusp_coefficient: self.cusp_tolerance,
        }
    }
}

fn default_singular_tolerance() -> f64 {
    DEFAULT_SINGULAR_TOLERANCE
}

fn default_cusp_tolerance() -> f64 {
    DEFAULT_CUSP_TOLERANCE
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_policy")]
    pub policy: InputPolicy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            step: default_step(),
            policy: default_policy(),
        }
    }
}

impl InputConfig {
    pub fn bounds(&self) -> InputBounds {
        InputBounds {
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }
}

fn default_min() -> f64 {
    -5.0
}

fn default_max() -> f64 {
    5.0
}

fn default_step() -> f64 {
    0.1
}

fn default_policy() -> InputPolicy {
    InputPolicy::Clamp
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub banner: bool,
    #[serde(default = "default_true")]
    pub plot: bool,
    #[serde(default = "default_plot_width")]
    pub plot_width: usize,
    #[serde(default = "default_plot_height")]
    pub plot_height: usize,
    #[serde(default = "default_grid_range")]
    pub grid_range: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            banner: default_true(),
            plot: default_true(),
            plot_width: default_plot_width(),
            plot_height: default_plot_height(),
            grid_range: default_grid_range(),
        }
    }
}

impl DisplayConfig {
    pub fn plot_spec(&self) -> PlotSpec {
        PlotSpec {
            width: self.plot_width,
            height: self.plot_height,
            range: self.grid_range,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_plot_width() -> usize {
    61
}

fn default_plot_height() -> usize {
    25
}

fn default_grid_range() -> f64 {
    5.0
}

impl ConfigFile {
    pub fn load(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).context(format!("Failed to read config file: {}", path))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            tracing::info!("Loading configuration from: {}", path);
            Self::load(path)
        } else {
            tracing::info!("No config file at {}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let analyzer = &self.analyzer;
        if !(analyzer.singular_tolerance.is_finite() && analyzer.singular_tolerance > 0.0) {
            anyhow::bail!(
                "analyzer.singular_tolerance must be positive, got {}",
                analyzer.singular_tolerance
            );
        }
        if !(analyzer.cusp_tolerance.is_finite() && analyzer.cusp_tolerance > 0.0) {
            anyhow::bail!(
                "analyzer.cusp_tolerance must be positive, got {}",
                analyzer.cusp_tolerance
            );
        }

        let input = &self.input;
        if !(input.min.is_finite() && input.max.is_finite() && input.min < input.max) {
            anyhow::bail!(
                "input range is invalid: min = {}, max = {}",
                input.min,
                input.max
            );
        }
        if !(input.step.is_finite() && input.step > 0.0) {
            anyhow::bail!("input.step must be positive, got {}", input.step);
        }

        let display = &self.display;
        if display.plot_width < 3 || display.plot_height < 3 {
            anyhow::bail!(
                "Plot must be at least 3x3, got {}x{}",
                display.plot_width,
                display.plot_height
            );
        }
        if !(display.grid_range.is_finite() && display.grid_range > 0.0) {
            anyhow::bail!("display.grid_range must be positive, got {}", display.grid_range);
        }
        Ok(())
    }
}
