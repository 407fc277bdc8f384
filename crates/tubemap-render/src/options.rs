use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 80.0,
            right: 80.0,
            bottom: 20.0,
            left: 80.0,
        }
    }
}

/// Chart-level parameters for one layout pass.
///
/// Passed by reference into [`crate::layout_map`]; nothing here is cached between calls, so two
/// maps with different options can be laid out side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Line stroke width as a fraction of one grid unit.
    pub line_width_multiplier: f64,
    /// Line width divided by station tick width.
    pub line_width_tick_ratio: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 760.0,
            height: 640.0,
            margin: Margin::default(),
            line_width_multiplier: 0.8,
            line_width_tick_ratio: 3.0 / 2.0,
        }
    }
}

impl LayoutOptions {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_line_width_multiplier(mut self, multiplier: f64) -> Self {
        self.line_width_multiplier = multiplier;
        self
    }

    pub fn with_line_width_tick_ratio(mut self, ratio: f64) -> Self {
        self.line_width_tick_ratio = ratio;
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.inner_width()) || !positive(self.inner_height()) {
            return Err(Error::InvalidOptions {
                message: format!(
                    "margins leave no drawing area in a {}x{} chart",
                    self.width, self.height
                ),
            });
        }
        if !positive(self.line_width_multiplier) {
            return Err(Error::InvalidOptions {
                message: format!(
                    "lineWidthMultiplier must be positive, got {}",
                    self.line_width_multiplier
                ),
            });
        }
        if !positive(self.line_width_tick_ratio) {
            return Err(Error::InvalidOptions {
                message: format!(
                    "lineWidthTickRatio must be positive, got {}",
                    self.line_width_tick_ratio
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let opts = LayoutOptions::from_json_str(r#"{ "width": 1000, "margin": { "top": 10 } }"#)
            .unwrap();
        assert_eq!(opts.width, 1000.0);
        assert_eq!(opts.height, 640.0);
        assert_eq!(opts.margin.top, 10.0);
        assert_eq!(opts.margin.left, 80.0);
        assert_eq!(opts.line_width_tick_ratio, 1.5);
    }

    #[test]
    fn margins_larger_than_chart_are_rejected() {
        let opts = LayoutOptions::default().with_size(100.0, 640.0);
        assert!(matches!(opts.validate(), Err(Error::InvalidOptions { .. })));
        assert!(LayoutOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_tick_ratio_is_rejected() {
        let opts = LayoutOptions::default().with_line_width_tick_ratio(0.0);
        assert!(opts.validate().is_err());
    }
}
