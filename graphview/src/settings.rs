use std::time::Duration;

use crate::error::SettingsError;

/// Delay after the last touch lifted before a captor stops reporting camera movement.
pub const DEFAULT_DECAY_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration of a [`crate::captor::touch::TouchCaptor`].
#[derive(Debug, Clone, PartialEq)]
pub struct TouchCaptorSettings {
    /// Delay after the last touch lifted before `moving` clears.
    pub decay_interval: Duration,
    /// Lower bound of ratios computed from a pinch, i.e. the strongest zoom.
    pub min_camera_ratio: Option<f64>,
    /// Upper bound of ratios computed from a pinch.
    pub max_camera_ratio: Option<f64>,
    /// A disabled captor ignores all touch input.
    pub enabled: bool,
}

impl Default for TouchCaptorSettings {
    fn default() -> Self {
        Self {
            decay_interval: DEFAULT_DECAY_INTERVAL,
            min_camera_ratio: None,
            max_camera_ratio: None,
            enabled: true,
        }
    }
}

impl TouchCaptorSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, bound) in [
            ("min camera ratio", self.min_camera_ratio),
            ("max camera ratio", self.max_camera_ratio),
        ] {
            if let Some(value) = bound {
                if !value.is_finite() || value <= 0.0 {
                    return Err(SettingsError::InvalidRatioBound { name, value });
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_camera_ratio, self.max_camera_ratio) {
            if min > max {
                return Err(SettingsError::InvertedRatioBounds { min, max });
            }
        }

        Ok(())
    }

    /// Clamps `ratio` into the configured bounds.
    pub fn bounded_ratio(&self, ratio: f64) -> f64 {
        let ratio = self.min_camera_ratio.map_or(ratio, |min| ratio.max(min));
        self.max_camera_ratio.map_or(ratio, |max| ratio.min(max))
    }
}
