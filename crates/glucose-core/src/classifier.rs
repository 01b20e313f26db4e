use serde::{Deserialize, Serialize};

use crate::error::{GlucoseError, Result};
use crate::models::RangeLabel;

// ── Shared constants ──────────────────────────────────────────────────────────

/// Lowest value (mg/dL) still classified as `Normal`.
pub const DEFAULT_NORMAL_MIN: f64 = 70.0;

/// Highest value (mg/dL) still classified as `Normal`.
pub const DEFAULT_NORMAL_MAX: f64 = 139.0;

// ── RangeThresholds ───────────────────────────────────────────────────────────

/// Inclusive bounds of the `Normal` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeThresholds {
    pub normal_min: f64,
    pub normal_max: f64,
}

impl RangeThresholds {
    /// Build thresholds, rejecting non-finite bounds or an inverted range.
    pub fn new(normal_min: f64, normal_max: f64) -> Result<Self> {
        if !normal_min.is_finite() || !normal_max.is_finite() {
            return Err(GlucoseError::Config(format!(
                "thresholds must be finite numbers (got {} and {})",
                normal_min, normal_max
            )));
        }
        if normal_min > normal_max {
            return Err(GlucoseError::Config(format!(
                "normal_min ({}) is greater than normal_max ({})",
                normal_min, normal_max
            )));
        }
        Ok(Self {
            normal_min,
            normal_max,
        })
    }
}

impl Default for RangeThresholds {
    fn default() -> Self {
        Self {
            normal_min: DEFAULT_NORMAL_MIN,
            normal_max: DEFAULT_NORMAL_MAX,
        }
    }
}

// ── Classifier ────────────────────────────────────────────────────────────────

/// Maps a glucose value onto a [`RangeLabel`] using fixed thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Classifier {
    thresholds: RangeThresholds,
}

impl Classifier {
    pub fn new(thresholds: RangeThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> RangeThresholds {
        self.thresholds
    }

    /// Both bounds of the normal range are themselves `Normal`.
    pub fn classify(&self, value: f64) -> RangeLabel {
        if value < self.thresholds.normal_min {
            RangeLabel::Low
        } else if value <= self.thresholds.normal_max {
            RangeLabel::Normal
        } else {
            RangeLabel::High
        }
    }
}

/// Classify `value` with the default 70–139 mg/dL normal range.
pub fn classify(value: f64) -> RangeLabel {
    Classifier::default().classify(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_low() {
        assert_eq!(classify(0.0), RangeLabel::Low);
        assert_eq!(classify(50.0), RangeLabel::Low);
        assert_eq!(classify(69.0), RangeLabel::Low);
        assert_eq!(classify(69.99), RangeLabel::Low);
    }

    #[test]
    fn test_classify_normal_includes_both_bounds() {
        assert_eq!(classify(70.0), RangeLabel::Normal);
        assert_eq!(classify(100.0), RangeLabel::Normal);
        assert_eq!(classify(139.0), RangeLabel::Normal);
    }

    #[test]
    fn test_classify_high() {
        assert_eq!(classify(139.01), RangeLabel::High);
        assert_eq!(classify(140.0), RangeLabel::High);
        assert_eq!(classify(250.0), RangeLabel::High);
        assert_eq!(classify(500.0), RangeLabel::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = Classifier::new(RangeThresholds::new(80.0, 180.0).unwrap());
        assert_eq!(classifier.classify(75.0), RangeLabel::Low);
        assert_eq!(classifier.classify(80.0), RangeLabel::Normal);
        assert_eq!(classifier.classify(150.0), RangeLabel::Normal);
        assert_eq!(classifier.classify(180.0), RangeLabel::Normal);
        assert_eq!(classifier.classify(181.0), RangeLabel::High);
    }

    #[test]
    fn test_single_point_normal_range() {
        let classifier = Classifier::new(RangeThresholds::new(100.0, 100.0).unwrap());
        assert_eq!(classifier.classify(99.9), RangeLabel::Low);
        assert_eq!(classifier.classify(100.0), RangeLabel::Normal);
        assert_eq!(classifier.classify(100.1), RangeLabel::High);
    }

    #[test]
    fn test_thresholds_reject_inverted_range() {
        let err = RangeThresholds::new(140.0, 70.0).unwrap_err();
        assert!(matches!(err, GlucoseError::Config(_)));
    }

    #[test]
    fn test_thresholds_reject_non_finite() {
        assert!(RangeThresholds::new(f64::NAN, 139.0).is_err());
        assert!(RangeThresholds::new(70.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_default_thresholds() {
        let t = RangeThresholds::default();
        assert_eq!(t.normal_min, 70.0);
        assert_eq!(t.normal_max, 139.0);
        assert_eq!(Classifier::default().thresholds(), t);
    }
}
