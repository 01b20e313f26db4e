//! Simple health hints derived from a [`MonthlySummary`].

use std::fmt;

use crate::aggregator::MonthlySummary;

/// Share of readings above which high readings trigger advice.
pub const HIGH_SHARE_THRESHOLD: f64 = 0.3;

/// Share of readings above which low readings trigger advice.
pub const LOW_SHARE_THRESHOLD: f64 = 0.1;

/// Share of normal readings that counts as consistently in range.
pub const NORMAL_SHARE_THRESHOLD: f64 = 0.9;

/// A hint shown under a monthly summary. At most one applies, checked in
/// the order high, low, normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    ConsultAboutHighs,
    MindTheLows,
    ConsistentlyInRange,
}

impl Advice {
    pub fn for_summary(summary: &MonthlySummary) -> Option<Self> {
        let total = summary.total_readings as f64;
        if total == 0.0 {
            return None;
        }

        if summary.high_count as f64 > total * HIGH_SHARE_THRESHOLD {
            Some(Advice::ConsultAboutHighs)
        } else if summary.low_count as f64 > total * LOW_SHARE_THRESHOLD {
            Some(Advice::MindTheLows)
        } else if summary.normal_count as f64 > total * NORMAL_SHARE_THRESHOLD {
            Some(Advice::ConsistentlyInRange)
        } else {
            None
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Advice::ConsultAboutHighs => {
                "Consider discussing consistently high readings with your doctor."
            }
            Advice::MindTheLows => {
                "Be mindful of low readings. Ensure regular meal times and consult your doctor if frequent."
            }
            Advice::ConsistentlyInRange => {
                "Excellent! Your blood sugar levels are consistently within the normal range this month."
            }
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(low: usize, normal: usize, high: usize) -> MonthlySummary {
        MonthlySummary {
            year: 2025,
            month: 1,
            total_readings: low + normal + high,
            avg: 100.0,
            min: 60.0,
            max: 200.0,
            low_count: low,
            normal_count: normal,
            high_count: high,
        }
    }

    #[test]
    fn test_many_highs() {
        assert_eq!(
            Advice::for_summary(&summary(1, 2, 2)),
            Some(Advice::ConsultAboutHighs)
        );
    }

    #[test]
    fn test_highs_take_priority_over_lows() {
        assert_eq!(
            Advice::for_summary(&summary(4, 2, 4)),
            Some(Advice::ConsultAboutHighs)
        );
    }

    #[test]
    fn test_many_lows() {
        assert_eq!(
            Advice::for_summary(&summary(2, 8, 0)),
            Some(Advice::MindTheLows)
        );
    }

    #[test]
    fn test_consistently_normal() {
        assert_eq!(
            Advice::for_summary(&summary(0, 10, 0)),
            Some(Advice::ConsistentlyInRange)
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly 30% high, 10% low, 60% normal: nothing applies.
        assert_eq!(Advice::for_summary(&summary(1, 6, 3)), None);
        // Exactly 90% normal is not "more than" 90%.
        assert_eq!(Advice::for_summary(&summary(1, 9, 0)), None);
    }

    #[test]
    fn test_message_text() {
        assert!(Advice::ConsultAboutHighs.to_string().contains("doctor"));
        assert!(Advice::ConsistentlyInRange.message().starts_with("Excellent"));
    }
}
