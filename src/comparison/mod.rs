//! Comparison engine
//!
//! Percentage-difference analysis between the two completed sessions'
//! rollups. A comparison is only produced once both sessions are
//! completed; until then the engine reports "not ready" (`None`) rather
//! than partial numbers.

use serde::{Deserialize, Serialize};

use crate::models::session::{SessionMetrics, SessionState, SessionStatus};

/// Percent difference below which two values are classified as equal,
/// avoiding noisy classification on near-identical runs
const EQUAL_THRESHOLD_PCT: f64 = 1.0;

/// Classification of a metric difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Fabric's value is more than 1% below the baseline
    MoreEfficient,
    /// Fabric's value is more than 1% above the baseline
    LessEfficient,
    /// Within 1% of the baseline
    Equal,
    /// Baseline is zero; no percentage is defined
    NoBaseline,
}

impl Verdict {
    /// Display label for dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::MoreEfficient => "More efficient",
            Verdict::LessEfficient => "Less efficient",
            Verdict::Equal => "Same",
            Verdict::NoBaseline => "No baseline",
        }
    }
}

/// Difference between the two slots for one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDelta {
    pub fabric: f64,
    pub traditional: f64,
    /// `fabric - traditional`
    pub diff: f64,
    /// `diff / traditional * 100`; `None` when the baseline is zero,
    /// never NaN or infinite
    pub percent: Option<f64>,
    pub verdict: Verdict,
}

impl MetricDelta {
    /// Compare a fabric value against the traditional baseline
    pub fn compute(fabric: f64, traditional: f64) -> Self {
        let diff = fabric - traditional;
        let percent = if traditional == 0.0 {
            None
        } else {
            Some(diff / traditional * 100.0)
        };

        let verdict = match percent {
            None => Verdict::NoBaseline,
            Some(p) if p.abs() < EQUAL_THRESHOLD_PCT => Verdict::Equal,
            Some(p) if p < 0.0 => Verdict::MoreEfficient,
            Some(_) => Verdict::LessEfficient,
        };

        Self {
            fabric,
            traditional,
            diff,
            percent,
            verdict,
        }
    }
}

/// Side-by-side analysis of the two sessions' rollups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub processing_time: MetricDelta,
    pub cost: MetricDelta,
    pub tokens: MetricDelta,
}

impl ComparisonReport {
    /// Compare two completed sessions; `None` while either is not yet
    /// completed
    pub fn from_sessions(fabric: &SessionState, traditional: &SessionState) -> Option<Self> {
        if fabric.status != SessionStatus::Completed
            || traditional.status != SessionStatus::Completed
        {
            return None;
        }
        Some(Self::from_metrics(&fabric.metrics, &traditional.metrics))
    }

    /// Compare two rollups directly
    pub fn from_metrics(fabric: &SessionMetrics, traditional: &SessionMetrics) -> Self {
        Self {
            processing_time: MetricDelta::compute(
                fabric.total_processing_time_ms as f64,
                traditional.total_processing_time_ms as f64,
            ),
            cost: MetricDelta::compute(fabric.total_cost, traditional.total_cost),
            tokens: MetricDelta::compute(
                fabric.total_tokens as f64,
                traditional.total_tokens as f64,
            ),
        }
    }
}
