use serde::{Deserialize, Serialize};

use super::config::AnalysisConfig;
use super::types::FrameAnalysisResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvariantViolation {
    pub field: String,
    pub value: f64,
    pub expected_range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringEvent {
    pub id: String,
    pub event_type: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub latency_ms: i64,
    pub is_anomaly: bool,
    pub is_degraded: bool,
    pub invariant_violations: Vec<InvariantViolation>,
    pub result: serde_json::Value,
}

/// Check the clamp and population invariants of a frame result.
pub fn check_invariants(result: &FrameAnalysisResult) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    check_range(
        &mut violations,
        "integrity_score",
        result.integrity_score,
        0.0,
        100.0,
    );
    check_range(
        &mut violations,
        "confidence_level",
        result.confidence_level,
        0.0,
        100.0,
    );

    if result.face_detected != (result.face_count > 0) {
        violations.push(InvariantViolation {
            field: "face_count".to_string(),
            value: result.face_count as f64,
            expected_range: "consistent with face_detected".to_string(),
        });
    }

    violations
}

fn check_range(
    violations: &mut Vec<InvariantViolation>,
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if value.is_nan() {
        violations.push(InvariantViolation {
            field: field.to_string(),
            value: f64::NAN,
            expected_range: format!("[{min}, {max}]"),
        });
        return;
    }
    if value < min || value > max {
        violations.push(InvariantViolation {
            field: field.to_string(),
            value,
            expected_range: format!("[{min}, {max}]"),
        });
    }
}

pub fn should_sample(is_anomaly: bool, is_degraded: bool, sample_rate: f64) -> bool {
    if is_anomaly {
        return true;
    }
    if is_degraded {
        return true;
    }
    rand::random::<f64>() < sample_rate
}

/// Emit a sampled monitoring event for one analyzed frame. Anomalous and
/// degraded frames are always emitted.
pub fn record_frame(result: &FrameAnalysisResult, latency_ms: i64, config: &AnalysisConfig) {
    let violations = check_invariants(result);
    let is_anomaly = !violations.is_empty();
    let is_degraded = !result.degradations.is_empty();

    if !should_sample(is_anomaly, is_degraded, config.monitoring.sample_rate) {
        return;
    }

    let event = MonitoringEvent {
        id: uuid::Uuid::new_v4().to_string(),
        event_type: "frame_event".to_string(),
        timestamp: chrono::Utc::now(),
        latency_ms,
        is_anomaly,
        is_degraded,
        invariant_violations: violations,
        result: serde_json::to_value(result).unwrap_or_default(),
    };

    if is_anomaly {
        tracing::warn!(violations=?event.invariant_violations, "frame result invariant violation");
    }

    tracing::debug!(
        target: "proctoring::monitor",
        event = %serde_json::to_value(&event).unwrap_or_default(),
        "frame monitoring event"
    );
}
