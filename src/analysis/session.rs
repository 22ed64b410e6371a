//! Session-level violation aggregation.
//!
//! Frames are scored independently; this module owns the cross-frame
//! contract: an append-only violation log per session and the summary
//! scores derived from it. All three scores are monotonically
//! non-increasing as events accumulate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::ScoringConfig;
use super::types::{FrameAnalysisResult, Severity, Violation, ViolationKind};

/// One violation with the time it was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationEvent {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub severity: Severity,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl ViolationEvent {
    pub fn from_violation(violation: &Violation, at: DateTime<Utc>) -> Self {
        Self {
            kind: violation.kind,
            severity: violation.severity,
            details: violation.details.clone(),
            timestamp: at,
        }
    }
}

/// Session-level scores derived from the accumulated violation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_violations: usize,
    pub integrity_score: f64,
    pub face_visible_percentage: f64,
    pub attention_score: f64,
}

impl Default for SessionSummary {
    fn default() -> Self {
        Self {
            total_violations: 0,
            integrity_score: 100.0,
            face_visible_percentage: 100.0,
            attention_score: 100.0,
        }
    }
}

/// Append-only violation log for one proctored session.
#[derive(Debug, Clone)]
pub struct SessionAggregator {
    session_id: Uuid,
    scoring: ScoringConfig,
    events: Vec<ViolationEvent>,
    total_weight: f64,
    face_not_visible_count: u64,
    looking_away_count: u64,
}

impl SessionAggregator {
    pub fn new(scoring: ScoringConfig) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            scoring,
            events: Vec::new(),
            total_weight: 0.0,
            face_not_visible_count: 0,
            looking_away_count: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn record(&mut self, violation: &Violation) {
        self.record_at(violation, Utc::now());
    }

    pub fn record_at(&mut self, violation: &Violation, at: DateTime<Utc>) {
        self.total_weight += self.scoring.session_weight(violation.severity);
        match violation.kind {
            ViolationKind::FaceNotVisible => self.face_not_visible_count += 1,
            ViolationKind::LookingAway => self.looking_away_count += 1,
            _ => {}
        }
        self.events.push(ViolationEvent::from_violation(violation, at));
    }

    /// Fold every violation of an analyzed frame into the log.
    pub fn record_frame(&mut self, result: &FrameAnalysisResult) {
        let at = Utc::now();
        for violation in &result.violations {
            self.record_at(violation, at);
        }
    }

    pub fn timeline(&self) -> &[ViolationEvent] {
        &self.events
    }

    pub fn summary(&self) -> SessionSummary {
        let integrity_score =
            (100.0 - self.total_weight * self.scoring.session_weight_multiplier).max(0.0);
        let face_visible_percentage = (100.0
            - self.scoring.face_visible_penalty * self.face_not_visible_count as f64)
            .max(0.0);
        let attention_score =
            (100.0 - self.scoring.attention_penalty * self.looking_away_count as f64).max(0.0);

        SessionSummary {
            total_violations: self.events.len(),
            integrity_score,
            face_visible_percentage,
            attention_score,
        }
    }
}
