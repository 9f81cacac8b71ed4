//! Audit events mirrored to the external audit sink.

use crate::domain::foundation::{ApplicantId, Timestamp};

use super::decision::{Decision, Outcome};
use super::session::{Applicant, SupplementaryAnswer};

/// Severity of an audit record, rendered as a colour by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Affirmative,
    Negative,
}

impl Severity {
    /// RGB colour: dark green for affirmative, dark red for negative.
    pub fn color(&self) -> u32 {
        match self {
            Severity::Affirmative => 0x1F8B4C,
            Severity::Negative => 0x992D22,
        }
    }
}

/// One decision, as recorded for moderators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub applicant_id: ApplicantId,
    pub applicant_tag: String,
    pub avatar_url: String,
    pub outcome: Outcome,
    pub whole_years: u32,
    pub raw_input: String,
    pub answers: Vec<SupplementaryAnswer>,
    pub occurred_at: Timestamp,
    pub severity: Severity,
}

impl AuditEvent {
    /// Builds the audit record for a decision.
    ///
    /// Returns `None` for `Invalid` decisions: unparsable input never
    /// reaches the audit sink.
    pub fn from_decision(
        applicant: &Applicant,
        decision: &Decision,
        answers: &[SupplementaryAnswer],
        occurred_at: Timestamp,
    ) -> Option<Self> {
        let severity = match decision.outcome() {
            Outcome::Pass => Severity::Affirmative,
            Outcome::Fail => Severity::Negative,
            Outcome::Invalid => return None,
        };

        Some(Self {
            applicant_id: applicant.id.clone(),
            applicant_tag: applicant.tag.clone(),
            avatar_url: applicant.avatar_url.clone(),
            outcome: decision.outcome(),
            whole_years: decision.whole_years()?,
            raw_input: decision.raw_input().to_string(),
            answers: answers.to_vec(),
            occurred_at,
            severity,
        })
    }

    pub fn title(&self) -> &'static str {
        match self.outcome {
            Outcome::Pass => "Age Verification Passed",
            _ => "Age Verification Failed",
        }
    }

    pub fn description(&self) -> String {
        let verb = match self.outcome {
            Outcome::Pass => "passed",
            _ => "failed",
        };
        format!(
            "Age verification {}: {} ({} years old)",
            verb, self.raw_input, self.whole_years
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verification::{AgeInYears, DecisionEngine};

    fn applicant() -> Applicant {
        Applicant {
            id: ApplicantId::new("1234").unwrap(),
            tag: "someone".to_string(),
            avatar_url: "https://cdn.example/avatar.png".to_string(),
        }
    }

    fn answers() -> Vec<SupplementaryAnswer> {
        vec![SupplementaryAnswer {
            field_id: "how-find".to_string(),
            label: "How did you find us?".to_string(),
            value: "A friend".to_string(),
        }]
    }

    #[test]
    fn passing_decision_is_affirmative() {
        let decision = DecisionEngine::default().decide(Some(AgeInYears::new(24.4)), "01/01/2000");
        let event = AuditEvent::from_decision(&applicant(), &decision, &answers(), Timestamp::now())
            .unwrap();

        assert_eq!(event.severity, Severity::Affirmative);
        assert_eq!(event.title(), "Age Verification Passed");
        assert_eq!(
            event.description(),
            "Age verification passed: 01/01/2000 (24 years old)"
        );
        assert_eq!(event.answers.len(), 1);
        assert_eq!(event.applicant_tag, "someone");
    }

    #[test]
    fn failing_decision_is_negative() {
        let decision = DecisionEngine::default().decide(Some(AgeInYears::new(14.4)), "01/01/2010");
        let event =
            AuditEvent::from_decision(&applicant(), &decision, &[], Timestamp::now()).unwrap();

        assert_eq!(event.severity, Severity::Negative);
        assert_eq!(event.severity.color(), 0x992D22);
        assert_eq!(event.title(), "Age Verification Failed");
        assert!(event.description().contains("01/01/2010"));
        assert!(event.description().contains("(14 years old)"));
    }

    #[test]
    fn invalid_decision_produces_no_event() {
        let decision = DecisionEngine::default().decide(None, "31/13/2000");
        assert!(AuditEvent::from_decision(&applicant(), &decision, &[], Timestamp::now()).is_none());
    }
}
