//! Collaborator ports
//!
//! The engine drives the platform through these traits. Calls are
//! fire-and-forget: the caller logs a failure and moves on, never retries.

use uuid::Uuid;

use warden_risk::RiskAssessment;

use crate::Result;

/// Labels for the two alert buttons, in action-index order.
pub const ALERT_ACTIONS: [&str; 2] = ["Allow Download", "Cancel Download"];

const ALERT_TITLE: &str = "Potentially Dangerous Download";

/// Transfer control surface of the download event source.
pub trait DownloadActions: Send + Sync {
    fn pause(&self, id: &str) -> Result<()>;
    fn resume(&self, id: &str) -> Result<()>;
    fn cancel(&self, id: &str) -> Result<()>;
}

/// Notification surface. `raise` shows the alert with its two action
/// buttons; the platform later reports the clicked button index back
/// through the decision router.
pub trait AlertSink: Send + Sync {
    fn raise(&self, alert: &RiskAlert) -> Result<()>;
    fn dismiss(&self, alert_id: &str) -> Result<()>;
}

/// Rendered payload of one interception alert.
#[derive(Debug, Clone)]
pub struct RiskAlert {
    pub id: String,
    pub title: String,
    pub body: String,
    pub actions: [&'static str; 2],
}

impl RiskAlert {
    pub fn new(file_name: &str, domain: &str, assessment: &RiskAssessment) -> Self {
        let body = format!(
            "The file \"{}\" from {} scored {}/100 for risk. Reasons:\n- {}\nAllow it?",
            file_name,
            domain,
            assessment.score,
            assessment.reasons.join("\n- "),
        );

        Self {
            id: Uuid::new_v4().to_string(),
            title: ALERT_TITLE.to_string(),
            body,
            actions: ALERT_ACTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_body_lists_reasons_in_order() {
        let assessment = RiskAssessment {
            score: 50,
            reasons: vec!["first reason".to_string(), "second reason".to_string()],
        };
        let alert = RiskAlert::new("invoice.exe", "files.example.com", &assessment);

        assert_eq!(alert.title, ALERT_TITLE);
        assert!(alert.body.contains("\"invoice.exe\" from files.example.com"));
        assert!(alert.body.contains("scored 50/100"));
        assert!(alert.body.contains("- first reason\n- second reason"));
        assert_eq!(alert.actions, ALERT_ACTIONS);
    }

    #[test]
    fn test_alert_ids_are_unique() {
        let assessment = RiskAssessment {
            score: 50,
            reasons: vec![],
        };
        let a = RiskAlert::new("a.exe", "example.com", &assessment);
        let b = RiskAlert::new("a.exe", "example.com", &assessment);
        assert_ne!(a.id, b.id);
    }
}
