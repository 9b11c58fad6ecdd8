//! Admission properties over arbitrary submissions

use concord_domain::{DocumentInput, JobSubmission};
use concord_gatekeeper::{Gatekeeper, GatekeeperError, RejectionReason, ValidationConfig};
use proptest::prelude::*;

fn texts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-z ]{0,120}").unwrap(), 0..8)
}

fn submission(texts: &[String]) -> JobSubmission {
    JobSubmission::new(texts.iter().map(|t| DocumentInput::new(t.clone())).collect())
}

proptest! {
    #[test]
    fn prop_admitted_documents_meet_minimum(texts in texts()) {
        let gatekeeper = Gatekeeper::default_config();
        let min = gatekeeper.config().min_document_chars;
        match gatekeeper.admit(submission(&texts)) {
            Ok(job) => {
                prop_assert!(!job.documents.is_empty());
                prop_assert!(job.documents.iter().all(|d| d.text.chars().count() >= min));
                prop_assert!(job.documents.len() <= texts.len());
            }
            Err(GatekeeperError::Rejected(reasons)) => {
                prop_assert!(!reasons.is_empty());
                prop_assert!(texts.iter().all(|t| t.trim().chars().count() < min));
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn prop_every_document_gets_a_fresh_id(texts in texts()) {
        if let Ok(job) = Gatekeeper::default_config().admit(submission(&texts)) {
            let mut ids: Vec<_> = job.documents.iter().map(|d| d.id).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), job.documents.len());
        }
    }
}

#[test]
fn test_zero_valid_documents_creates_no_job() {
    let result = Gatekeeper::default_config().admit(submission(&[
        "too short".to_string(),
        "   ".to_string(),
    ]));
    assert_eq!(
        result.unwrap_err(),
        GatekeeperError::Rejected(vec![RejectionReason::AllDocumentsTooShort { min_chars: 50 }])
    );
}

#[test]
fn test_rejection_message_is_short() {
    let err = Gatekeeper::default_config()
        .admit(submission(&[]))
        .unwrap_err();
    assert_eq!(err.to_string(), "Submission rejected: no documents submitted");
}

#[test]
fn test_invalid_config_is_refused() {
    let result = Gatekeeper::new(ValidationConfig {
        max_documents: 0,
        ..Default::default()
    });
    assert!(matches!(result, Err(GatekeeperError::Config(_))));
}
