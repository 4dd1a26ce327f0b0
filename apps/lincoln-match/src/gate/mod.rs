//! Email Gate: decides whether the email capture surface may be shown and
//! records submitted contact consent.
//!
//! Presence of either the consent record or the bare `userEmail` marker means
//! "already captured". Nothing is sent anywhere; a later mailing integration
//! drains the stored record.

pub mod validation;

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{EmailConsentRecord, MatchedCourse};
use crate::store::{KeyValueStore, StoreError, StoreExt, StoreKey};

pub use validation::{validate_email, ValidationError};

#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not record email consent: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct EmailGate {
    store: Arc<dyn KeyValueStore>,
}

impl EmailGate {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// True once any capture has been recorded on this profile.
    pub fn has_captured(&self) -> bool {
        self.store.contains(StoreKey::EmailConsent) || self.store.contains(StoreKey::UserEmail)
    }

    /// Whether the capture surface should be offered at all.
    pub fn should_prompt(&self) -> bool {
        !self.has_captured()
    }

    /// The last stored consent record, if it is still readable.
    pub fn record(&self) -> Option<EmailConsentRecord> {
        self.store.load(StoreKey::EmailConsent)
    }

    /// Inline capture: submitting the form is the consent.
    pub fn submit(
        &self,
        email: &str,
        matched_courses: &[MatchedCourse],
    ) -> Result<EmailConsentRecord, GateError> {
        self.submit_with_consent(email, true, matched_courses)
    }

    /// Modal capture with an explicit opt-in box.
    ///
    /// Checks run in order: empty, malformed, consent. A repeat submission
    /// overwrites the previous record.
    pub fn submit_with_consent(
        &self,
        email: &str,
        consent: bool,
        matched_courses: &[MatchedCourse],
    ) -> Result<EmailConsentRecord, GateError> {
        let email = validate_email(email)?;
        if !consent {
            return Err(ValidationError::ConsentRequired.into());
        }

        let record = EmailConsentRecord::new(
            email,
            consent,
            matched_courses.iter().map(|c| c.name.as_str()),
            Utc::now(),
        );

        // The bare marker goes last: the gate only closes once both keys landed.
        self.store.save(StoreKey::EmailConsent, &record)?;
        if let Err(e) = self.store.save_text(StoreKey::UserEmail, &record.email) {
            if let Err(clear_err) = self.store.clear(StoreKey::EmailConsent) {
                warn!(error = %clear_err, "Failed to roll back partial email consent");
            }
            return Err(e.into());
        }

        info!(
            courses = record.matched_course_names.len(),
            "Recorded email consent"
        );
        Ok(record)
    }
}
