use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Captured contact intent, waiting for a mailing integration to pick it up.
///
/// Stored under `emailConsent` as
/// `{email, consent, matchedCourses: [string], timestamp: ISO-8601}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConsentRecord {
    pub email: String,
    pub consent: bool,
    #[serde(rename = "matchedCourses")]
    pub matched_course_names: Vec<String>,
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

impl EmailConsentRecord {
    /// Course names are de-duplicated, keeping first-seen order.
    pub fn new<I, S>(
        email: impl Into<String>,
        consent: bool,
        course_names: I,
        captured_at: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matched_course_names: Vec<String> = Vec::new();
        for name in course_names {
            let name = name.into();
            if !matched_course_names.contains(&name) {
                matched_course_names.push(name);
            }
        }
        Self {
            email: email.into(),
            consent,
            matched_course_names,
            captured_at,
        }
    }
}
