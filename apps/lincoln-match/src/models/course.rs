use serde::{Deserialize, Serialize};

/// A course the user swiped right on during matching.
///
/// Field names follow the camelCase layout written by the matching flow,
/// so stored sessions deserialize without translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCourse {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_grades: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl MatchedCourse {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            entry_grades: None,
            interests: None,
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_entry_grades(mut self, grades: impl Into<String>) -> Self {
        self.entry_grades = Some(grades.into());
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = Some(interests.into_iter().map(Into::into).collect());
        self
    }

    /// A course is usable only if it has a visible name.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
