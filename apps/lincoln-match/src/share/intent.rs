use serde::Serialize;

use crate::models::MatchedCourse;

pub const NATIVE_SHARE_TITLE: &str = "My Lincoln Course Match";
/// Used in the share URL when the caller has no course id.
pub const FALLBACK_COURSE_ID: &str = "match";

/// What gets shared for one course: built fresh for each share action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareIntent {
    pub course_name: String,
    pub course_id: String,
    pub target_url: String,
    pub message_text: String,
}

impl ShareIntent {
    /// `origin` is the public site origin; the link points at
    /// `<origin>/course/<course_id>`.
    pub fn for_course(
        course: &MatchedCourse,
        course_id: Option<&str>,
        origin: &str,
        university: &str,
    ) -> Self {
        let course_id = course_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(FALLBACK_COURSE_ID)
            .to_string();
        let target_url = format!(
            "{}/course/{}",
            origin.trim_end_matches('/'),
            urlencoding::encode(&course_id)
        );
        let message_text = format!(
            "I matched with {} at {university}! 🎓 Find your perfect course match! #MyLincolnMatch #UniLincoln",
            course.name
        );
        Self {
            course_name: course.name.clone(),
            course_id,
            target_url,
            message_text,
        }
    }

    /// Text placed on the clipboard when native sharing is not possible.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n{}", self.message_text, self.target_url)
    }

    pub fn native_payload(&self) -> NativeSharePayload {
        NativeSharePayload {
            title: NATIVE_SHARE_TITLE.to_string(),
            text: self.message_text.clone(),
            url: self.target_url.clone(),
        }
    }
}

/// `{title, text, url}` handed to the platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeSharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(id: Option<&str>) -> ShareIntent {
        ShareIntent::for_course(
            &MatchedCourse::new("Computer Science", ""),
            id,
            "https://match.lincoln.ac.uk/",
            "University of Lincoln",
        )
    }

    #[test]
    fn test_message_names_course_and_university() {
        assert_eq!(
            intent(None).message_text,
            "I matched with Computer Science at University of Lincoln! 🎓 Find your perfect course match! #MyLincolnMatch #UniLincoln"
        );
    }

    #[test]
    fn test_missing_or_blank_id_falls_back_to_match() {
        assert_eq!(intent(None).target_url, "https://match.lincoln.ac.uk/course/match");
        assert_eq!(intent(Some("  ")).course_id, "match");
    }

    #[test]
    fn test_course_id_is_path_encoded() {
        assert_eq!(
            intent(Some("cs ai")).target_url,
            "https://match.lincoln.ac.uk/course/cs%20ai"
        );
    }

    #[test]
    fn test_clipboard_text_is_message_newline_url() {
        let intent = intent(Some("cmp"));
        assert_eq!(
            intent.clipboard_text(),
            format!("{}\n{}", intent.message_text, intent.target_url)
        );
    }

    #[test]
    fn test_native_payload_uses_fixed_title() {
        let payload = intent(None).native_payload();
        assert_eq!(payload.title, "My Lincoln Course Match");
        assert_eq!(payload.url, "https://match.lincoln.ac.uk/course/match");
    }
}
