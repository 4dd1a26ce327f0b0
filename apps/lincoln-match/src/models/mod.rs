pub mod consent;
pub mod course;
pub mod session;

pub use consent::EmailConsentRecord;
pub use course::MatchedCourse;
pub use session::MatchSession;
