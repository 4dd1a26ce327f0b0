// Sharing a course match: native share sheet with clipboard fallback, plus
// explicit per-platform deep links.
// Nothing here touches the match session or the persistence store.

pub mod dispatcher;
pub mod handlers;
pub mod intent;
pub mod links;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dispatcher::{
    open_course_link, open_open_days, Clipboard, ClipboardStrategy, LinkOpener, NativeShare,
    NativeShareStrategy, ShareDispatcher, ShareStrategy, StrategyOutcome, OPEN_DAYS_URL,
};
pub use intent::{NativeSharePayload, ShareIntent};
pub use links::{deep_link, ShareLinks, SharePlatform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareOutcome {
    /// The native share sheet reported success.
    Completed,
    /// The user dismissed the native share sheet. Not an error.
    Cancelled,
    /// Message and link were copied to the clipboard instead.
    FallbackCopied,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The user backed out of the share sheet.
    #[error("share was cancelled by the user")]
    Aborted,

    #[error("share target unavailable")]
    Unavailable,

    #[error("share failed: {0}")]
    Failed(String),

    #[error("no share strategy succeeded")]
    Exhausted,

    #[error("a share is already in progress")]
    Busy,

    #[error("unknown share platform '{0}'")]
    UnknownPlatform(String),

    #[error("could not open share link: {0}")]
    Open(String),
}
