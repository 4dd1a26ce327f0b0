//! Share Dispatcher: runs an ordered list of share strategies until one
//! finishes.
//!
//! Default chain: native share sheet, then clipboard copy. A strategy either
//! finishes (completed, cancelled, copied) or falls through to the next one.
//! A user cancelling the native sheet finishes the chain: nothing is copied.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::in_flight::InFlight;
use crate::models::MatchedCourse;
use crate::share::intent::{NativeSharePayload, ShareIntent};
use crate::share::links::{deep_link, SharePlatform};
use crate::share::{ShareError, ShareOutcome};

/// Window features for platform share pop-ups.
pub const POPUP_FEATURES: &str = "width=600,height=400";
pub const OPEN_DAYS_URL: &str = "https://www.lincoln.ac.uk/studywithus/opendaysandvisits/";
const EXTERNAL_LINK_FEATURES: &str = "noopener,noreferrer";

// ────────────────────────────────────────────────────────────────────────────
// Collaborators supplied by the host environment
// ────────────────────────────────────────────────────────────────────────────

/// The platform share sheet.
#[async_trait]
pub trait NativeShare: Send + Sync {
    /// Resolves once the user finishes. Must return `ShareError::Aborted` when
    /// the user dismisses the sheet.
    async fn share(&self, payload: &NativeSharePayload) -> Result<(), ShareError>;
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ShareError>;
}

/// Opens a URL in a new window or tab.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str, features: &str) -> Result<(), ShareError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Strategies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    Finished(ShareOutcome),
    /// Try the next strategy; carries the reason for the log.
    FallThrough(String),
}

#[async_trait]
pub trait ShareStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn attempt(&self, intent: &ShareIntent) -> StrategyOutcome;
}

pub struct NativeShareStrategy {
    native: Option<Arc<dyn NativeShare>>,
}

impl NativeShareStrategy {
    /// `None` when the runtime has no share sheet.
    pub fn new(native: Option<Arc<dyn NativeShare>>) -> Self {
        Self { native }
    }
}

#[async_trait]
impl ShareStrategy for NativeShareStrategy {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn attempt(&self, intent: &ShareIntent) -> StrategyOutcome {
        let Some(native) = &self.native else {
            return StrategyOutcome::FallThrough("native share unavailable".to_string());
        };
        match native.share(&intent.native_payload()).await {
            Ok(()) => StrategyOutcome::Finished(ShareOutcome::Completed),
            Err(ShareError::Aborted) => StrategyOutcome::Finished(ShareOutcome::Cancelled),
            Err(e) => StrategyOutcome::FallThrough(e.to_string()),
        }
    }
}

pub struct ClipboardStrategy {
    clipboard: Arc<dyn Clipboard>,
}

impl ClipboardStrategy {
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self { clipboard }
    }
}

#[async_trait]
impl ShareStrategy for ClipboardStrategy {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    async fn attempt(&self, intent: &ShareIntent) -> StrategyOutcome {
        match self.clipboard.write_text(&intent.clipboard_text()) {
            Ok(()) => StrategyOutcome::Finished(ShareOutcome::FallbackCopied),
            Err(e) => StrategyOutcome::FallThrough(e.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dispatcher
// ────────────────────────────────────────────────────────────────────────────

pub struct ShareDispatcher {
    strategies: Vec<Box<dyn ShareStrategy>>,
    opener: Arc<dyn LinkOpener>,
    in_flight: InFlight,
}

impl ShareDispatcher {
    /// Standard chain: native share (if present), then clipboard.
    pub fn new(
        native: Option<Arc<dyn NativeShare>>,
        clipboard: Arc<dyn Clipboard>,
        opener: Arc<dyn LinkOpener>,
    ) -> Self {
        Self::with_strategies(
            vec![
                Box::new(NativeShareStrategy::new(native)),
                Box::new(ClipboardStrategy::new(clipboard)),
            ],
            opener,
        )
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn ShareStrategy>>,
        opener: Arc<dyn LinkOpener>,
    ) -> Self {
        Self {
            strategies,
            opener,
            in_flight: InFlight::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Shares `intent` through the first strategy that finishes.
    ///
    /// A share already in progress makes this return `ShareError::Busy`.
    pub async fn share(&self, intent: &ShareIntent) -> Result<ShareOutcome, ShareError> {
        let _guard = self.in_flight.try_begin().ok_or(ShareError::Busy)?;

        for strategy in &self.strategies {
            match strategy.attempt(intent).await {
                StrategyOutcome::Finished(outcome) => {
                    info!(strategy = strategy.name(), ?outcome, "Share finished");
                    return Ok(outcome);
                }
                StrategyOutcome::FallThrough(reason) => {
                    debug!(strategy = strategy.name(), %reason, "Share strategy fell through");
                }
            }
        }

        warn!(course = %intent.course_name, "Every share strategy fell through");
        Err(ShareError::Exhausted)
    }

    /// Opens the composer for `platform` directly, skipping the chain.
    /// Returns the URL that was opened.
    pub fn share_to(
        &self,
        platform: SharePlatform,
        intent: &ShareIntent,
    ) -> Result<String, ShareError> {
        let url = deep_link(platform, intent);
        if let Err(e) = self.opener.open(&url, POPUP_FEATURES) {
            warn!(%platform, error = %e, "Failed to open share link");
            return Err(ShareError::Open(e.to_string()));
        }
        info!(%platform, "Opened share link");
        Ok(url)
    }
}

/// "Apply now": opens the course page when the course has one.
/// Returns whether anything was opened.
pub fn open_course_link(
    course: &MatchedCourse,
    opener: &dyn LinkOpener,
) -> Result<bool, ShareError> {
    match course.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        Some(link) => {
            opener.open(link, EXTERNAL_LINK_FEATURES)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// "Book an open day": opens the university's open-days page.
pub fn open_open_days(opener: &dyn LinkOpener) -> Result<(), ShareError> {
    opener.open(OPEN_DAYS_URL, EXTERNAL_LINK_FEATURES)?;
    info!("Opened open days page");
    Ok(())
}
