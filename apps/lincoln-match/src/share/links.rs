//! Per-platform share deep links.
//!
//! Each platform has a fixed URL template; every parameter value is
//! percent-encoded. These links bypass the native/clipboard chain entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::share::intent::ShareIntent;
use crate::share::ShareError;

pub const TWITTER_HASHTAGS: [&str; 3] = ["MyLincolnMatch", "UniLincoln", "CourseMatch"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    WhatsApp,
    Facebook,
    Twitter,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 3] = [
        SharePlatform::WhatsApp,
        SharePlatform::Facebook,
        SharePlatform::Twitter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SharePlatform::WhatsApp => "whatsapp",
            SharePlatform::Facebook => "facebook",
            SharePlatform::Twitter => "twitter",
        }
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharePlatform {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whatsapp" => Ok(SharePlatform::WhatsApp),
            "facebook" => Ok(SharePlatform::Facebook),
            "twitter" => Ok(SharePlatform::Twitter),
            other => Err(ShareError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Builds the composer URL for `platform`, pre-filled from `intent`.
pub fn deep_link(platform: SharePlatform, intent: &ShareIntent) -> String {
    let text = urlencoding::encode(&intent.message_text);
    let url = urlencoding::encode(&intent.target_url);
    match platform {
        SharePlatform::WhatsApp => {
            let body = format!("{} {}", intent.message_text, intent.target_url);
            format!("https://wa.me/?text={}", urlencoding::encode(&body))
        }
        SharePlatform::Facebook => {
            format!("https://www.facebook.com/sharer/sharer.php?u={url}&quote={text}")
        }
        SharePlatform::Twitter => {
            let hashtags = TWITTER_HASHTAGS
                .iter()
                .map(|tag| urlencoding::encode(tag))
                .collect::<Vec<_>>()
                .join(",");
            format!("https://twitter.com/intent/tweet?text={text}&url={url}&hashtags={hashtags}")
        }
    }
}

/// All deep links for one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub whatsapp: String,
    pub facebook: String,
    pub twitter: String,
}

impl ShareLinks {
    pub fn for_intent(intent: &ShareIntent) -> Self {
        Self {
            whatsapp: deep_link(SharePlatform::WhatsApp, intent),
            facebook: deep_link(SharePlatform::Facebook, intent),
            twitter: deep_link(SharePlatform::Twitter, intent),
        }
    }
}
