//! Lincoln Match - course-match results, email capture and social sharing
//!
//! Holds the state a student carries after matching with courses: the
//! session being browsed, the one-time email/consent gate, the story-card
//! renderer and the share flow. The binary exposes the renderer and the
//! share-link builder over HTTP.

pub mod card;
pub mod config;
pub mod errors;
pub mod gate;
pub mod in_flight;
pub mod models;
pub mod routes;
pub mod share;
pub mod state;
pub mod store;

pub use card::{StoryCard, StoryCardExporter, StoryCardRenderer};
pub use gate::EmailGate;
pub use models::{EmailConsentRecord, MatchSession, MatchedCourse};
pub use share::{ShareDispatcher, ShareIntent, ShareOutcome};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreExt};
