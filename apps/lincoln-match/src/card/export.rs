//! Saving a rendered story card as a downloadable file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::info;

use crate::card::renderer::{StoryCard, StoryCardRenderer};
use crate::card::RenderError;
use crate::in_flight::InFlight;
use crate::models::MatchedCourse;

/// Writes `card` into `dir` under its own file name.
///
/// Bytes go to a temporary file first; the handle is released on every path,
/// and on failure it is deleted, so no partial image is left behind.
pub fn write_story_card(card: &StoryCard, dir: &Path) -> Result<PathBuf, RenderError> {
    let target = dir.join(&card.file_name);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&card.png)?;
    tmp.flush()?;
    tmp.persist(&target).map_err(|e| RenderError::Export(e.error))?;
    Ok(target)
}

/// The "save my story card" action: render, then save into the download
/// directory. Refuses to start while a previous export is still running.
pub struct StoryCardExporter {
    renderer: Arc<StoryCardRenderer>,
    download_dir: PathBuf,
    in_flight: InFlight,
}

impl StoryCardExporter {
    pub fn new(renderer: Arc<StoryCardRenderer>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            download_dir: download_dir.into(),
            in_flight: InFlight::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub async fn export(
        &self,
        course: &MatchedCourse,
        university_label: &str,
    ) -> Result<PathBuf, RenderError> {
        let _guard = self.in_flight.try_begin().ok_or(RenderError::Busy)?;
        let card = self.renderer.render(course, university_label).await?;
        let path = write_story_card(&card, &self.download_dir)?;
        info!(path = %path.display(), "Story card saved");
        Ok(path)
    }
}
