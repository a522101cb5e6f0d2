//! Step model definition and related functionality.

use serde::{Deserialize, Serialize};

use super::MusicPlatform;

/// A single timed activity within a routine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Identifier, unique within the owning routine
    pub id: String,

    /// Brief title of the activity
    pub title: String,

    /// Duration in whole minutes (at least 1)
    pub duration: u32,

    /// Whether the step has been completed
    #[serde(default)]
    pub completed: bool,

    /// External playlist to accompany the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_url: Option<String>,

    /// Platform hosting `music_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_platform: Option<MusicPlatform>,
}

impl Step {
    /// Create an incomplete step without music.
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration,
            completed: false,
            music_url: None,
            music_platform: None,
        }
    }

    /// Attach a playlist to the step.
    pub fn with_music(mut self, url: impl Into<String>, platform: MusicPlatform) -> Self {
        self.music_url = Some(url.into());
        self.music_platform = Some(platform);
        self
    }

    /// Total countdown budget of the step in seconds.
    pub fn duration_secs(&self) -> u32 {
        self.duration.saturating_mul(60)
    }

    /// The playlist and its platform, if the step has one.
    ///
    /// A missing platform falls back to Spotify.
    pub fn playlist(&self) -> Option<(MusicPlatform, &str)> {
        self.music_url
            .as_deref()
            .map(|url| (self.music_platform.unwrap_or_default(), url))
    }
}
