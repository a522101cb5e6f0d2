//! Music platforms a step playlist can link to.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of supported music platforms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MusicPlatform {
    #[default]
    Spotify,
    Amazon,
}

impl FromStr for MusicPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spotify" => Ok(MusicPlatform::Spotify),
            "amazon" => Ok(MusicPlatform::Amazon),
            _ => Err(format!("Invalid music platform: {s}")),
        }
    }
}

impl MusicPlatform {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicPlatform::Spotify => "spotify",
            MusicPlatform::Amazon => "amazon",
        }
    }

    /// Name of the service as shown on "open" actions.
    pub fn service_name(&self) -> &'static str {
        match self {
            MusicPlatform::Spotify => "Spotify",
            MusicPlatform::Amazon => "Amazon Music",
        }
    }
}
