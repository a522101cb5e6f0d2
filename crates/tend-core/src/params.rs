//! Parameter structures for Tend operations
//!
//! These structures are shared by every interface that talks to the routine
//! store: the HTTP handlers deserialize request bodies straight into them, the
//! catalog serializes them onto the wire, and the CLI builds them from its
//! arguments. They carry the validation rules of the storage boundary so the
//! rules live in one place.
//!
//! ```text
//! CLI args ──┐
//!            ├──▶ NewRoutine / NewStep ──▶ validate() ──▶ Routine (stored)
//! HTTP body ─┘
//! ```

use std::collections::HashSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{Result, TendError},
    models::{Category, MusicPlatform, Routine, Step},
};

/// Longest step the store accepts, one day in minutes.
pub const MAX_STEP_MINUTES: u32 = 24 * 60;

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

/// A routine as submitted for creation or replacement.
///
/// Storage timestamps are never part of the payload. Missing identifiers are
/// assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRoutine {
    /// Client-generated identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title of the routine (required)
    pub title: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Category, `custom` when omitted
    #[serde(default)]
    pub category: Category,
    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<NewStep>,
}

/// A step as submitted inside a [`NewRoutine`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewStep {
    /// Client-generated identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title of the step (required)
    pub title: String,
    /// Duration in minutes (required, between 1 and [`MAX_STEP_MINUTES`])
    pub duration: u32,
    /// Completion flag, false for new steps
    #[serde(default)]
    pub completed: bool,
    /// Optional playlist URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_url: Option<String>,
    /// Platform of the playlist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_platform: Option<MusicPlatform>,
}

/// Body of a step completion request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepCompletion {
    pub completed: bool,
}

/// Parameters for toggling the completion of one step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStepCompletion {
    pub routine_id: String,
    pub step_id: String,
    pub completed: bool,
}

impl NewStep {
    /// Create an incomplete step without an identifier or music.
    pub fn new(title: impl Into<String>, duration: u32) -> Self {
        Self {
            title: title.into(),
            duration,
            ..Default::default()
        }
    }

    /// Attach a playlist to the step.
    pub fn with_music(mut self, url: impl Into<String>, platform: Option<MusicPlatform>) -> Self {
        self.music_url = Some(url.into());
        self.music_platform = platform;
        self
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TendError::invalid_input(format!("steps[{index}].title"))
                .with_reason("Step title is required"));
        }
        if self.duration < 1 {
            return Err(TendError::invalid_input(format!("steps[{index}].duration"))
                .with_reason("Duration must be at least 1 minute"));
        }
        if self.duration > MAX_STEP_MINUTES {
            return Err(TendError::invalid_input(format!("steps[{index}].duration"))
                .with_reason(format!("Duration must be at most {MAX_STEP_MINUTES} minutes")));
        }
        if let Some(id) = &self.id {
            if id.trim().is_empty() {
                return Err(TendError::invalid_input(format!("steps[{index}].id"))
                    .with_reason("Step ID must not be blank"));
            }
        }
        Ok(())
    }

    fn into_step(self) -> Step {
        let music_url = self.music_url.filter(|url| !url.trim().is_empty());
        // The platform only means something next to a URL.
        let music_platform = music_url
            .as_ref()
            .map(|_| self.music_platform.unwrap_or_default());

        Step {
            id: self.id.unwrap_or_else(generate_id),
            title: self.title,
            duration: self.duration,
            completed: self.completed,
            music_url,
            music_platform,
        }
    }
}

impl NewRoutine {
    /// Create a routine payload in the default category.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Validate the payload against the rules of the storage boundary.
    ///
    /// # Errors
    ///
    /// * `TendError::InvalidInput` - blank title, unknown category, a step
    ///   without title or with a zero duration, or duplicate step IDs
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TendError::invalid_input("title").with_reason("Routine title is required"));
        }
        if let Some(id) = &self.id {
            if id.trim().is_empty() {
                return Err(TendError::invalid_input("id").with_reason("Routine ID must not be blank"));
            }
        }
        if let Category::Unknown(other) = &self.category {
            return Err(TendError::invalid_input("category").with_reason(format!(
                "Unknown category '{other}'. Must be one of morning, evening, workout, meditation, custom"
            )));
        }

        let mut seen = HashSet::new();
        for (index, step) in self.steps.iter().enumerate() {
            step.validate(index)?;
            if let Some(id) = &step.id {
                if !seen.insert(id.as_str()) {
                    return Err(TendError::invalid_input(format!("steps[{index}].id"))
                        .with_reason(format!("Duplicate step ID '{id}' within routine")));
                }
            }
        }

        Ok(())
    }

    /// Materialize a stored routine, assigning any missing identifiers.
    ///
    /// Callers validate first; this conversion does not re-check the payload.
    pub fn into_routine(self, created_at: Timestamp, updated_at: Timestamp) -> Routine {
        Routine {
            id: self.id.unwrap_or_else(generate_id),
            title: self.title,
            description: self.description,
            category: self.category,
            steps: self.steps.into_iter().map(NewStep::into_step).collect(),
            created_at,
            updated_at,
        }
    }
}

impl From<&Step> for NewStep {
    fn from(step: &Step) -> Self {
        Self {
            id: Some(step.id.clone()),
            title: step.title.clone(),
            duration: step.duration,
            completed: step.completed,
            music_url: step.music_url.clone(),
            music_platform: step.music_platform,
        }
    }
}

impl From<&Routine> for NewRoutine {
    fn from(routine: &Routine) -> Self {
        Self {
            id: Some(routine.id.clone()),
            title: routine.title.clone(),
            description: routine.description.clone(),
            category: routine.category.clone(),
            steps: routine.steps.iter().map(NewStep::from).collect(),
        }
    }
}

/// Generate a fresh opaque identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn morning() -> NewRoutine {
        NewRoutine {
            title: "Morning".to_string(),
            category: Category::Morning,
            steps: vec![NewStep::new("Stretch", 5)],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_minimal_routine() {
        assert!(morning().validate().is_ok());
        assert!(NewRoutine::new("Empty").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut params = morning();
        params.title = "   ".to_string();

        match params.validate() {
            Err(TendError::InvalidInput { field, .. }) => assert_eq!(field, "title"),
            other => panic!("Expected InvalidInput error, got: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let mut params = morning();
        params.steps.push(NewStep::new("Breathe", 0));

        match params.validate() {
            Err(TendError::InvalidInput { field, reason }) => {
                assert_eq!(field, "steps[1].duration");
                assert!(reason.contains("at least 1 minute"));
            }
            other => panic!("Expected InvalidInput error, got: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_step_longer_than_a_day() {
        let mut params = morning();
        params.steps[0].duration = MAX_STEP_MINUTES;
        assert!(params.validate().is_ok());

        params.steps.push(NewStep::new("Hibernate", 3_000_000_000));
        match params.validate() {
            Err(TendError::InvalidInput { field, reason }) => {
                assert_eq!(field, "steps[1].duration");
                assert!(reason.contains("at most 1440 minutes"));
            }
            other => panic!("Expected InvalidInput error, got: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let mut params = morning();
        params.category = Category::Unknown("brunch".to_string());

        match params.validate() {
            Err(TendError::InvalidInput { field, reason }) => {
                assert_eq!(field, "category");
                assert!(reason.contains("brunch"));
            }
            other => panic!("Expected InvalidInput error, got: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_capitalized_category() {
        let params: NewRoutine =
            serde_json::from_str(r#"{"title": "Loud", "category": "MORNING"}"#).unwrap();

        assert_eq!(params.category, Category::Unknown("MORNING".to_string()));
        assert!(matches!(
            params.validate(),
            Err(TendError::InvalidInput { field, .. }) if field == "category"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_step_ids() {
        let mut params = morning();
        params.steps = vec![
            NewStep {
                id: Some("s1".to_string()),
                ..NewStep::new("Stretch", 5)
            },
            NewStep {
                id: Some("s1".to_string()),
                ..NewStep::new("Shower", 10)
            },
        ];

        assert!(matches!(
            params.validate(),
            Err(TendError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_into_routine_assigns_missing_ids() {
        let now = Timestamp::now();
        let routine = morning().into_routine(now, now);

        assert!(!routine.id.is_empty());
        assert_eq!(routine.steps.len(), 1);
        assert!(!routine.steps[0].id.is_empty());
        assert!(!routine.steps[0].completed);
        assert_eq!(routine.steps[0].music_platform, None);
    }

    #[test]
    fn test_into_routine_keeps_client_ids() {
        let mut params = morning();
        params.id = Some("routine-1".to_string());
        params.steps[0].id = Some("step-1".to_string());

        let now = Timestamp::now();
        let routine = params.into_routine(now, now);
        assert_eq!(routine.id, "routine-1");
        assert_eq!(routine.steps[0].id, "step-1");
    }

    #[test]
    fn test_music_platform_normalization() {
        let mut params = morning();
        params.steps = vec![
            NewStep::new("With url", 5).with_music("https://open.spotify.com/x", None),
            NewStep::new("Blank url", 5).with_music("  ", Some(MusicPlatform::Amazon)),
            NewStep {
                music_platform: Some(MusicPlatform::Amazon),
                ..NewStep::new("Platform only", 5)
            },
        ];

        let now = Timestamp::now();
        let routine = params.into_routine(now, now);
        assert_eq!(routine.steps[0].music_platform, Some(MusicPlatform::Spotify));
        assert_eq!(routine.steps[1].music_url, None);
        assert_eq!(routine.steps[1].music_platform, None);
        assert_eq!(routine.steps[2].music_platform, None);
    }

    #[test]
    fn test_payload_deserializes_camel_case() {
        let json = r#"{
            "title": "Evening",
            "category": "evening",
            "steps": [{"title": "Read", "duration": 20, "musicUrl": "https://music.amazon.com/p", "musicPlatform": "amazon"}]
        }"#;
        let params: NewRoutine = serde_json::from_str(json).expect("valid payload");

        assert_eq!(params.category, Category::Evening);
        assert_eq!(params.steps[0].music_platform, Some(MusicPlatform::Amazon));
        assert!(!params.steps[0].completed);
    }

    #[test]
    fn test_payload_missing_duration_is_rejected() {
        let json = r#"{"title": "Evening", "steps": [{"title": "Read"}]}"#;
        assert!(serde_json::from_str::<NewRoutine>(json).is_err());
    }
}
