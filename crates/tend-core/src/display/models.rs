//! Display implementations for domain models.
//!
//! All output is markdown, rendered by the CLI's terminal renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    catalog::Notification,
    models::{Category, MusicPlatform, Routine, RoutineSummary, Step},
};

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for MusicPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.service_name())
    }
}

/// Completion marker shown next to a step title.
pub(crate) fn completion_icon(completed: bool) -> &'static str {
    if completed {
        "✓ Done"
    } else {
        "○ Todo"
    }
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Total: {} min", self.total_minutes())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this routine.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for (index, step) in self.steps.iter().enumerate() {
                write!(f, "{}. ", index + 1)?;
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "**{}** · {} min · {} (ID: {})",
            self.title,
            self.duration,
            completion_icon(self.completed),
            self.id
        )?;

        if let Some((platform, url)) = self.playlist() {
            writeln!(f, "   - Music: [Open in {platform}]({url})")?;
        }

        Ok(())
    }
}

impl fmt::Display for RoutineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_steps > 0 {
            format!(" ({}/{})", self.completed_steps, self.total_steps)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;

        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(f, "- **Category**: {}", self.category)?;
        writeln!(f, "- **Duration**: {} min", self.total_minutes)?;
        if self.playlist_count > 0 {
            writeln!(f, "- **Playlists**: {}", self.playlist_count)?;
        }
        if !self.step_titles.is_empty() {
            writeln!(f, "- **Steps**: {}", self.step_titles.join(", "))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{}** {}", self.title, self.body)
    }
}
