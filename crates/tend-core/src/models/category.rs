//! Routine categories.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Classification tag of a routine.
///
/// Unrecognized values are kept as [`Category::Unknown`] so a client can
/// still display a routine it does not fully understand. The store rejects
/// `Unknown` before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Morning,
    Evening,
    Workout,
    Meditation,
    #[default]
    Custom,
    /// A value outside the fixed enumeration
    Unknown(String),
}

impl Category {
    /// Convert to the wire and database string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Morning => "morning",
            Category::Evening => "evening",
            Category::Workout => "workout",
            Category::Meditation => "meditation",
            Category::Custom => "custom",
            Category::Unknown(other) => other,
        }
    }

    /// Whether the category belongs to the fixed enumeration.
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }

    /// Capitalized name used in listings ("Morning", "Workout", ...).
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Parse a category, refusing values outside the fixed enumeration.
    pub fn parse_known(s: &str) -> Result<Self, String> {
        match Category::from(s) {
            Category::Unknown(other) => Err(format!(
                "Invalid category: {other} (expected one of morning, evening, workout, meditation, custom)"
            )),
            known => Ok(known),
        }
    }
}

/// Matches the wire names exactly, so "Morning" is [`Category::Unknown`].
impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "morning" => Category::Morning,
            "evening" => Category::Evening,
            "workout" => Category::Workout,
            "meditation" => Category::Meditation,
            "custom" => Category::Custom,
            _ => Category::Unknown(s.to_string()),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse_known(s)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::from(raw.as_str()))
    }
}
