//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Routine, RoutineSummary};

/// Newtype wrapper for displaying the routine list.
///
/// # Examples
///
/// ```rust
/// use tend_core::{display::RoutineSummaries, models::RoutineSummary};
///
/// let empty = RoutineSummaries(Vec::<RoutineSummary>::new());
/// assert_eq!(empty.to_string(), "No routines found.\n");
/// ```
pub struct RoutineSummaries(pub Vec<RoutineSummary>);

impl RoutineSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoutineSummary> {
        self.0.iter()
    }
}

impl From<&[Routine]> for RoutineSummaries {
    fn from(routines: &[Routine]) -> Self {
        Self(routines.iter().map(RoutineSummary::from).collect())
    }
}

impl Index<usize> for RoutineSummaries {
    type Output = RoutineSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a RoutineSummaries {
    type Item = &'a RoutineSummary;
    type IntoIter = std::slice::Iter<'a, RoutineSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RoutineSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No routines found.")
        } else {
            for routine in &self.0 {
                write!(f, "{routine}")?;
            }
            Ok(())
        }
    }
}
