//! Routine CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row, Transaction};

use crate::{
    error::{DatabaseResultExt, Result, TendError},
    models::{Category, Routine, Step},
    params::NewRoutine,
};

const INSERT_ROUTINE_SQL: &str = "INSERT INTO routines (id, title, description, category, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_ROUTINE_SQL: &str =
    "SELECT id, title, description, category, created_at, updated_at FROM routines WHERE id = ?1";
const SELECT_ROUTINES_SQL: &str =
    "SELECT id, title, description, category, created_at, updated_at FROM routines ORDER BY rowid";
const CHECK_ROUTINE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM routines WHERE id = ?1)";
const SELECT_CREATED_AT_SQL: &str = "SELECT created_at FROM routines WHERE id = ?1";
const UPDATE_ROUTINE_SQL: &str = "UPDATE routines SET title = ?1, description = ?2, category = ?3, updated_at = ?4 WHERE id = ?5";
const DELETE_ROUTINE_SQL: &str = "DELETE FROM routines WHERE id = ?1";
const CHECK_RETIRED_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM retired_ids WHERE kind = ?1 AND scope = ?2 AND id = ?3)";
const INSERT_RETIRED_SQL: &str =
    "INSERT OR IGNORE INTO retired_ids (kind, scope, id, retired_at) VALUES (?1, ?2, ?3, ?4)";

/// Kinds of identifiers kept in the retired ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdKind {
    Routine,
    Step,
}

impl IdKind {
    fn as_str(self) -> &'static str {
        match self {
            IdKind::Routine => "routine",
            IdKind::Step => "step",
        }
    }
}

/// Parses a stored RFC 3339 timestamp column.
pub(super) fn timestamp_column(row: &Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn build_routine_from_row(row: &Row) -> rusqlite::Result<Routine> {
    let category_str: String = row.get(3)?;
    let category = Category::parse_known(&category_str).map_err(|reason| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, reason.into())
    })?;

    Ok(Routine {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category,
        steps: Vec::new(),
        created_at: timestamp_column(row, 4)?,
        updated_at: timestamp_column(row, 5)?,
    })
}

/// Loads one routine with its steps through any connection or transaction.
pub(super) fn load_routine(conn: &Connection, id: &str) -> Result<Option<Routine>> {
    let mut routine = conn
        .query_row(SELECT_ROUTINE_SQL, params![id], build_routine_from_row)
        .optional()
        .db_context("Failed to query routine")?;

    if let Some(ref mut routine) = routine {
        routine.steps = super::step_queries::load_steps(conn, &routine.id)?;
    }

    Ok(routine)
}

fn is_retired(tx: &Transaction, kind: IdKind, scope: &str, id: &str) -> Result<bool> {
    tx.query_row(CHECK_RETIRED_SQL, params![kind.as_str(), scope, id], |row| {
        row.get(0)
    })
    .db_context("Failed to check retired identifiers")
}

fn retire(tx: &Transaction, kind: IdKind, scope: &str, id: &str, now: &str) -> Result<()> {
    tx.execute(INSERT_RETIRED_SQL, params![kind.as_str(), scope, id, now])
        .db_context("Failed to retire identifier")?;
    Ok(())
}

/// Rejects any step id of `steps` that was retired within `routine_id`.
fn check_step_ids(tx: &Transaction, routine_id: &str, steps: &[Step]) -> Result<()> {
    for step in steps {
        if is_retired(tx, IdKind::Step, routine_id, &step.id)? {
            return Err(TendError::invalid_input("steps.id").with_reason(format!(
                "Step ID '{}' was used by a deleted step and cannot be reused",
                step.id
            )));
        }
    }
    Ok(())
}

impl super::Database {
    /// Lists all routines in insertion order, steps included.
    pub fn list_routines(&self) -> Result<Vec<Routine>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ROUTINES_SQL)
            .db_context("Failed to prepare query")?;

        let mut routines = stmt
            .query_map([], build_routine_from_row)
            .db_context("Failed to query routines")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch routines")?;

        for routine in &mut routines {
            routine.steps = super::step_queries::load_steps(&self.connection, &routine.id)?;
        }

        Ok(routines)
    }

    /// Retrieves a routine by its ID.
    pub fn get_routine(&self, id: &str) -> Result<Option<Routine>> {
        load_routine(&self.connection, id)
    }

    /// Stores a new routine and returns the stored document.
    ///
    /// Missing identifiers are generated. The routine ID must be neither in
    /// use nor retired, and no step ID may collide with the ledger.
    pub fn insert_routine(&mut self, params: NewRoutine) -> Result<Routine> {
        let tx = self.begin_write()?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let routine = params.into_routine(now, now);

        let exists: bool = tx
            .query_row(CHECK_ROUTINE_EXISTS_SQL, params![&routine.id], |row| row.get(0))
            .db_context("Failed to check routine existence")?;
        if exists {
            return Err(TendError::invalid_input("id")
                .with_reason(format!("Routine with ID '{}' already exists", routine.id)));
        }
        if is_retired(&tx, IdKind::Routine, "", &routine.id)? {
            return Err(TendError::invalid_input("id").with_reason(format!(
                "Routine ID '{}' belonged to a deleted routine and cannot be reused",
                routine.id
            )));
        }
        check_step_ids(&tx, &routine.id, &routine.steps)?;

        tx.execute(
            INSERT_ROUTINE_SQL,
            params![
                &routine.id,
                &routine.title,
                routine.description.as_deref(),
                routine.category.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert routine")?;

        super::step_queries::write_steps(&tx, &routine.id, &routine.steps)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(routine)
    }

    /// Replaces the whole document of an existing routine.
    ///
    /// `created_at` is preserved and `updated_at` bumped. Steps missing from
    /// the new document are retired.
    pub fn replace_routine(&mut self, id: &str, mut params: NewRoutine) -> Result<Routine> {
        match params.id.as_deref() {
            Some(given) if given != id => {
                return Err(TendError::invalid_input("id").with_reason(format!(
                    "Body ID '{given}' does not match routine ID '{id}'"
                )));
            }
            _ => params.id = Some(id.to_string()),
        }

        let tx = self.begin_write()?;

        let created_at = tx
            .query_row(SELECT_CREATED_AT_SQL, params![id], |row| {
                timestamp_column(row, 0)
            })
            .optional()
            .db_context("Failed to query routine")?
            .ok_or_else(|| TendError::RoutineNotFound { id: id.to_string() })?;

        let previous = super::step_queries::load_steps(&tx, id)?;
        let now = Timestamp::now();
        let now_str = now.to_string();
        let routine = params.into_routine(created_at, now);

        check_step_ids(&tx, id, &routine.steps)?;

        tx.execute(
            UPDATE_ROUTINE_SQL,
            params![
                &routine.title,
                routine.description.as_deref(),
                routine.category.as_str(),
                &now_str,
                id
            ],
        )
        .db_context("Failed to update routine")?;

        super::step_queries::delete_steps(&tx, id)?;
        super::step_queries::write_steps(&tx, id, &routine.steps)?;

        for dropped in previous
            .iter()
            .filter(|old| routine.step(&old.id).is_none())
        {
            retire(&tx, IdKind::Step, id, &dropped.id, &now_str)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(routine)
    }

    /// Deletes a routine and its steps.
    ///
    /// Returns the deleted routine, or `None` if it doesn't exist. The routine
    /// ID and its step IDs are retired.
    pub fn delete_routine(&mut self, id: &str) -> Result<Option<Routine>> {
        let tx = self.begin_write()?;

        let Some(routine) = load_routine(&tx, id)? else {
            return Ok(None);
        };

        let now_str = Timestamp::now().to_string();
        retire(&tx, IdKind::Routine, "", id, &now_str)?;
        for step in &routine.steps {
            retire(&tx, IdKind::Step, id, &step.id, &now_str)?;
        }

        // Steps go with the routine through ON DELETE CASCADE
        tx.execute(DELETE_ROUTINE_SQL, params![id])
            .db_context("Failed to delete routine")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(routine))
    }
}
