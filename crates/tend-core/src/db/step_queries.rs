//! Step queries and completion updates.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, Row, Transaction};

use crate::{
    error::{DatabaseResultExt, Result, TendError},
    models::{MusicPlatform, Routine, Step},
};

const SELECT_STEPS_BY_ROUTINE_SQL: &str = "SELECT id, title, duration, completed, music_url, music_platform FROM steps WHERE routine_id = ?1 ORDER BY step_order";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (routine_id, id, title, duration, completed, music_url, music_platform, step_order) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const DELETE_STEPS_SQL: &str = "DELETE FROM steps WHERE routine_id = ?1";
const CHECK_ROUTINE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM routines WHERE id = ?1)";
const UPDATE_STEP_COMPLETED_SQL: &str =
    "UPDATE steps SET completed = ?1 WHERE routine_id = ?2 AND id = ?3";
const UPDATE_ROUTINE_TIMESTAMP_SQL: &str = "UPDATE routines SET updated_at = ?1 WHERE id = ?2";

fn build_step_from_row(row: &Row) -> rusqlite::Result<Step> {
    let platform: Option<String> = row.get(5)?;
    let music_platform = platform
        .map(|value| {
            value.parse::<MusicPlatform>().map_err(|reason| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, reason.into())
            })
        })
        .transpose()?;

    Ok(Step {
        id: row.get(0)?,
        title: row.get(1)?,
        duration: row.get(2)?,
        completed: row.get(3)?,
        music_url: row.get(4)?,
        music_platform,
    })
}

/// Loads the steps of a routine in execution order.
pub(super) fn load_steps(conn: &Connection, routine_id: &str) -> Result<Vec<Step>> {
    let mut stmt = conn
        .prepare(SELECT_STEPS_BY_ROUTINE_SQL)
        .db_context("Failed to prepare query")?;

    let steps = stmt
        .query_map(params![routine_id], build_step_from_row)
        .db_context("Failed to query steps")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch steps")?;

    Ok(steps)
}

/// Writes `steps` for a routine, using their position as the order.
pub(super) fn write_steps(tx: &Transaction, routine_id: &str, steps: &[Step]) -> Result<()> {
    let mut stmt = tx
        .prepare(INSERT_STEP_SQL)
        .db_context("Failed to prepare step insert")?;

    for (order, step) in steps.iter().enumerate() {
        stmt.execute(params![
            routine_id,
            &step.id,
            &step.title,
            step.duration,
            step.completed,
            step.music_url.as_deref(),
            step.music_platform.map(|platform| platform.as_str()),
            order as i64
        ])
        .db_context("Failed to insert step")?;
    }

    Ok(())
}

pub(super) fn delete_steps(tx: &Transaction, routine_id: &str) -> Result<()> {
    tx.execute(DELETE_STEPS_SQL, params![routine_id])
        .db_context("Failed to delete steps")?;
    Ok(())
}

impl super::Database {
    /// Retrieves the steps of a routine in execution order.
    pub fn get_steps(&self, routine_id: &str) -> Result<Vec<Step>> {
        load_steps(&self.connection, routine_id)
    }

    /// Sets the completion flag of one step and returns the updated routine.
    ///
    /// The routine's `updated_at` is bumped even when the flag already had the
    /// requested value.
    pub fn set_step_completion(
        &mut self,
        routine_id: &str,
        step_id: &str,
        completed: bool,
    ) -> Result<Routine> {
        let tx = self.begin_write()?;

        let routine_exists: bool = tx
            .query_row(CHECK_ROUTINE_EXISTS_SQL, params![routine_id], |row| row.get(0))
            .db_context("Failed to check routine existence")?;
        if !routine_exists {
            return Err(TendError::RoutineNotFound {
                id: routine_id.to_string(),
            });
        }

        let rows_affected = tx
            .execute(UPDATE_STEP_COMPLETED_SQL, params![completed, routine_id, step_id])
            .db_context("Failed to update step")?;
        if rows_affected == 0 {
            return Err(TendError::StepNotFound {
                routine_id: routine_id.to_string(),
                step_id: step_id.to_string(),
            });
        }

        tx.execute(
            UPDATE_ROUTINE_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), routine_id],
        )
        .db_context("Failed to update routine timestamp")?;

        let routine = super::routine_queries::load_routine(&tx, routine_id)?
            .ok_or_else(|| TendError::RoutineNotFound {
                id: routine_id.to_string(),
            })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(routine)
    }
}
