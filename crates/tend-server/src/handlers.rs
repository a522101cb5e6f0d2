//! Request handlers of the routine API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tend_core::{
    params::{Id, NewRoutine, SetStepCompletion, StepCompletion},
    Routine, TendError,
};

use crate::{errors::ApiError, AppState};

type ApiResult<T> = Result<T, ApiError>;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_routines(State(state): State<AppState>) -> ApiResult<Json<Vec<Routine>>> {
    Ok(Json(state.store.list_routines().await?))
}

pub async fn get_routine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Routine>> {
    let params = Id { id };
    let routine = state
        .store
        .get_routine(&params)
        .await?
        .ok_or(TendError::RoutineNotFound { id: params.id })?;
    Ok(Json(routine))
}

pub async fn create_routine(
    State(state): State<AppState>,
    payload: Result<Json<NewRoutine>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Routine>)> {
    let Json(params) = payload?;
    let routine = state.store.create_routine(params).await?;
    Ok((StatusCode::CREATED, Json(routine)))
}

pub async fn replace_routine(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewRoutine>, JsonRejection>,
) -> ApiResult<Json<Routine>> {
    let Json(params) = payload?;
    let routine = state.store.replace_routine(&Id { id }, params).await?;
    Ok(Json(routine))
}

pub async fn delete_routine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete_routine(&Id { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_step_completion(
    State(state): State<AppState>,
    Path((routine_id, step_id)): Path<(String, String)>,
    payload: Result<Json<StepCompletion>, JsonRejection>,
) -> ApiResult<Json<Routine>> {
    let Json(StepCompletion { completed }) = payload?;
    let routine = state
        .store
        .set_step_completion(&SetStepCompletion {
            routine_id,
            step_id,
            completed,
        })
        .await?;
    Ok(Json(routine))
}
