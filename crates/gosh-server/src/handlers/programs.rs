//! Program handlers: create, get by id, and search.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use gosh_storage::{Program, ProgramId};

use crate::error::ApiError;
use crate::schema::common::ApiResponse;
use crate::schema::programs::{CreateProgramRequest, SearchParams};
use crate::state::AppState;

/// Creates a new program.
///
/// `POST /api/program`
pub async fn create_program(
    State(state): State<AppState>,
    payload: Result<Json<CreateProgramRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Program>>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected create body");
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    let created = {
        let mut store = state.store.lock().await;
        store.create_program(&req.name, &req.description)
    };

    let program = created.map_err(|e| {
        tracing::error!(error = %e, "failed to create program");
        ApiError::InternalError("Unable to create program".to_string())
    })?;

    tracing::info!(id = %program.id, "program created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            program,
            "Program created successfully",
        )),
    ))
}

/// Fetches one program.
///
/// `GET /api/program/{id}`
pub async fn get_program(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Program>>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::BadRequest("Invalid program id".to_string()))?;

    let fetched = {
        let store = state.store.lock().await;
        store.get_program(ProgramId(id))
    };

    match fetched {
        Ok(program) => Ok(Json(ApiResponse::ok(program))),
        Err(e) if e.is_not_found() => Err(ApiError::NotFound("Program not found".to_string())),
        Err(e) => {
            tracing::error!(id, error = %e, "failed to fetch program");
            Err(e.into())
        }
    }
}

/// Searches programs by free text. Never fails once `q` is present.
///
/// `GET /api/program?q=...`
pub async fn search_programs(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Program>>>, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid query".to_string());
    let Query(pairs) = pairs.map_err(|_| invalid())?;
    let params = SearchParams::from_pairs(pairs);
    let q = params.query().ok_or_else(invalid)?;

    let programs = state.search.search(q).await;
    Ok(Json(ApiResponse::ok(programs)))
}
