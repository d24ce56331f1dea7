use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::database::ActivityRegistry;
use crate::error::RegistryError;
use crate::models::{Activity, ErrorDetail, MessageResponse};
use crate::services::activities_service;

type ApiError = (StatusCode, Json<ErrorDetail>);

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    email: Option<String>,
}

pub async fn list_activities_handler(
    State(registry): State<Arc<ActivityRegistry>>,
) -> Json<IndexMap<String, Activity>> {
    Json(activities_service::list_activities(&registry))
}

pub async fn activity_handler(
    path: Result<Path<String>, PathRejection>,
    State(registry): State<Arc<ActivityRegistry>>,
) -> Result<Json<Activity>, ApiError> {
    let activity_name = activity_name(path)?;
    activities_service::load_activity(&registry, &activity_name)
        .map(Json)
        .map_err(registry_error)
}

pub async fn signup_handler(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    State(registry): State<Arc<ActivityRegistry>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity_name = activity_name(path)?;
    let email = require_email(query)?;
    activities_service::signup(&registry, &activity_name, &email)
        .map(Json)
        .map_err(registry_error)
}

pub async fn unregister_handler(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    State(registry): State<Arc<ActivityRegistry>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity_name = activity_name(path)?;
    let email = require_email(query)?;
    activities_service::unregister(&registry, &activity_name, &email)
        .map(Json)
        .map_err(registry_error)
}

fn activity_name(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    match path {
        Ok(Path(name)) => Ok(name),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "activity path rejected");
            Err((rejection.status(), Json(ErrorDetail::new(rejection.body_text()))))
        }
    }
}

// The email itself is passed on untouched; only a missing, blank or
// unparsable value is rejected here.
fn require_email(query: Result<Query<EmailQuery>, QueryRejection>) -> Result<String, ApiError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "email query rejected");
            return Err(bad_request(&rejection.body_text()));
        }
    };
    let Some(email) = query.email else {
        return Err(bad_request("Missing email query parameter"));
    };
    if email.trim().is_empty() {
        return Err(bad_request("Email must not be empty"));
    }
    Ok(email)
}

fn bad_request(detail: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorDetail::new(detail)))
}

fn registry_error(e: RegistryError) -> ApiError {
    let status = match e {
        RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
        RegistryError::AlreadyRegistered { .. }
        | RegistryError::ActivityFull { .. }
        | RegistryError::NotRegistered { .. } => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorDetail::new(e.to_string())))
}
