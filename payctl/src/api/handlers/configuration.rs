//! HTTP handlers for the benefits configuration.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    api::models::configuration::Configuration,
    db::handlers::Configurations,
    errors::{Error, Result},
    validation::validate_configuration,
};

#[utoipa::path(
    get,
    path = "/configuration",
    tag = "configuration",
    summary = "Get configuration",
    description = "Get the global payroll and benefit parameters",
    responses(
        (status = 200, description = "Current configuration", body = Configuration),
        (status = 404, description = "Configuration has not been provisioned"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_configuration(State(state): State<AppState>) -> Result<Json<Configuration>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Configurations::new(&mut pool_conn);

    let configuration = repo.get().await?;
    Ok(Json(Configuration::from(configuration)))
}

#[utoipa::path(
    put,
    path = "/configuration",
    tag = "configuration",
    summary = "Update configuration",
    description = "Overwrite every configuration field. Last write wins.",
    request_body = Configuration,
    responses(
        (status = 200, description = "Configuration updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Configuration has not been provisioned"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_configuration(State(state): State<AppState>, Json(update): Json<Configuration>) -> Result<StatusCode> {
    validate_configuration(&update)?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Configurations::new(&mut pool_conn);

    repo.update(&update.into()).await?;
    Ok(StatusCode::OK)
}
