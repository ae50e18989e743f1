use crate::{errors::ApiError, state::AppState};
use axum::{extract::State, Json};
use ferrous_watch_application::use_cases::DatabaseOptimizationReport;
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_database_analysis")]
pub async fn get_database_analysis(
    State(state): State<AppState>,
) -> Result<Json<DatabaseOptimizationReport>, ApiError> {
    let report = state.optimize_database.execute().await?;

    debug!(
        tables = report.tables.len(),
        suggestions = report.suggestions.len(),
        "Database analysis retrieved"
    );

    Ok(Json(report))
}
