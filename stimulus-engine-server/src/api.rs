//! Request handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use stimulus_engine::core::pipeline::TrialRequest;
use stimulus_engine::schema::trial::TrialSet;

use crate::error::ApiError;
use crate::AppState;

/// GET /trials/{experiment}?materials=<exp>,<fillers>: render a trial set.
///
/// Every request renders from scratch; nothing is cached between requests.
pub async fn get_trials(
    State(app): State<AppState>,
    Path(experiment): Path<String>,
    Query(request): Query<TrialRequest>,
) -> Result<Json<TrialSet>, ApiError> {
    let trial_set = tokio::task::spawn_blocking(move || {
        let mut engine = app.engine()?;
        engine.get_trials_from_store(&experiment, app.store(), &request)
    })
    .await??;
    Ok(Json(trial_set))
}

/// GET /experiments: registered experiment names, sorted.
pub async fn list_experiments(State(app): State<AppState>) -> Json<Vec<String>> {
    Json(
        app.registry()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}
