use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::repositories::Repository;
use crate::state::AppState;

/// The `{id}` segment of a route; other path parameters are ignored
#[derive(Debug, Deserialize)]
pub struct IdParam {
    pub id: i32,
}

/// Existence check middleware - answers 404 before the handler runs when the
/// entity addressed by `{id}` does not exist.
///
/// Attach with `route_layer` so the path parameters are already matched:
/// `middleware::from_fn_with_state(state, ensure_exists::<ProjectRepository, Project>)`
pub async fn ensure_exists<R, T>(
    State(state): State<AppState>,
    path: Result<Path<IdParam>, PathRejection>,
    request: Request,
    next: Next,
) -> Result<Response, AppError>
where
    R: Repository<T>,
    T: Send + Sync,
{
    let Path(IdParam { id }) =
        path.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    if !R::exists(&state.db, id).await? {
        tracing::debug!(entity = R::ENTITY, id, "Rejected request for missing entity");
        return Err(R::not_found());
    }

    Ok(next.run(request).await)
}
