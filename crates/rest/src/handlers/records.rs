//! Generic handlers for clinical and financial records.
//!
//! One create/read/list triple serves every record type. The guard type
//! parameter `G` is any extractor that authenticates the caller
//! ([`CurrentUser`](crate::auth::CurrentUser) or a
//! [`RequireRole`](crate::auth::RequireRole)); it runs before the body is
//! read, so an unauthenticated request is refused without parsing.
//!
//! ```rust,ignore
//! .route(
//!     "/encounters",
//!     post(records::create_record_handler::<S, Encounter, RequireRole<PhysicianOnly>>),
//! )
//! ```

use axum::{
    Json,
    extract::{Path, State},
};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::Identifiable;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::RecordBody;
use crate::state::AppState;

/// Stores a record and echoes it back.
pub async fn create_record_handler<S, R, G>(
    _guard: G,
    State(state): State<AppState<S>>,
    RecordBody(record): RecordBody<R>,
) -> RestResult<Json<R>>
where
    S: DocumentStore + 'static,
    R: Identifiable + 'static,
    G: Send,
{
    debug!(record = R::NAME, id = %record.id(), "Processing create request");

    state.repository().add(&record).await?;
    Ok(Json(record))
}

/// Returns the first record with the given id, or 404.
pub async fn read_record_handler<S, R, G>(
    _guard: G,
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<R>>
where
    S: DocumentStore + 'static,
    R: Identifiable + 'static,
    G: Send,
{
    debug!(record = R::NAME, id = %id, "Processing read request");

    state
        .repository()
        .get_by_id::<R>(&id)
        .await?
        .map(Json)
        .ok_or(RestError::NotFound {
            resource_type: R::NAME,
        })
}

/// Returns every record of the type, in insertion order.
pub async fn list_records_handler<S, R, G>(
    _guard: G,
    State(state): State<AppState<S>>,
) -> RestResult<Json<Vec<R>>>
where
    S: DocumentStore + 'static,
    R: Identifiable + 'static,
    G: Send,
{
    debug!(record = R::NAME, "Processing list request");

    Ok(Json(state.repository().list::<R>().await?))
}
