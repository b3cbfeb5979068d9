//! Patient handlers.
//!
//! The `/Patient` path follows FHIR naming, but the body is the plain
//! patient record, not a FHIR resource.

use axum::{
    Json,
    extract::{Path, State},
};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::{Patient, Record};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::RecordBody;
use crate::state::AppState;

/// Handler for patient creation.
///
/// # HTTP Request
///
/// `POST /Patient`
///
/// # Response
///
/// - `200 OK` - The stored patient, echoed back
/// - `400 Bad Request` - Malformed body or failed validation
pub async fn create_patient_handler<S>(
    State(state): State<AppState<S>>,
    RecordBody(patient): RecordBody<Patient>,
) -> RestResult<Json<Patient>>
where
    S: DocumentStore + 'static,
{
    debug!(id = %patient.id, "Processing create patient request");

    state.repository().add_patient(&patient).await?;
    Ok(Json(patient))
}

/// Handler for reading one patient.
///
/// If several patients share the id, the first one stored wins.
///
/// # HTTP Request
///
/// `GET /Patient/{id}`
///
/// # Response
///
/// - `200 OK` - The patient
/// - `404 Not Found` - `{"detail": "Patient not found"}`
pub async fn read_patient_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<Patient>>
where
    S: DocumentStore + 'static,
{
    debug!(id = %id, "Processing read patient request");

    state
        .repository()
        .get_patient_by_id(&id)
        .await?
        .map(Json)
        .ok_or(RestError::NotFound {
            resource_type: Patient::NAME,
        })
}

/// Handler for listing every patient.
///
/// # HTTP Request
///
/// `GET /Patient`
pub async fn list_patients_handler<S>(
    State(state): State<AppState<S>>,
) -> RestResult<Json<Vec<Patient>>>
where
    S: DocumentStore + 'static,
{
    debug!("Processing list patients request");

    Ok(Json(state.repository().list_patients().await?))
}
