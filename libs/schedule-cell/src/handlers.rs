use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::{info, warn};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{DayPatch, ScheduleCreate, ScheduleUpdate};
use crate::services::availability::AvailabilityService;
use crate::services::schedule::{canonical_doctor_id, normalize_doctor_param, ScheduleService};

/// Role policy for doctor-scoped routes: admins may act on any schedule,
/// doctors only on their own. Patients never touch schedule documents
/// directly; they read slot data through the availability endpoint.
pub fn authorize_for_schedule(user: &User, doctor_id: &str) -> Result<(), AppError> {
    if user.is_admin() || (user.is_doctor() && same_doctor(&user.id, doctor_id)) {
        Ok(())
    } else {
        warn!(
            "User {} (role {:?}) denied access to schedule of doctor {}",
            user.id, user.role, doctor_id
        );
        Err(AppError::Forbidden(
            "Not authorized for this schedule".to_string(),
        ))
    }
}

/// Identity match that tolerates the two doctor-id encodings.
fn same_doctor(user_id: &str, doctor_id: &str) -> bool {
    let user_id = normalize_doctor_param(user_id);
    let doctor_id = normalize_doctor_param(doctor_id);
    if user_id == doctor_id {
        return true;
    }

    let user_canonical = canonical_doctor_id(&user_id).unwrap_or(user_id);
    let doctor_canonical = canonical_doctor_id(&doctor_id).unwrap_or(doctor_id);
    user_canonical == doctor_canonical
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can list all schedules".to_string(),
        ));
    }

    let service = ScheduleService::new(&state);
    let schedules = service.list_schedules().await?;

    Ok(Json(json!({
        "success": true,
        "count": schedules.len(),
        "data": schedules
    })))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize_for_schedule(&user, &doctor_id)?;

    let service = ScheduleService::new(&state);
    let schedule = service.get_or_create_schedule(&doctor_id).await?;

    Ok(Json(json!({ "success": true, "data": schedule })))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<ScheduleCreate>,
) -> Result<Json<Value>, AppError> {
    info!("Creating new schedule for doctor: {}", request.doctor);
    authorize_for_schedule(&user, &request.doctor)?;

    let service = ScheduleService::new(&state);
    let schedule = service.create_schedule(request).await?;

    Ok(Json(json!({ "success": true, "data": schedule })))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    Extension(user): Extension<User>,
    Json(update): Json<ScheduleUpdate>,
) -> Result<Json<Value>, AppError> {
    info!("Updating schedule for doctor: {}", doctor_id);
    authorize_for_schedule(&user, &doctor_id)?;

    let service = ScheduleService::new(&state);
    let schedule = service.update_schedule(&doctor_id, update).await?;

    Ok(Json(json!({ "success": true, "data": schedule })))
}

#[axum::debug_handler]
pub async fn patch_day(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, day)): Path<(String, String)>,
    Extension(user): Extension<User>,
    Json(patch): Json<DayPatch>,
) -> Result<Json<Value>, AppError> {
    authorize_for_schedule(&user, &doctor_id)?;

    let service = ScheduleService::new(&state);
    let schedule = service.patch_day(&doctor_id, &day, patch).await?;

    Ok(Json(json!({ "success": true, "data": schedule })))
}

#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, date)): Path<(String, String)>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", date)))?;

    let service = AvailabilityService::new(&state);
    let slots = service.get_available_slots(&doctor_id, date).await?;

    Ok(Json(json!({ "success": true, "availableSlots": slots })))
}

#[axum::debug_handler]
pub async fn doctor_schedules(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize_for_schedule(&user, &doctor_id)?;

    let service = ScheduleService::new(&state);
    let schedules = service.list_doctor_schedules(&doctor_id).await?;

    Ok(Json(json!({
        "success": true,
        "count": schedules.len(),
        "data": schedules
    })))
}

#[axum::debug_handler]
pub async fn patient_appointments(
    State(state): State<Arc<AppConfig>>,
    Path(patient_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let is_self = user.is_patient() && user.id == patient_id;
    if !user.is_admin() && !is_self {
        return Err(AppError::Forbidden(
            "Not authorized to view these appointments".to_string(),
        ));
    }

    let service = ScheduleService::new(&state);
    let appointments = service.list_patient_appointments(&patient_id).await?;

    Ok(Json(json!({
        "success": true,
        "count": appointments.len(),
        "data": appointments
    })))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(schedule_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    // Ownership check needs the document first
    let existing = service.get_schedule_by_id(&schedule_id).await?;
    authorize_for_schedule(&user, &existing.doctor)?;

    service.delete_schedule(&schedule_id).await?;

    Ok(Json(json!({ "success": true, "data": {} })))
}
