use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use visio_hr::{Attendance, AttendanceStatus, EmployeeId};
use visio_infra::KeyStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list_attendance).post(mark_attendance))
}

#[derive(Debug, Deserialize)]
pub struct AttendanceParams {
    pub date: Option<NaiveDate>,
}

pub async fn list_attendance(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<AttendanceParams>,
) -> axum::response::Response {
    let mut records: Vec<Attendance> = services
        .attendance
        .list()
        .into_iter()
        .filter(|a| params.date.is_none_or(|d| a.date() == d))
        .collect();
    records.sort_by_key(|a| (a.date(), a.employee_id()));

    let items = records.iter().map(dto::attendance_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// Mark attendance for one employee on one day. Marking the same day again
/// replaces the previous record.
pub async fn mark_attendance(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AttendanceRequest>,
) -> axum::response::Response {
    let Ok(employee_id) = body.employee_id.parse::<EmployeeId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid employee id");
    };
    if services.employees.get(&employee_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "employee not found");
    }
    let status = match body.status.parse::<AttendanceStatus>() {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let record = match Attendance::mark(employee_id, body.date, status, body.check_in, body.check_out)
    {
        Ok(r) => r,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.attendance.upsert(record.key(), record.clone());

    (StatusCode::CREATED, Json(dto::attendance_to_json(&record))).into_response()
}
