use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use visio_core::Money;
use visio_hr::{Employee, EmployeeDetails, EmployeeId, EmployeeStatus};
use visio_infra::KeyStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_employee).get(list_employees))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

fn details_from(body: dto::EmployeeRequest) -> Result<EmployeeDetails, axum::response::Response> {
    let salary = Money::new(body.salary).map_err(errors::domain_error_to_response)?;
    let status = match body.status.as_deref() {
        None => EmployeeStatus::Active,
        Some(raw) => raw
            .parse::<EmployeeStatus>()
            .map_err(errors::domain_error_to_response)?,
    };
    Ok(EmployeeDetails {
        name: body.name,
        email: body.email,
        department: body.department,
        position: body.position,
        salary,
        hire_date: body.hire_date,
        status,
    })
}

pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::EmployeeRequest>,
) -> axum::response::Response {
    let email = body.email.trim().to_lowercase();
    if services.employees.list().iter().any(|e| e.email() == email) {
        return errors::json_error(
            StatusCode::CONFLICT,
            "conflict",
            "email already registered",
        );
    }

    let details = match details_from(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let id = EmployeeId::new();
    let employee = match Employee::new(id, details, Utc::now()) {
        Ok(e) => e,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.employees.upsert(id, employee.clone());

    (StatusCode::CREATED, Json(dto::employee_to_json(&employee))).into_response()
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let mut employees = services.employees.list();
    employees.sort_by(|a, b| a.name().cmp(b.name()));
    let items = employees.iter().map(dto::employee_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<EmployeeId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid employee id");
    };
    match services.employees.get(&id) {
        Some(e) => (StatusCode::OK, Json(dto::employee_to_json(&e))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "employee not found"),
    }
}

pub async fn update_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::EmployeeRequest>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<EmployeeId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid employee id");
    };
    let Some(mut employee) = services.employees.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "employee not found");
    };

    let email = body.email.trim().to_lowercase();
    if services
        .employees
        .list()
        .iter()
        .any(|e| e.email() == email && e.id_typed() != id)
    {
        return errors::json_error(
            StatusCode::CONFLICT,
            "conflict",
            "email already registered",
        );
    }

    let details = match details_from(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    if let Err(e) = employee.update(details) {
        return errors::domain_error_to_response(e);
    }
    services.employees.upsert(id, employee.clone());

    (StatusCode::OK, Json(dto::employee_to_json(&employee))).into_response()
}

pub async fn delete_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<EmployeeId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid employee id");
    };
    match services.employees.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "employee not found"),
    }
}
