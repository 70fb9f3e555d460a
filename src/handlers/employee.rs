use actix_web::{web, HttpResponse};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use validator::Validate;
use log::{error, info, warn};
use crate::errors::AppError;
use crate::handlers::JSON_CONTENT_TYPE;
use crate::models::employee::{CreatedEmployee, Employee, Record};
use crate::storage::EmployeeStore;
use crate::utils::validation::validate_payload;

#[derive(Debug, Validate)]
struct NewEmployee {
    #[validate(length(min = 1))]
    employee_name: String,
    #[validate(length(min = 1))]
    employee_id: String,
    #[validate(length(min = 1))]
    designation_name: String,
    #[validate(length(min = 1))]
    office_name: String,
    division_name: String,
    section_name: String,
    cadre_title: String,
    mode_of_joining: String,
    category_title: String,
    date_of_birth: Value,
}

impl NewEmployee {
    fn from_body(body: &Value) -> Self {
        NewEmployee {
            employee_name: text_field(body, "employee_name"),
            employee_id: text_field(body, "employee_id"),
            designation_name: text_field(body, "designation_name"),
            office_name: text_field(body, "office_name"),
            division_name: text_field(body, "division_name"),
            section_name: text_field(body, "section_name"),
            cadre_title: text_field(body, "cadre_title"),
            mode_of_joining: text_field(body, "mode_of_joining"),
            category_title: text_field(body, "category_title"),
            date_of_birth: opaque_field(body, "date_of_birth"),
        }
    }

    fn into_employee(self, id: u64, updated_on: String) -> Employee {
        Employee {
            id,
            employee_name: self.employee_name,
            employee_id: self.employee_id,
            designation_name: self.designation_name,
            office_name: self.office_name,
            division_name: self.division_name,
            section_name: self.section_name,
            cadre_title: self.cadre_title,
            mode_of_joining: self.mode_of_joining,
            category_title: self.category_title,
            date_of_birth: self.date_of_birth,
            updated_on,
            transfer_details: Vec::new(),
            career_growth: Vec::new(),
            learning: Vec::new(),
        }
    }
}

fn invalid_body() -> AppError {
    AppError::BadRequest("Invalid JSON body".to_string())
}

/// An empty body is `{}`. A body holding a JSON string is decoded a second time.
fn parse_body(raw: &[u8]) -> Result<Value, AppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_slice(raw).map_err(|_| invalid_body())? {
        Value::String(inner) if inner.trim().is_empty() => Ok(Value::Object(Map::new())),
        Value::String(inner) => serde_json::from_str(&inner).map_err(|_| invalid_body()),
        other => Ok(other),
    }
}

// Renders a number the way JavaScript's `String(n)` does for common values.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{}", f as i128),
        _ => n.to_string(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

// Falsy values read as empty; everything else is stringified and trimmed.
fn text_field(body: &Value, key: &str) -> String {
    match body.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(other) => value_text(other).trim().to_string(),
    }
}

fn opaque_field(body: &Value, key: &str) -> Value {
    match body.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Value::Null,
        Some(Value::String(s)) if s.is_empty() => Value::Null,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Value::Null,
        Some(other) => other.clone(),
    }
}

/// Numeric ids and numeric strings count, anything else is 0. Oversized ids clamp to `u64::MAX`.
fn stored_id(record: &Record) -> u64 {
    let id = match record.get("id") {
        Some(Value::Number(n)) if n.is_u64() => return n.as_u64().unwrap_or(0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    id.filter(|id| id.is_finite() && *id > 0.0)
        .map(|id| id as u64)
        .unwrap_or(0)
}

fn next_id(records: &[Record]) -> u64 {
    records
        .iter()
        .map(stored_id)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

fn blocking_error(err: actix_web::error::BlockingError) -> AppError {
    error!("Storage task failed: {}", err);
    AppError::StorageError(err.to_string())
}

pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

pub async fn get_employees(
    store: web::Data<EmployeeStore>,
) -> Result<HttpResponse, AppError> {
    let employees = web::block(move || store.read_all())
        .await
        .map_err(blocking_error)?;

    Ok(HttpResponse::Ok()
        .content_type(JSON_CONTENT_TYPE)
        .json(employees))
}

pub async fn create_employee(
    store: web::Data<EmployeeStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let body = parse_body(&body)?;
    let new_employee = NewEmployee::from_body(&body);
    validate_payload(&new_employee)?;

    let (employee, write_meta) = web::block(move || {
        store.append(|records| {
            let updated_on = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            new_employee.into_employee(next_id(records), updated_on)
        })
    })
    .await
    .map_err(blocking_error)??;

    if write_meta.degraded() {
        warn!("Employee {} stored in the temporary location only", employee.id);
    } else {
        info!("Created employee {} ({})", employee.id, employee.employee_id);
    }

    Ok(HttpResponse::Created()
        .content_type(JSON_CONTENT_TYPE)
        .json(CreatedEmployee { employee, write_meta }))
}

pub async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}
