pub mod employee;

use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Headers every response carries, error and preflight responses included.
pub fn default_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::CONTENT_TYPE, JSON_CONTENT_TYPE))
        .add((header::CACHE_CONTROL, "no-store"))
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET,POST,OPTIONS"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // `/api/employees` matches the route of the original serverless deployment.
    for path in ["/employees", "/api/employees"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(employee::get_employees))
                .route(web::post().to(employee::create_employee))
                .route(web::method(actix_web::http::Method::OPTIONS).to(employee::preflight))
                .default_service(web::to(employee::method_not_allowed)),
        );
    }
}
