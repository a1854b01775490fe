use actix_web::{web, HttpResponse, Responder};

mod mapping;

use crate::types::{AppState, HealthStatus, ResponsePayload};

// Handler function for the root route "/"
async fn index() -> impl Responder {
    let welcome_message = ResponsePayload {
        status: 200,
        message: String::from("shortkey is running, GET /encode?url= to shorten a URL"),
    };

    // Return the struct as JSON
    HttpResponse::Ok().json(welcome_message)
}

// Handler function for the health check endpoint
async fn health_check(data: web::Data<AppState>) -> impl Responder {
    // Calculate uptime in seconds
    let uptime = data.start_time.elapsed().as_secs();

    // Probe the database when one backs the store
    let db_health = match &data.db {
        Some(db) => Some(db.health_check().await),
        None => None,
    };

    let status = HealthStatus {
        status: String::from("OK"),
        version: data.version.clone(),
        storage: data.storage,
        db_health,
        uptime_seconds: uptime,
    };

    // Return the status as JSON
    HttpResponse::Ok().json(status)
}

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
    cfg.route("/health", web::get().to(health_check));

    // Register routes from individual modules; the catch-all redirect route
    // must come last
    mapping::configure_routes(cfg);
}
