use actix_web::web;

use crate::handlers::{decode_handler, encode_handler, redirect_handler};

// Configure mapping routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/encode", web::get().to(encode_handler))
        .route("/decode", web::get().to(decode_handler))
        .route("/{token}", web::get().to(redirect_handler));
}
