use actix_web::{http::header::LOCATION, web, HttpResponse, Responder};
use log::{debug, info};
use serde_json::json;

use crate::{
    config::Config,
    errors::AppError,
    models::{DecodeUrlQuery, EncodeUrlDto},
    services::ShortKeyServiceTrait,
    types::Result,
};

// Clients may send back either the bare token or the full short URL we
// handed out; either way the token is the last path segment.
fn extract_token(short_url: &str) -> &str {
    short_url.rsplit('/').next().unwrap_or(short_url)
}

/// Encode route handler: shortens the given URL
pub async fn encode_handler(
    query: web::Query<EncodeUrlDto>,
    service: web::Data<dyn ShortKeyServiceTrait>,
    config: web::Data<Config>,
) -> Result<impl Responder> {
    let token = service.encode(query.into_inner()).await?;
    let short_url = format!(
        "{}/{}",
        config.app.public_base_url.trim_end_matches('/'),
        token
    );

    Ok(HttpResponse::Created().json(json!({
        "short_url": short_url,
    })))
}

/// Decode route handler: resolves a short URL back to the original
pub async fn decode_handler(
    query: web::Query<DecodeUrlQuery>,
    service: web::Data<dyn ShortKeyServiceTrait>,
) -> Result<impl Responder> {
    let token = extract_token(&query.short_url);

    match service.decode(token).await? {
        Some(url) => Ok(HttpResponse::Created().json(json!({
            "url": url,
        }))),
        None => Err(AppError::NotFound("Shorten url not found".to_string())),
    }
}

/// Redirect route handler
pub async fn redirect_handler(
    path: web::Path<String>,
    service: web::Data<dyn ShortKeyServiceTrait>,
) -> Result<impl Responder> {
    let token = path.into_inner();
    debug!("Redirect requested for token: {}", token);

    match service.decode(&token).await? {
        Some(url) => {
            info!("Redirecting '{}' to '{}'", token, url);
            Ok(HttpResponse::TemporaryRedirect()
                .insert_header((LOCATION, url))
                .finish())
        }
        None => Err(AppError::NotFound(format!(
            "No mapping for token '{}'",
            token
        ))),
    }
}
