//! Conversion des issues du pipeline en réponses HTTP

use crate::error::{PipelineError, Result};
use crate::pipeline::Served;
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

/// Type MIME de l'image de remplacement (servie telle quelle)
pub const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

/// Écrit la réponse correspondant au résultat d'une requête
pub async fn write_response(result: Result<Served>) -> Response {
    match result {
        Ok(Served::Bytes {
            bytes,
            content_type,
        }) => ok(content_type, bytes.to_vec()),
        Ok(Served::File { path, content_type }) => match tokio::fs::read(&path).await {
            Ok(data) => ok(content_type, data),
            Err(e) => {
                error!("Cannot read cached file {:?}: {}", path, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Cannot read cached file").into_response()
            }
        },
        Ok(Served::Fallback(path)) => match tokio::fs::read(&path).await {
            Ok(data) => ok(FALLBACK_CONTENT_TYPE, data),
            Err(source) => error_response(PipelineError::Fallback { path, source }),
        },
        Err(e) => error_response(e),
    }
}

fn ok(content_type: &'static str, data: Vec<u8>) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], data).into_response()
}

/// Statut et corps texte d'une erreur
pub fn error_response(e: PipelineError) -> Response {
    let (status, body) = match &e {
        PipelineError::BadQuery => (StatusCode::NOT_FOUND, "Bad Query"),
        PipelineError::Reserved => (StatusCode::NOT_FOUND, "Not found"),
        PipelineError::NotFound(_) => (StatusCode::NOT_FOUND, "No Synopsis Found"),
        PipelineError::Fetch { .. } | PipelineError::Remote(_) => {
            (StatusCode::BAD_GATEWAY, "Remote metadata service failed")
        }
        PipelineError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cannot store data"),
        PipelineError::Fallback { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "No fallback image")
        }
    };

    if status.is_server_error() {
        error!("{}", e);
    } else {
        warn!("{}", e);
    }
    (status, body).into_response()
}
