use crate::classifier::Classify;
use crate::error::Error;
use crate::sentiment::{SentimentRequest, SentimentResponse};
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError};
use serde::Serialize;
use std::sync::Arc;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

pub async fn predict_sentiment(
    classifier: web::Data<dyn Classify>,
    request: web::Json<SentimentRequest>,
) -> Result<web::Json<SentimentResponse>, Error> {
    let SentimentRequest { text } = request.into_inner();
    let classifier = classifier.into_inner();

    let sentiment = web::block(move || classifier.predict(&text))
        .await?
        .inspect_err(|err| tracing::error!(error = %err, "inference failed"))?;

    Ok(web::Json(SentimentResponse { sentiment }))
}

/// Body extractor settings: bad bodies are rejected with 422 before they
/// reach the handler.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let status = match &err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let detail = err.to_string();
        tracing::debug!(%status, %detail, "rejected request body");
        let response = HttpResponse::build(status).json(ErrorBody { detail });
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/predict_sentiment", web::post().to(predict_sentiment));
}

/// Serves until the process is stopped. The classifier must already be loaded.
pub async fn serve(
    classifier: Arc<dyn Classify>,
    host: &str,
    port: u16,
    workers: Option<usize>,
) -> std::io::Result<()> {
    let classifier: web::Data<dyn Classify> = web::Data::from(classifier);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(classifier.clone())
            .configure(configure)
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    tracing::info!(host, port, "listening");
    server.bind((host, port))?.run().await
}
