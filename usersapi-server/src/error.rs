use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use usersapi_core::{Envelope, RoutingError, ValidationError};
use uuid::Uuid;

use crate::store::StoreError;

/// Errori di una richiesta. Routing, validazione e not found interrompono il handler;
/// tutto il resto finisce in `Unhandled` e diventa un 500 generico.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Routing(#[from] RoutingError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("user {0} not found")]
    NotFound(i64),
    #[error("unhandled error: {0:#}")]
    Unhandled(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Unhandled(anyhow::Error::new(e))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Routing(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Self::Routing(e) => e.envelope(),
            Self::Validation(e) => e.envelope(),
            Self::NotFound(_) => Envelope::user_not_found(),
            Self::Unhandled(_) => Envelope::internal(),
        }
    }
}

// Unico punto in cui un errore interno viene loggato: al client arriva solo il messaggio generico.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Unhandled(err) = &self {
            let incident = Uuid::new_v4();
            tracing::error!(%incident, error = ?err, "unexpected error while serving request");
        }
        (self.status(), Json(self.envelope())).into_response()
    }
}
