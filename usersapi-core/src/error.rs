use serde::{Deserialize, Serialize};

pub const STATUS_BAD_REQUEST: &str = "bad request";
pub const STATUS_NOT_FOUND: &str = "not found";
pub const STATUS_INTERNAL: &str = "internal server error";

pub const MSG_USER_NOT_FOUND: &str = "The requested user was not found in the system";
pub const MSG_INTERNAL: &str = "An unexpected error has occured, please try again later";

/// Envelope JSON per tutte le risposte non-2xx: `{ status, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Codice breve (es. "not found")
    pub status: String,

    pub message: String,
}

impl Envelope {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn user_not_found() -> Self {
        Self::new(STATUS_NOT_FOUND, MSG_USER_NOT_FOUND)
    }

    /// Messaggio generico: il dettaglio dell'errore resta nei log del server.
    pub fn internal() -> Self {
        Self::new(STATUS_INTERNAL, MSG_INTERNAL)
    }
}

/// Errore di validazione del payload di creazione. Vince il primo campo che fallisce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("email is invalid")]
    InvalidEmail,
}

impl ValidationError {
    pub fn envelope(&self) -> Envelope {
        Envelope::new(STATUS_BAD_REQUEST, self.to_string())
    }
}
