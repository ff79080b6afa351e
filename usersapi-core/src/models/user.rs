use serde::{Deserialize, Serialize};

use crate::utils::user_uri;

/// Riga della tabella `users`. L'id è assegnato dallo store e non cambia mai.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub firstname: String,
    pub email: String,
}

impl User {
    pub fn uri(&self) -> String {
        user_uri(self.id)
    }

    /// Aggiunge il campo `uri` calcolato, usato solo sul wire.
    pub fn into_resource(self) -> UserResource {
        UserResource {
            uri: self.uri(),
            user: self,
        }
    }
}

/// Utente esposto al client: i campi della riga più `uri` (non persistito).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResource {
    #[serde(flatten)]
    pub user: User,
    pub uri: String,
}
