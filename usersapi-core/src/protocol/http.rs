use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::utils::{is_valid_email, user_uri};

/// Body della richiesta come mappa chiave/valore.
/// JSON malformato o non oggetto diventa una mappa vuota: sarà la validazione a rifiutarlo.
pub fn parse_body(raw: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Campi validati da inserire nella tabella, così come inviati dal client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub firstname: String,
    pub email: String,
}

impl NewUser {
    /// Valida il payload: prima la presenza dei campi (il primo che manca vince), poi l'email.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let name = required_text(body, "name")?;
        let firstname = required_text(body, "firstname")?;
        let email = required_text(body, "email")?;

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self { name, firstname, email })
    }
}

// Solo le stringhe contano: numeri, booleani, null, array e oggetti sono campi mancanti.
fn required_text(
    body: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match body.get(field) {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.clone()),
        _ => Err(ValidationError::Required(field)),
    }
}

/// Risposta di POST /users: `uri` e `id` calcolati dal server, poi i campi inviati.
/// In caso di collisione vincono sempre i valori del server.
pub fn created_body(id: i64, submitted: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("uri".to_string(), Value::String(user_uri(id)));
    out.insert("id".to_string(), Value::from(id));
    for (key, value) in submitted {
        if !out.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}
