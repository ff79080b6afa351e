use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use usersapi_core::{
    created_body, parse_body, parse_route, NewUser, Resource, RouteInfo, RoutingError, User,
};

use crate::error::ApiError;
use crate::store::{Param, Row, SqliteStore, Store};
use crate::AppState;

/// Risposta di successo: status più body JSON opzionale (assente per 204).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self { status, body: Some(body) }
    }

    pub fn no_content() -> Self {
        Self { status: StatusCode::NO_CONTENT, body: None }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Handler di fallback: ogni richiesta che non è /health passa da qui.
pub async fn dispatch(
    Extension(state): Extension<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse, ApiError> {
    let route = parse_route(uri.path())?;
    tracing::debug!(?route, %method, "dispatching request");
    // un body illeggibile (es. oltre il limite di dimensione) vale come body vuoto:
    // la validazione risponde 400 come per il JSON malformato
    let body = body.unwrap_or_else(|rejection| {
        tracing::debug!(%rejection, "request body rejected, treating it as empty");
        Bytes::new()
    });
    // la connessione viene presa dal pool solo se l'operazione tocca davvero il database
    let mut store = SqliteStore::new(state.pool.clone());
    handle(&route, &method, &body, &mut store).await
}

/// Sceglie l'operazione in base a (risorsa, presenza dell'id, metodo) e la esegue.
pub async fn handle(
    route: &RouteInfo,
    method: &Method,
    body: &[u8],
    store: &mut dyn Store,
) -> Result<ApiResponse, ApiError> {
    match route.resource {
        Resource::Users => match (route.id, method.as_str()) {
            (None, "GET") => list_users(store).await,
            (Some(id), "GET") => get_user(store, id).await,
            (None, "POST") => create_user(store, body).await,
            (Some(id), "DELETE") => delete_user(store, id).await,
            _ => Err(RoutingError::UnsupportedOperation.into()),
        },
    }
}

/// GET /users. Nessun ORDER BY: l'ordine è quello restituito dallo store.
async fn list_users(store: &mut dyn Store) -> Result<ApiResponse, ApiError> {
    let rows = store.query_all("SELECT id, name, firstname, email FROM users").await?;
    let users = rows
        .into_iter()
        .map(|row| decode_user(row).map(User::into_resource))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let body = serde_json::to_value(users).context("serialize users")?;
    Ok(ApiResponse::json(StatusCode::OK, body))
}

/// GET /users/{id}
async fn get_user(store: &mut dyn Store, id: i64) -> Result<ApiResponse, ApiError> {
    let row = store
        .query_one("SELECT id, name, firstname, email FROM users WHERE id = ?", &[Param::Int(id)])
        .await?;
    let Some(row) = row else {
        return Err(ApiError::NotFound(id));
    };
    let user = decode_user(row)?.into_resource();
    let body = serde_json::to_value(user).context("serialize user")?;
    Ok(ApiResponse::json(StatusCode::OK, body))
}

/// POST /users
async fn create_user(store: &mut dyn Store, body: &[u8]) -> Result<ApiResponse, ApiError> {
    let submitted = parse_body(body);
    let new_user = NewUser::from_body(&submitted)?;

    // solo i tre campi validati vengono persistiti, il resto del body viene ignorato
    store
        .execute(
            "INSERT INTO users (name, firstname, email) VALUES (?, ?, ?)",
            &[
                Param::Text(new_user.name),
                Param::Text(new_user.firstname),
                Param::Text(new_user.email),
            ],
        )
        .await?;
    let id = store.last_inserted_id().await?;
    tracing::info!(id, "user created");

    Ok(ApiResponse::json(StatusCode::CREATED, Value::Object(created_body(id, &submitted))))
}

/// DELETE /users/{id}: sempre 204, anche se la riga non esiste.
async fn delete_user(store: &mut dyn Store, id: i64) -> Result<ApiResponse, ApiError> {
    let affected = store
        .execute("DELETE FROM users WHERE id = ?", &[Param::Int(id)])
        .await?;
    tracing::info!(id, affected, "user delete");
    Ok(ApiResponse::no_content())
}

fn decode_user(row: Row) -> anyhow::Result<User> {
    serde_json::from_value(Value::Object(row)).context("decode users row")
}
