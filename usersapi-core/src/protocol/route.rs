/* Routing delle richieste: il path viene diviso in segmenti dopo aver tolto lo slash iniziale.
    segmento 0 -> nome della risorsa (solo "users" è ammessa)
    segmento 1 -> id numerico opzionale; se non è un intero vale 0
    qualsiasi altro numero di segmenti -> risorsa non trovata
*/
use crate::error::{Envelope, STATUS_NOT_FOUND};

/// Risorse servite dall'API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
}

impl Resource {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "users" => Some(Self::Users),
            _ => None,
        }
    }
}

/// Risultato del parsing del path: risorsa e id (assente per le richieste sulla collezione).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteInfo {
    pub resource: Resource,
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("The request resource was not found on the server")]
    UnknownResource,
    #[error("Operation not supported")]
    UnsupportedOperation,
}

impl RoutingError {
    pub fn envelope(&self) -> Envelope {
        let status = match self {
            Self::UnknownResource => "Not found",
            Self::UnsupportedOperation => STATUS_NOT_FOUND,
        };
        Envelope::new(status, self.to_string())
    }
}

pub fn parse_route(path: &str) -> Result<RouteInfo, RoutingError> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let segments: Vec<&str> = trimmed.split('/').collect();

    let id = match segments.as_slice() {
        [_] => None,
        // un id non numerico non è un errore: diventa 0, che non esiste mai
        [_, raw] => Some(raw.parse::<i64>().unwrap_or(0)),
        _ => return Err(RoutingError::UnknownResource),
    };
    let resource = Resource::from_segment(segments[0]).ok_or(RoutingError::UnknownResource)?;

    Ok(RouteInfo { resource, id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_and_item_paths() {
        let collection = RouteInfo { resource: Resource::Users, id: None };
        let item = RouteInfo { resource: Resource::Users, id: Some(42) };
        assert_eq!(parse_route("/users"), Ok(collection));
        assert_eq!(parse_route("/users/42"), Ok(item));
    }

    #[test]
    fn non_numeric_id_becomes_zero() {
        assert_eq!(parse_route("/users/abc").unwrap().id, Some(0));
        // lo slash finale produce un secondo segmento vuoto
        assert_eq!(parse_route("/users/").unwrap().id, Some(0));
    }

    #[test]
    fn unknown_resource_or_segment_count() {
        for path in ["/", "", "/posts", "/posts/1", "/users/1/extra", "/Users"] {
            assert_eq!(parse_route(path), Err(RoutingError::UnknownResource), "path {path:?}");
        }
    }
}
