//! usersapi-core: tipi condivisi del servizio users
//! (modello, envelope di errore, routing, validazione).
//! Niente I/O: HTTP e database vivono nel crate server.

pub mod error;
pub mod models;
pub mod protocol;
pub mod utils;

// Re-export utili per ridurre i percorsi nel crate server
pub use error::{Envelope, ValidationError};
pub use models::{User, UserResource};
pub use protocol::http::{created_body, parse_body, NewUser};
pub use protocol::route::{parse_route, Resource, RouteInfo, RoutingError};
pub use utils::{is_valid_email, user_uri};
