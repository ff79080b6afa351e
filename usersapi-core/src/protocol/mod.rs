pub mod http;
pub mod route;

// Re-export comodi
pub use http::{created_body, parse_body, NewUser};
pub use route::{parse_route, Resource, RouteInfo, RoutingError};
