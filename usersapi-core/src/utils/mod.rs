pub mod email;
pub mod ids;

pub use email::is_valid_email;
pub use ids::user_uri;
