pub mod user;

// Re-export per comodità
pub use user::{User, UserResource};
