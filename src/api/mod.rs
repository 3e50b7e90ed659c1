pub mod articles;
pub mod auth;
pub mod client;
pub mod content;
pub mod errors;
pub mod types;

pub use articles::ArticleOperations;
pub use auth::{AuthOperations, ProfileSync};
pub use client::ApiClient;
pub use content::ContentOperations;
pub use errors::ApiError;
