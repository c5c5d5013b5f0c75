//! Source feed adapter: token handling and cursor pagination.

pub mod client;
pub mod models;

pub use client::FeedClient;
pub use models::FeedPage;
