//! HTTP surface: multipart upload in, JSON report out

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;
