//! HTTP access to a flat directory of images: paginated listing, download,
//! deletion and inline serving by file name.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod images;
pub mod routes;
pub mod types;

pub use config::{ImagesDir, Settings};
pub use routes::routes;
