use crate::types::ErrorBody;
use log::error;
use std::convert::Infallible;
use std::path::PathBuf;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// Fatal conditions that keep the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to read .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("IMAGES_DIR is not set")]
    MissingImagesDir,
    #[error("IMAGES_DIR does not exist: {path}: {source}")]
    InvalidImagesDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("IMAGES_DIR is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),
    #[error("Failed to bind server: {0}")]
    Bind(#[from] warp::Error),
}

/// Request-level failures, carried through warp as custom rejections.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidPage(String),
    #[error("File not found")]
    NotFound,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPage(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl warp::reject::Reject for ApiError {}

/// Turn any rejection into a JSON `{"detail": ...}` response.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, detail) = if let Some(e) = err.find::<ApiError>() {
        (e.status(), e.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed".to_string(),
        )
    } else {
        error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody { detail }),
        status,
    ))
}
