//! Streaming file responses shared by the download and serve endpoints.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use warp::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED};
use warp::http::Response;
use warp::hyper::Body;
use warp::Rejection;

pub async fn file_reply(
    file_path: &Path,
    content_type: &str,
    disposition: Option<String>,
) -> Result<Response<Body>, Rejection> {
    // The file may vanish between resolution and open.
    let file = File::open(file_path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ApiError::NotFound,
        _ => ApiError::Internal(e.to_string()),
    })?;
    let metadata = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut builder = Response::builder()
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, metadata.len());

    if let Ok(modified) = metadata.modified() {
        builder = builder.header(LAST_MODIFIED, http_date(modified));
    }
    if let Some(disposition) = disposition {
        builder = builder.header(CONTENT_DISPOSITION, disposition);
    }

    let body = Body::wrap_stream(ReaderStream::new(file));

    Ok(builder
        .body(body)
        .map_err(|e| ApiError::Internal(e.to_string()))?)
}

fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

fn is_plain_header_char(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\'
}

/// `attachment` disposition; non-ASCII names get an RFC 5987 `filename*`.
pub fn attachment_disposition(filename: &str) -> String {
    if filename.chars().all(is_plain_header_char) {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let fallback: String = filename
        .chars()
        .map(|c| if is_plain_header_char(c) { c } else { '_' })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=utf-8''{}",
        fallback,
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    )
}
