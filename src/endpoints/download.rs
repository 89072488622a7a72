use super::decode_id;
use super::file::{attachment_disposition, file_reply};
use crate::config::ImagesDir;
use crate::images::resolve_file;
use warp::Rejection;

const OCTET_STREAM: &str = "application/octet-stream";

pub async fn handle_download(image_id: String, dir: ImagesDir) -> Result<impl warp::Reply, Rejection> {
    let image_id = decode_id(&image_id);
    let file_path = resolve_file(&dir, &image_id).await?;

    let filename = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(image_id);

    file_reply(
        &file_path,
        OCTET_STREAM,
        Some(attachment_disposition(&filename)),
    )
    .await
}
