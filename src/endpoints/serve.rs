use super::decode_id;
use super::file::file_reply;
use crate::config::ImagesDir;
use crate::images::resolve_file;
use mime_guess::from_path;
use warp::Rejection;

pub async fn handle_serve(image_id: String, dir: ImagesDir) -> Result<impl warp::Reply, Rejection> {
    let image_id = decode_id(&image_id);
    let file_path = resolve_file(&dir, &image_id).await?;

    let mime_type = from_path(&file_path).first_or_octet_stream().to_string();

    file_reply(&file_path, &mime_type, None).await
}
