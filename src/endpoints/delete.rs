use super::decode_id;
use crate::config::ImagesDir;
use crate::images::delete_file;
use crate::types::DeleteResponse;
use warp::Rejection;

pub async fn handle_delete(image_id: String, dir: ImagesDir) -> Result<impl warp::Reply, Rejection> {
    let image_id = decode_id(&image_id);

    delete_file(&dir, &image_id).await?;

    Ok(warp::reply::json(&DeleteResponse { success: true }))
}
