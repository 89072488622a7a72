use crate::config::ImagesDir;
use crate::error::ApiError;
use crate::images::{list_image_files, paginate};
use crate::types::{ImagePlaceholder, PageQuery, PaginatedImages};
use log::debug;
use warp::Rejection;

pub async fn handle_list(query: PageQuery, dir: ImagesDir) -> Result<impl warp::Reply, Rejection> {
    query.validate()?;

    let files = list_image_files(&dir)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let (page_files, has_more) = paginate(&files, query.page, query.limit);

    debug!(
        "Listing page {} (limit {}): {} of {} files",
        query.page,
        query.limit,
        page_files.len(),
        files.len()
    );

    let images = page_files
        .iter()
        .map(|name| ImagePlaceholder::from_name(name))
        .collect();

    Ok(warp::reply::json(&PaginatedImages { images, has_more }))
}
