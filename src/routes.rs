use crate::config::ImagesDir;
use crate::endpoints::{handle_delete, handle_download, handle_list, handle_serve};
use crate::error::handle_rejection;
use crate::types::PageQuery;
use std::convert::Infallible;
use warp::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS,
    ACCESS_CONTROL_REQUEST_METHOD,
};
use warp::http::Method;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Full route table with CORS, error recovery and request logging.
pub fn routes(dir: ImagesDir) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let api_list = warp::path("images")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<PageQuery>())
        .and(with_dir(dir.clone()))
        .and_then(handle_list);

    let api_download = warp::path!("images" / "download" / String)
        .and(warp::get())
        .and(with_dir(dir.clone()))
        .and_then(handle_download);

    let api_delete = warp::path!("images" / String)
        .and(warp::delete())
        .and(with_dir(dir.clone()))
        .and_then(handle_delete);

    let files_serve = warp::path!("files" / String)
        .and(warp::get())
        .and(with_dir(dir))
        .and_then(handle_serve);

    let api = api_list
        .or(api_download)
        .or(api_delete)
        .or(files_serve);

    preflight()
        .or(api)
        .recover(handle_rejection)
        .with(warp::reply::with::header(ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .with(warp::log("image_dir_service"))
}

fn with_dir(dir: ImagesDir) -> impl Filter<Extract = (ImagesDir,), Error = Infallible> + Clone {
    warp::any().map(move || dir.clone())
}

const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
const PREFLIGHT_MAX_AGE: &str = "600";

/// CORS preflight: any method, and whatever headers the client asks for.
/// Other requests fall through as unmatched.
fn preflight() -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::method()
        .and(warp::header::headers_cloned())
        .and_then(|method: Method, request: HeaderMap| async move {
            if method != Method::OPTIONS || !request.contains_key(ACCESS_CONTROL_REQUEST_METHOD) {
                return Err(warp::reject::not_found());
            }

            let mut response = warp::reply().into_response();
            let headers = response.headers_mut();
            headers.insert(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            );
            headers.insert(
                ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static(PREFLIGHT_MAX_AGE),
            );
            if let Some(requested) = request.get(ACCESS_CONTROL_REQUEST_HEADERS) {
                headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
            }
            Ok::<_, Rejection>(response)
        })
}
