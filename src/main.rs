use image_dir_service::error::StartupError;
use image_dir_service::{routes, Settings};
use log::{error, info};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let settings = Settings::load()?;
    let dir = settings.images_dir()?;
    let addr = settings.bind_address()?;

    let (addr, server) =
        warp::serve(routes(dir.clone())).try_bind_with_graceful_shutdown(addr, async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down");
            }
        })?;

    info!("Server starting on http://{}", addr);
    info!("Serving images from: {}", dir.path().display());

    server.await;
    Ok(())
}
