//! Startup configuration.
//!
//! Settings come from the process environment, on top of an optional `.env`
//! file in the working directory. `IMAGES_DIR` is required and must name an
//! existing directory; `BIND_HOST` and `PORT` pick the bind address.

use crate::error::StartupError;
use config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub images_dir: Option<String>,
    pub bind_host: String,
    pub port: u16,
}

impl Settings {
    /// Load settings from `.env` and the process environment.
    /// Variables already set in the process win over the file.
    pub fn load() -> Result<Self, StartupError> {
        let process_env = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        Self::from_sources(Path::new(DOTENV_FILE), process_env)
    }

    fn from_sources(
        dotenv: &Path,
        process_env: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, StartupError> {
        let mut vars = read_dotenv(dotenv)?;
        vars.extend(process_env);
        Self::from_environment(Environment::default().source(Some(vars)))
    }

    fn from_environment(env: Environment) -> Result<Self, StartupError> {
        let settings = Config::builder()
            .set_default("bind_host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(env.try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate `IMAGES_DIR` and resolve it to the root every request works under.
    pub fn images_dir(&self) -> Result<ImagesDir, StartupError> {
        match self.images_dir.as_deref() {
            Some(dir) if !dir.is_empty() => ImagesDir::open(dir),
            _ => Err(StartupError::MissingImagesDir),
        }
    }

    pub fn bind_address(&self) -> Result<SocketAddr, StartupError> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .map_err(|_| StartupError::InvalidBindAddress(self.bind_host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// A missing file is not an error.
fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, StartupError> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => Ok(iter.collect::<Result<_, _>>()?),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

/// Absolute, canonical root directory. Immutable once opened.
#[derive(Debug, Clone)]
pub struct ImagesDir {
    root: Arc<PathBuf>,
}

impl ImagesDir {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let root = path
            .canonicalize()
            .map_err(|source| StartupError::InvalidImagesDir {
                path: path.to_path_buf(),
                source,
            })?;

        if !root.is_dir() {
            return Err(StartupError::NotADirectory(root));
        }

        Ok(Self {
            root: Arc::new(root),
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Candidate path for an identifier. The identifier is joined verbatim.
    pub fn join(&self, image_id: &str) -> PathBuf {
        self.root.join(image_id)
    }
}
