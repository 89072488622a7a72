use crate::error::ApiError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: u64,
    pub limit: u64,
}

impl PageQuery {
    /// Both values are 1-based; zero is rejected before the directory is read.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page < 1 {
            return Err(ApiError::InvalidPage(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if self.limit < 1 {
            return Err(ApiError::InvalidPage(
                "limit must be greater than or equal to 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePlaceholder {
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl ImagePlaceholder {
    pub fn from_name(name: &str) -> Self {
        Self {
            id: name.to_string(),
            image_url: format!("{}{}", FILES_PREFIX, name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedImages {
    pub images: Vec<ImagePlaceholder>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Public serving endpoint every `imageUrl` points at.
pub const FILES_PREFIX: &str = "/files/";
