pub mod delete;
pub mod download;
pub mod file;
pub mod list;
pub mod serve;

use percent_encoding::percent_decode_str;

// Re-export handler functions
pub use delete::handle_delete;
pub use download::handle_download;
pub use list::handle_list;
pub use serve::handle_serve;

/// Path segments reach us still percent-encoded.
pub(crate) fn decode_id(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
