//! Filesystem primitives behind every endpoint.
//!
//! Nothing is cached: each call reads the directory as it is right now.

use crate::config::ImagesDir;
use crate::error::ApiError;
use log::{info, warn};
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Names of the regular files directly under the root, in listing order.
pub async fn list_image_files(dir: &ImagesDir) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir.path()).await?;

    while let Some(entry) = entries.next_entry().await? {
        // Follows symlinks; anything that can't be stat'ed is not a file.
        let is_file = fs::metadata(entry.path())
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!("Skipping non UTF-8 file name {:?}", raw),
        }
    }

    sort_by_name(&mut names);
    Ok(names)
}

/// Case-insensitive ascending, with the raw name breaking ties.
pub fn sort_by_name(names: &mut [String]) {
    names.sort_by_cached_key(|name| (name.to_lowercase(), name.clone()));
}

/// Index window of a 1-indexed page and whether anything follows it.
pub fn page_window(total: usize, page: u64, limit: u64) -> (Range<usize>, bool) {
    let total = total as u64;
    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = page.saturating_mul(limit);
    let has_more = end < total;

    (start.min(total) as usize..end.min(total) as usize, has_more)
}

pub fn paginate<T>(items: &[T], page: u64, limit: u64) -> (&[T], bool) {
    let (window, has_more) = page_window(items.len(), page, limit);
    (&items[window], has_more)
}

/// Map an identifier to an existing regular file under the root.
pub async fn resolve_file(dir: &ImagesDir, image_id: &str) -> Result<PathBuf, ApiError> {
    let path = dir.join(image_id);

    match fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => Ok(path),
        _ => Err(ApiError::NotFound),
    }
}

pub async fn delete_file(dir: &ImagesDir, image_id: &str) -> Result<(), ApiError> {
    let path = resolve_file(dir, image_id).await?;
    remove_resolved(&path).await
}

/// Any removal failure is internal and carries the OS error text.
async fn remove_resolved(path: &Path) -> Result<(), ApiError> {
    if let Err(e) = fs::remove_file(path).await {
        warn!("Failed to delete {}: {}", path.display(), e);
        return Err(ApiError::Internal(e.to_string()));
    }

    info!("Deleted {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn images_dir(files: &[&str]) -> (TempDir, ImagesDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        for name in files {
            std::fs::write(temp_dir.path().join(name), name.as_bytes()).unwrap();
        }
        let dir = ImagesDir::open(temp_dir.path()).unwrap();
        (temp_dir, dir)
    }

    #[tokio::test]
    async fn lists_case_insensitively() {
        let (_temp, dir) = images_dir(&["B.png", "a.png", "C.png"]);
        let names = list_image_files(&dir).await.unwrap();
        assert_eq!(names, vec!["a.png", "B.png", "C.png"]);
    }

    #[tokio::test]
    async fn skips_subdirectories() {
        let (temp, dir) = images_dir(&["a.jpg"]);
        std::fs::create_dir(temp.path().join("nested")).unwrap();
        std::fs::write(temp.path().join("nested").join("b.jpg"), b"b").unwrap();

        let names = list_image_files(&dir).await.unwrap();
        assert_eq!(names, vec!["a.jpg"]);
    }

    #[tokio::test]
    async fn empty_directory_lists_nothing() {
        let (_temp, dir) = images_dir(&[]);
        assert!(list_image_files(&dir).await.unwrap().is_empty());
    }

    #[test]
    fn names_equal_under_case_folding_have_stable_order() {
        let mut names = vec!["a.png".to_string(), "A.png".to_string()];
        sort_by_name(&mut names);
        assert_eq!(names, vec!["A.png", "a.png"]);

        let mut names = vec!["A.png".to_string(), "a.png".to_string()];
        sort_by_name(&mut names);
        assert_eq!(names, vec!["A.png", "a.png"]);
    }

    #[test]
    fn page_sizes_follow_the_window() {
        for total in 0..12usize {
            for page in 1..6u64 {
                for limit in 1..5u64 {
                    let (window, has_more) = page_window(total, page, limit);
                    let remaining = (total as i64 - ((page - 1) * limit) as i64).max(0) as u64;
                    assert_eq!(window.len() as u64, remaining.min(limit));
                    assert_eq!(has_more, page * limit < total as u64);
                }
            }
        }
    }

    #[test]
    fn paginate_walks_through_pages() {
        let files = ["a.jpg", "b.jpg", "c.jpg"];
        assert_eq!(paginate(&files, 1, 2), (&files[0..2], true));
        assert_eq!(paginate(&files, 2, 2), (&files[2..3], false));
        assert_eq!(paginate(&files, 5, 2), (&files[3..3], false));
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let (window, has_more) = page_window(3, u64::MAX, u64::MAX);
        assert!(window.is_empty());
        assert!(!has_more);
    }

    #[tokio::test]
    async fn resolve_rejects_missing_and_directories() {
        let (temp, dir) = images_dir(&["a.jpg"]);
        std::fs::create_dir(temp.path().join("nested")).unwrap();

        assert_eq!(resolve_file(&dir, "a.jpg").await.unwrap(), dir.join("a.jpg"));
        assert!(matches!(
            resolve_file(&dir, "missing.jpg").await,
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            resolve_file(&dir, "nested").await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_file() {
        let (temp, dir) = images_dir(&["a.jpg", "b.jpg"]);
        delete_file(&dir, "a.jpg").await.unwrap();

        assert!(!temp.path().join("a.jpg").exists());
        assert_eq!(list_image_files(&dir).await.unwrap(), vec!["b.jpg"]);
    }

    #[tokio::test]
    async fn failed_removal_is_internal_with_os_message() {
        let (temp, dir) = images_dir(&["a.jpg"]);
        let path = resolve_file(&dir, "a.jpg").await.unwrap();
        // Gone between resolution and removal.
        std::fs::remove_file(temp.path().join("a.jpg")).unwrap();

        match remove_resolved(&path).await {
            Err(ApiError::Internal(detail)) => {
                assert!(detail.contains("os error"), "unexpected detail: {}", detail);
            }
            other => panic!("expected internal error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_missing_leaves_directory_alone() {
        let (_temp, dir) = images_dir(&["a.jpg"]);
        assert!(matches!(
            delete_file(&dir, "missing.jpg").await,
            Err(ApiError::NotFound)
        ));
        assert_eq!(list_image_files(&dir).await.unwrap(), vec!["a.jpg"]);
    }
}
