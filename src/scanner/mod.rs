//! ギャラリーフォルダのスキャン

mod exif;

pub use self::exif::extract_taken_at;

use crate::error::{MeishiError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    /// 撮影日時（EXIF）
    pub taken_at: Option<String>,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic", "JPG", "JPEG", "PNG", "HEIC"];

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(MeishiError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(ext) = path.extension() else {
            continue;
        };
        if !is_image_extension(&ext.to_string_lossy()) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        images.push(ImageInfo {
            path: path.to_path_buf(),
            file_name,
            taken_at: extract_taken_at(path),
        });
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("heic"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("gif"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(MeishiError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images() {
        let dir = tempdir().expect("Failed to create temp dir");

        File::create(dir.path().join("card2.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("card1.PNG")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("memo.txt")).unwrap().write_all(b"text").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("card3.jpg")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].file_name, "card1.PNG");
        assert_eq!(result[1].file_name, "card2.jpg");
        assert!(result[0].taken_at.is_none());
    }
}
