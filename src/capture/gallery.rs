//! ギャラリー（画像フォルダ）から選択

use super::CaptureSource;
use crate::error::{MeishiError, Result};
use crate::scanner::{scan_folder, ImageInfo};
use dialoguer::Select;
use meishi_common::{CaptureMode, RawImage};
use std::path::PathBuf;

pub struct GalleryPicker {
    folder: PathBuf,
}

impl GalleryPicker {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    fn choose(&self, images: &[ImageInfo]) -> Result<Option<usize>> {
        let mut items: Vec<String> = images.iter().map(display_item).collect();
        items.push("キャンセル".into());

        let choice = Select::new()
            .with_prompt(format!("名刺画像を選択 ({})", self.folder.display()))
            .items(&items)
            .default(0)
            .interact()?;

        Ok((choice < images.len()).then_some(choice))
    }
}

fn display_item(info: &ImageInfo) -> String {
    match &info.taken_at {
        Some(date) => format!("{} ({})", info.file_name, date),
        None => info.file_name.clone(),
    }
}

/// 画像ファイルを読み込む
pub fn load_image(info: &ImageInfo) -> Result<RawImage> {
    let bytes = std::fs::read(&info.path)
        .map_err(|e| MeishiError::ImageLoad(format!("{}: {}", info.path.display(), e)))?;
    Ok(RawImage::new(bytes, info.file_name.clone()).with_source(&info.path))
}

impl CaptureSource for GalleryPicker {
    fn capture(&mut self, _mode: CaptureMode) -> Result<Option<RawImage>> {
        let images = scan_folder(&self.folder)?;
        if images.is_empty() {
            return Err(MeishiError::NoImagesFound(self.folder.display().to_string()));
        }

        match self.choose(&images)? {
            Some(index) => load_image(&images[index]).map(Some),
            None => Ok(None),
        }
    }
}
