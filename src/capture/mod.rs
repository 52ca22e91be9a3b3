//! 撮影・トリミング
//!
//! - CaptureSource: カメラ撮影 / ギャラリー選択で生画像を得る
//! - Cropper: 生画像をトリミングして名刺画像にする
//!
//! どちらも `Ok(None)` はユーザーによるキャンセル。

mod camera;
mod cropper;
mod gallery;

pub use camera::CommandCamera;
pub use cropper::{crop_image, CropRect, InteractiveCropper, PassThroughCropper};
pub use gallery::GalleryPicker;

use crate::error::Result;
use meishi_common::{CaptureMode, CardImage, RawImage};

pub trait CaptureSource {
    fn capture(&mut self, mode: CaptureMode) -> Result<Option<RawImage>>;
}

pub trait Cropper {
    fn crop(&mut self, raw: RawImage) -> Result<Option<CardImage>>;
}

/// モードごとに撮影元を切り替える
pub struct ModeSwitch<C, G> {
    pub camera: C,
    pub gallery: G,
}

impl<C: CaptureSource, G: CaptureSource> CaptureSource for ModeSwitch<C, G> {
    fn capture(&mut self, mode: CaptureMode) -> Result<Option<RawImage>> {
        match mode {
            CaptureMode::Camera => self.camera.capture(mode),
            CaptureMode::Gallery => self.gallery.capture(mode),
        }
    }
}
