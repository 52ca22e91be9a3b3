//! トリミング
//!
//! 画像をデコードして矩形で切り出し、PNGで再エンコードする。

use super::Cropper;
use crate::error::{MeishiError, Result};
use dialoguer::{Input, Select};
use image::{GenericImageView, ImageFormat};
use meishi_common::{CardImage, RawImage};
use std::io::Cursor;
use std::path::Path;

/// 切り出し矩形（ピクセル）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// 上下左右から同じ割合（%）を切り落とす
    pub fn from_margins(width: u32, height: u32, percent: u32) -> Self {
        let percent = percent.min(49);
        let dx = width * percent / 100;
        let dy = height * percent / 100;
        Self {
            x: dx,
            y: dy,
            width: width - dx * 2,
            height: height - dy * 2,
        }
    }

    fn fits(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.saturating_add(self.width) <= width
            && self.y.saturating_add(self.height) <= height
    }
}

/// 画像サイズを取得
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let img = image::load_from_memory(bytes).map_err(|e| MeishiError::ImageLoad(e.to_string()))?;
    Ok(img.dimensions())
}

/// 矩形で切り出してPNGバイト列を返す
pub fn crop_image(bytes: &[u8], rect: CropRect) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes).map_err(|e| MeishiError::ImageLoad(e.to_string()))?;
    let (width, height) = img.dimensions();
    if !rect.fits(width, height) {
        return Err(MeishiError::Crop(format!(
            "範囲外の矩形です: {:?}（画像 {}x{}）",
            rect, width, height
        )));
    }

    let cropped = img.crop_imm(rect.x, rect.y, rect.width, rect.height);
    let mut out = Vec::new();
    cropped
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| MeishiError::Crop(e.to_string()))?;
    Ok(out)
}

fn cropped_label(raw: &RawImage) -> String {
    let stem = Path::new(raw.label())
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "card".into());
    format!("{}_crop.png", stem)
}

fn with_raw_source(image: CardImage, raw: &RawImage) -> CardImage {
    match raw.source() {
        Some(path) => image.with_source(path),
        None => image,
    }
}

/// 固定の余白で切り出す（0なら無加工）
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughCropper {
    pub margin_percent: u32,
}

impl Cropper for PassThroughCropper {
    fn crop(&mut self, raw: RawImage) -> Result<Option<CardImage>> {
        if self.margin_percent == 0 {
            return Ok(Some(raw.into_card_image()));
        }
        let (w, h) = image_dimensions(raw.bytes())?;
        let bytes = crop_image(raw.bytes(), CropRect::from_margins(w, h, self.margin_percent))?;
        let image = CardImage::new(bytes, cropped_label(&raw));
        Ok(Some(with_raw_source(image, &raw)))
    }
}

/// 対話式トリミング
#[derive(Debug, Default)]
pub struct InteractiveCropper;

impl Cropper for InteractiveCropper {
    fn crop(&mut self, raw: RawImage) -> Result<Option<CardImage>> {
        let (w, h) = image_dimensions(raw.bytes())?;
        println!("  画像サイズ: {}x{}", w, h);

        let items = ["そのまま使う", "余白を切り落とす（%）", "範囲を指定（x,y,幅,高さ）", "キャンセル"];
        let choice = Select::new()
            .with_prompt("トリミング")
            .items(&items)
            .default(0)
            .interact()?;

        let rect = match choice {
            0 => return Ok(Some(raw.into_card_image())),
            1 => {
                let percent: u32 = Input::new()
                    .with_prompt("余白（%）")
                    .default(5)
                    .interact_text()?;
                CropRect::from_margins(w, h, percent)
            }
            2 => {
                let rect_text: String = Input::new()
                    .with_prompt("x,y,幅,高さ")
                    .interact_text()?;
                parse_rect(&rect_text)?
            }
            _ => return Ok(None),
        };

        let bytes = crop_image(raw.bytes(), rect)?;
        let image = CardImage::new(bytes, cropped_label(&raw));
        Ok(Some(with_raw_source(image, &raw)))
    }
}

/// "x,y,w,h" をパース
fn parse_rect(rect_text: &str) -> Result<CropRect> {
    let values = rect_text
        .split(',')
        .map(|v| v.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| MeishiError::Crop(format!("矩形の指定が不正です: {}", e)))?;

    match values.as_slice() {
        [x, y, width, height] => Ok(CropRect {
            x: *x,
            y: *y,
            width: *width,
            height: *height,
        }),
        _ => Err(MeishiError::Crop("x,y,幅,高さ の4つを指定してください".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, _| if x < width / 2 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) });
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_from_margins() {
        let rect = CropRect::from_margins(200, 100, 10);
        assert_eq!(rect, CropRect { x: 20, y: 10, width: 160, height: 80 });

        // 50%以上は49%に丸める
        let rect = CropRect::from_margins(100, 100, 80);
        assert_eq!(rect.width, 2);
    }

    #[test]
    fn test_crop_image() {
        let bytes = crop_image(&png(40, 20), CropRect { x: 25, y: 5, width: 10, height: 10 }).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (10, 10));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let result = crop_image(&png(10, 10), CropRect { x: 5, y: 0, width: 10, height: 10 });
        assert!(matches!(result, Err(MeishiError::Crop(_))));

        let result = crop_image(&png(10, 10), CropRect { x: 0, y: 0, width: 0, height: 10 });
        assert!(result.is_err());
    }

    #[test]
    fn test_crop_invalid_image() {
        let result = crop_image(b"not an image", CropRect { x: 0, y: 0, width: 1, height: 1 });
        assert!(matches!(result, Err(MeishiError::ImageLoad(_))));
    }

    #[test]
    fn test_parse_rect() {
        assert_eq!(
            parse_rect("1, 2, 30, 40").unwrap(),
            CropRect { x: 1, y: 2, width: 30, height: 40 }
        );
        assert!(parse_rect("1,2,3").is_err());
        assert!(parse_rect("a,b,c,d").is_err());
    }

    #[test]
    fn test_pass_through_cropper() {
        let raw = RawImage::new(png(20, 20), "card.jpg").with_source("/photos/card.jpg");

        let image = PassThroughCropper::default().crop(raw.clone()).unwrap().unwrap();
        assert_eq!(image.label(), "card.jpg");

        let image = PassThroughCropper { margin_percent: 10 }.crop(raw).unwrap().unwrap();
        assert_eq!(image.label(), "card_crop.png");
        assert_eq!(image.source(), Some(Path::new("/photos/card.jpg")));
        assert_eq!(image_dimensions(image.bytes()).unwrap(), (16, 16));
    }
}
