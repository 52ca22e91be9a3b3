//! 名刺まわりの共通型
//!
//! - CardId: 名刺ごとの不変ID（位置ではなくこちらで追跡する）
//! - CardImage / RawImage: 画像ハンドル（エンコード済みバイト列を共有）
//! - CaptureMode / CaptureState: 撮影モードと表裏の状態

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// 名刺ID（作成時に採番）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// トリミング済みの名刺画像
///
/// 中身は不透明なバイト列。clone しても画像データはコピーされない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    data: Arc<[u8]>,
    label: String,
    source: Option<PathBuf>,
}

impl CardImage {
    pub fn new(data: impl Into<Arc<[u8]>>, label: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            label: label.into(),
            source: None,
        }
    }

    /// 元ファイルのパスを付与
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 撮影直後（トリミング前）の画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage(CardImage);

impl RawImage {
    pub fn new(data: impl Into<Arc<[u8]>>, label: impl Into<String>) -> Self {
        Self(CardImage::new(data, label))
    }

    pub fn with_source(self, path: impl Into<PathBuf>) -> Self {
        Self(self.0.with_source(path))
    }

    pub fn bytes(&self) -> &[u8] {
        self.0.bytes()
    }

    pub fn label(&self) -> &str {
        self.0.label()
    }

    pub fn source(&self) -> Option<&Path> {
        self.0.source()
    }

    /// トリミングせずにそのまま名刺画像として扱う
    pub fn into_card_image(self) -> CardImage {
        self.0
    }
}

/// 撮影モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    #[default]
    Camera,
    Gallery,
}

impl std::str::FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "camera" | "c" => Ok(CaptureMode::Camera),
            "gallery" | "g" => Ok(CaptureMode::Gallery),
            _ => Err(format!("Unknown mode: {}. Use camera or gallery", s)),
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureMode::Camera => write!(f, "camera"),
            CaptureMode::Gallery => write!(f, "gallery"),
        }
    }
}

/// 名刺の面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSide {
    Front,
    Back,
}

impl CardSide {
    pub fn label(&self) -> &'static str {
        match self {
            CardSide::Front => "表",
            CardSide::Back => "裏",
        }
    }
}

/// 撮影状態
///
/// `front_captured` は表を撮った後に true、裏を撮った後に false へ戻る。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureState {
    pub pending_mode: CaptureMode,
    pub front_captured: bool,
}

impl CaptureState {
    pub fn new(mode: CaptureMode) -> Self {
        Self {
            pending_mode: mode,
            front_captured: false,
        }
    }

    /// トリミング完了を記録し、今回の面を返す
    pub fn record_crop(&mut self) -> CardSide {
        if self.front_captured {
            self.front_captured = false;
            CardSide::Back
        } else {
            self.front_captured = true;
            CardSide::Front
        }
    }

    /// 次に撮る面
    pub fn next_side(&self) -> CardSide {
        if self.front_captured {
            CardSide::Back
        } else {
            CardSide::Front
        }
    }

    /// 裏面を撮らずに次の名刺へ進む
    pub fn reset_pair(&mut self) {
        self.front_captured = false;
    }
}
