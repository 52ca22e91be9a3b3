use crate::error::{MeishiError, Result};
use crate::recognizer::RecognitionLanguage;
use meishi_common::{AnnotationLabels, CaptureMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 注釈ラベルの言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    #[default]
    Japanese,
    English,
}

impl LabelStyle {
    pub fn labels(&self) -> AnnotationLabels {
        match self {
            LabelStyle::Japanese => AnnotationLabels::japanese(),
            LabelStyle::English => AnnotationLabels::english(),
        }
    }
}

impl std::str::FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "japanese" | "ja" => Ok(LabelStyle::Japanese),
            "english" | "en" => Ok(LabelStyle::English),
            _ => Err(format!("Unknown labels: {}. Use ja or en", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 認識言語（順序はそのまま -l に渡す）
    pub languages: Vec<RecognitionLanguage>,
    /// OCRコマンド
    pub ocr_command: String,
    /// 撮影コマンド（{output} が保存先に置換される）
    pub camera_command: Option<String>,
    /// ギャラリーとして使うフォルダ
    pub gallery_dir: Option<PathBuf>,
    pub default_mode: CaptureMode,
    pub labels: LabelStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: RecognitionLanguage::defaults(),
            ocr_command: "tesseract".into(),
            camera_command: None,
            gallery_dir: None,
            default_mode: CaptureMode::Camera,
            labels: LabelStyle::Japanese,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MeishiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("meishi-kanri").join("config.json"))
    }

    /// ギャラリーフォルダ（未設定ならカレント）
    pub fn gallery_dir(&self) -> PathBuf {
        self.gallery_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
