//! 文字認識（OCR）
//!
//! 認識処理は別スレッドで1回だけ実行し、結果は oneshot チャネルで返す。
//! 受け取り側（RecognitionTask）を捨てれば結果も捨てられる。

mod tesseract_cli;

pub use tesseract_cli::TesseractCli;

use crate::error::{MeishiError, Result};
use meishi_common::{CardId, CardImage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::oneshot;

/// 認識言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionLanguage {
    Japanese,
    English,
}

impl RecognitionLanguage {
    /// tesseract の言語コード
    pub fn code(&self) -> &'static str {
        match self {
            RecognitionLanguage::Japanese => "jpn",
            RecognitionLanguage::English => "eng",
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![RecognitionLanguage::Japanese, RecognitionLanguage::English]
    }
}

impl std::str::FromStr for RecognitionLanguage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "japanese" | "ja" | "jpn" => Ok(RecognitionLanguage::Japanese),
            "english" | "en" | "eng" => Ok(RecognitionLanguage::English),
            _ => Err(format!("Unknown language: {}. Use ja or en", s)),
        }
    }
}

impl std::fmt::Display for RecognitionLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognitionLanguage::Japanese => write!(f, "日本語"),
            RecognitionLanguage::English => write!(f, "英語"),
        }
    }
}

/// カンマ区切りの言語リストをパース
pub fn parse_languages(list: &str) -> Result<Vec<RecognitionLanguage>> {
    let languages = list
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<RecognitionLanguage>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(MeishiError::Config)?;

    if languages.is_empty() {
        return Err(MeishiError::Config("認識言語が空です".into()));
    }
    Ok(languages)
}

/// 画像から文字列を得るもの
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &CardImage) -> Result<String>;
}

/// 認識結果
#[derive(Debug)]
pub struct RecognitionOutcome {
    pub card: CardId,
    pub result: Result<String>,
}

/// 実行中の認識処理
#[derive(Debug)]
pub struct RecognitionTask {
    card: CardId,
    rx: oneshot::Receiver<RecognitionOutcome>,
}

impl RecognitionTask {
    pub fn card(&self) -> CardId {
        self.card
    }

    /// 結果を待つ
    pub async fn wait(self) -> RecognitionOutcome {
        let card = self.card;
        self.rx.await.unwrap_or_else(|_| RecognitionOutcome {
            card,
            result: Err(MeishiError::Recognition("認識処理が中断されました".into())),
        })
    }
}

/// 認識を開始する（tokioランタイム内で呼ぶこと）
pub fn spawn_recognition(
    recognizer: Arc<dyn Recognizer>,
    card: CardId,
    image: CardImage,
) -> RecognitionTask {
    let (tx, rx) = oneshot::channel();

    tokio::task::spawn_blocking(move || {
        tracing::debug!(%card, bytes = image.len(), "文字認識開始");
        let result = recognizer.recognize(&image);
        if tx.send(RecognitionOutcome { card, result }).is_err() {
            // 詳細画面が閉じられた
            tracing::debug!(%card, "認識結果を破棄");
        }
    });

    RecognitionTask { card, rx }
}
