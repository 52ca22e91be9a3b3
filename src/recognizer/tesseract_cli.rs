//! tesseract CLI連携
//!
//! 画像を一時ファイルに書き出し、`tesseract <file> stdout -l jpn+eng` の
//! 標準出力を認識結果とする。

use super::{RecognitionLanguage, Recognizer};
use crate::error::{MeishiError, Result};
use meishi_common::CardImage;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
    languages: Vec<RecognitionLanguage>,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, languages: Vec<RecognitionLanguage>) -> Self {
        Self {
            command: command.into(),
            languages,
        }
    }

    /// `-l` に渡す言語指定（jpn+eng）
    pub fn language_arg(&self) -> String {
        self.languages
            .iter()
            .map(|l| l.code())
            .collect::<Vec<_>>()
            .join("+")
    }

    fn build_args(&self, image_path: &Path) -> Vec<String> {
        let mut args = vec![image_path.display().to_string(), "stdout".to_string()];
        if !self.languages.is_empty() {
            args.push("-l".to_string());
            args.push(self.language_arg());
        }
        args
    }

    fn run(&self, image_path: &Path) -> Result<String> {
        let output = Command::new(&self.command)
            .args(self.build_args(image_path))
            .output()
            .map_err(|e| MeishiError::Recognition(format!("{} 実行エラー: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MeishiError::Recognition(format!(
                "{} failed (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Recognizer for TesseractCli {
    fn recognize(&self, image: &CardImage) -> Result<String> {
        // ファイルはドロップ時に削除される
        let temp = write_temp_image(image)?;
        let text = self.run(temp.path())?;
        tracing::debug!(chars = text.chars().count(), "文字認識完了");
        Ok(text)
    }
}

fn write_temp_image(image: &CardImage) -> Result<NamedTempFile> {
    let ext = Path::new(image.label())
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    let mut file = tempfile::Builder::new()
        .prefix("meishi-ocr-")
        .suffix(&format!(".{}", ext))
        .tempfile()?;
    file.write_all(image.bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> CardImage {
        CardImage::new(vec![1u8, 2, 3], "card.jpg")
    }

    #[test]
    fn test_language_arg() {
        let cli = TesseractCli::new("tesseract", RecognitionLanguage::defaults());
        assert_eq!(cli.language_arg(), "jpn+eng");

        let cli = TesseractCli::new("tesseract", vec![RecognitionLanguage::Japanese]);
        assert_eq!(cli.language_arg(), "jpn");
    }

    #[test]
    fn test_build_args() {
        let cli = TesseractCli::new("tesseract", RecognitionLanguage::defaults());
        let args = cli.build_args(Path::new("/tmp/card.png"));
        assert_eq!(args, vec!["/tmp/card.png", "stdout", "-l", "jpn+eng"]);

        let cli = TesseractCli::new("tesseract", Vec::new());
        assert_eq!(cli.build_args(Path::new("a.png")), vec!["a.png", "stdout"]);
    }

    #[test]
    fn test_missing_command_is_recognition_error() {
        let cli = TesseractCli::new("/nonexistent/meishi-ocr", RecognitionLanguage::defaults());
        let result = cli.recognize(&image());
        assert!(matches!(result, Err(MeishiError::Recognition(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_returned() {
        // echo は引数をそのまま出力する
        let cli = TesseractCli::new("echo", RecognitionLanguage::defaults());
        let text = cli.recognize(&image()).unwrap();
        assert!(text.contains("stdout -l jpn+eng"));
        assert!(text.contains("meishi-ocr-"));
        assert!(text.contains(".jpg"));

        // 認識後に一時ファイルは消えている
        let path = text.split_whitespace().next().expect("path");
        assert!(!Path::new(path).exists());
    }

    #[test]
    fn test_temp_image_is_removed_on_drop() {
        let temp = write_temp_image(&image()).unwrap();
        let path = temp.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1u8, 2, 3]);

        drop(temp);
        assert!(!path.exists());
    }
}
