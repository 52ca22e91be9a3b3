//! 外部コマンドによるカメラ撮影
//!
//! 設定の `camera_command` を `sh -c` で実行する（Windowsは `cmd /c`）。
//! `{output}` は保存先ファイルに置換される。例:
//! `fswebcam -r 1280x720 --no-banner {output}`

use super::CaptureSource;
use crate::error::{MeishiError, Result};
use meishi_common::{CaptureMode, RawImage};
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct CommandCamera {
    command: Option<String>,
    output_dir: PathBuf,
}

impl CommandCamera {
    pub fn new(command: Option<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            output_dir: output_dir.into(),
        }
    }

    /// 撮影ごとに一意な保存先
    fn output_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let suffix = uuid::Uuid::now_v7().simple().to_string();
        self.output_dir
            .join(format!("meishi_{}_{}.jpg", stamp, &suffix[suffix.len() - 8..]))
    }

    fn run(&self, template: &str, output: &Path) -> Result<()> {
        let command_line = expand_command(template, output);
        tracing::debug!(%command_line, "撮影コマンド実行");

        #[cfg(windows)]
        let status = Command::new("cmd").args(["/c", &command_line]).status();

        #[cfg(not(windows))]
        let status = Command::new("sh").args(["-c", &command_line]).status();

        let status = status.map_err(|e| MeishiError::Capture(e.to_string()))?;
        if !status.success() {
            return Err(MeishiError::Capture(format!(
                "撮影コマンドが失敗しました (code {:?})",
                status.code()
            )));
        }
        Ok(())
    }
}

impl CaptureSource for CommandCamera {
    fn capture(&mut self, _mode: CaptureMode) -> Result<Option<RawImage>> {
        let template = self.command.clone().ok_or_else(|| {
            MeishiError::Config(
                "撮影コマンドが設定されていません。`meishi config --set-camera-command` で設定してください".into(),
            )
        })?;

        std::fs::create_dir_all(&self.output_dir)?;
        let output = self.output_path();
        self.run(&template, &output)?;

        // 画像が書かれていなければ撮影キャンセル扱い
        if !output.exists() {
            tracing::info!("撮影画像がありません: {}", output.display());
            return Ok(None);
        }

        let bytes = std::fs::read(&output)?;
        if let Err(e) = std::fs::remove_file(&output) {
            tracing::debug!(path = %output.display(), "撮影ファイル削除失敗: {}", e);
        }
        let label = output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Some(RawImage::new(bytes, label)))
    }
}

/// `{output}` を保存先に置換
fn expand_command(template: &str, output: &Path) -> String {
    template.replace("{output}", &output.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_expand_command() {
        let cmd = expand_command("fswebcam --no-banner {output}", Path::new("/tmp/a.jpg"));
        assert_eq!(cmd, "fswebcam --no-banner /tmp/a.jpg");
    }

    #[test]
    fn test_missing_command_is_config_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut camera = CommandCamera::new(None, dir.path());
        let result = camera.capture(CaptureMode::Camera);
        assert!(matches!(result, Err(MeishiError::Config(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_writes_image() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut camera = CommandCamera::new(Some("printf card > {output}".into()), dir.path());

        let raw = camera.capture(CaptureMode::Camera).unwrap().expect("image");
        assert_eq!(raw.bytes(), b"card");
        assert!(raw.label().starts_with("meishi_"));
        // 読み込んだ撮影ファイルは残さない
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_right_after_capture_returns_nothing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut shooter = CommandCamera::new(Some("printf card1 > {output}".into()), dir.path());
        let mut canceller = CommandCamera::new(Some("true".into()), dir.path());

        let first = shooter.capture(CaptureMode::Camera).unwrap();
        assert_eq!(first.expect("image").bytes(), b"card1");

        // 同じ秒内でも前回の画像を拾わない
        assert!(canceller.capture(CaptureMode::Camera).unwrap().is_none());
    }

    #[test]
    fn test_output_paths_are_unique() {
        let camera = CommandCamera::new(None, "/tmp/meishi");
        assert_ne!(camera.output_path(), camera.output_path());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_without_output_is_cancel() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut camera = CommandCamera::new(Some("true".into()), dir.path());
        assert!(camera.capture(CaptureMode::Camera).unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_capture_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut camera = CommandCamera::new(Some("false".into()), dir.path());
        assert!(matches!(
            camera.capture(CaptureMode::Camera),
            Err(MeishiError::Capture(_))
        ));
    }
}
