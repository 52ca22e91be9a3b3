use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeishiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("トリミングエラー: {0}")]
    Crop(String),

    #[error("撮影コマンドエラー: {0}")]
    Capture(String),

    #[error("文字認識エラー: {0}")]
    Recognition(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("{0}")]
    Store(#[from] meishi_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

impl From<dialoguer::Error> for MeishiError {
    fn from(e: dialoguer::Error) -> Self {
        MeishiError::CliExecution(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MeishiError>;
