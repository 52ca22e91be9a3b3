//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use meishi_kanri::config::Config;
use meishi_kanri::error::MeishiError;
use meishi_kanri::recognizer::parse_languages;
use meishi_kanri::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(MeishiError::FolderNotFound(_))));
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("memo.txt"), "hello").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// ストアのエラーは位置情報付きで伝わる
#[test]
fn test_store_error_wraps_common_error() {
    let err: MeishiError = meishi_common::Error::PositionNotFound { position: 4, len: 2 }.into();
    assert!(matches!(err, MeishiError::Store(_)));
    assert_eq!(format!("{}", err), "名刺が見つかりません: 位置 4（2枚中）");
}

/// 壊れた設定ファイル
#[test]
fn test_broken_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "[1, 2").unwrap();

    assert!(matches!(Config::load_from(&path), Err(MeishiError::JsonParse(_))));
}

/// 未対応の認識言語
#[test]
fn test_unknown_language() {
    let result = parse_languages("ja,fr");
    match result {
        Err(MeishiError::Config(msg)) => assert!(msg.contains("fr")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

/// MeishiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MeishiError::Config("テスト設定エラー".to_string()),
        MeishiError::FileNotFound("card.jpg".to_string()),
        MeishiError::FolderNotFound("/path/to/folder".to_string()),
        MeishiError::ImageLoad("decode".to_string()),
        MeishiError::Crop("範囲外".to_string()),
        MeishiError::Capture("camera".to_string()),
        MeishiError::Recognition("tesseract".to_string()),
        MeishiError::NoImagesFound("フォルダ".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}
