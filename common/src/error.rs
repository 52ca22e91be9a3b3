//! エラー型定義

use crate::types::CardId;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 位置が範囲外（表示と状態のずれ）
    #[error("名刺が見つかりません: 位置 {position}（{len}枚中）")]
    PositionNotFound { position: usize, len: usize },

    #[error("名刺が見つかりません: {0}")]
    CardNotFound(CardId),

    #[error("{state}状態では{action}できません")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("確認ダイアログエラー: {0}")]
    Confirmation(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_position_not_found() {
        let error = Error::PositionNotFound { position: 3, len: 2 };
        assert_eq!(format!("{}", error), "名刺が見つかりません: 位置 3（2枚中）");
    }

    #[test]
    fn test_error_display_invalid_transition() {
        let error = Error::InvalidTransition {
            action: "保存",
            state: "待機",
        };
        assert_eq!(format!("{}", error), "待機状態では保存できません");
    }

    #[test]
    fn test_error_display_confirmation() {
        let error = Error::Confirmation("端末が対話モードではありません".to_string());
        assert_eq!(format!("{}", error), "確認ダイアログエラー: 端末が対話モードではありません");
    }

    #[test]
    fn test_error_card_not_found_mentions_id() {
        let id = CardId::new();
        let display = format!("{}", Error::CardNotFound(id));
        assert!(display.contains(&id.to_string()));
    }
}
