//! 削除確認
//!
//! 破壊的な操作は呼び出し側から `Confirmer` を受け取り、
//! 了承が得られた場合のみ実行する。

use crate::error::Result;

/// 確認ダイアログの文言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmPrompt {
    /// 名刺削除の確認
    pub fn delete_card() -> Self {
        Self {
            title: "確認".into(),
            message: "本当に削除しますか？".into(),
            confirm_label: "削除".into(),
            cancel_label: "キャンセル".into(),
        }
    }
}

/// 確認ダイアログを出せるもの
pub trait Confirmer {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<bool>;
}

/// 常に了承（スクリプト用）
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> Result<bool> {
        Ok(true)
    }
}

/// 常にキャンセル
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverConfirm;

impl Confirmer for NeverConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> Result<bool> {
        Ok(false)
    }
}
