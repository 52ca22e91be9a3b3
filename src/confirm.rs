//! 端末での削除確認

use dialoguer::Select;
use meishi_common::{ConfirmPrompt, Confirmer};

/// dialoguer で確認を出す
#[derive(Debug, Default)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> meishi_common::Result<bool> {
        // キャンセルを既定にする
        let items = [prompt.cancel_label.as_str(), prompt.confirm_label.as_str()];
        let choice = Select::new()
            .with_prompt(format!("{}: {}", prompt.title, prompt.message))
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| meishi_common::Error::Confirmation(e.to_string()))?;

        Ok(choice == Some(1))
    }
}
