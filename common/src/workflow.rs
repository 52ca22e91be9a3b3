//! 撮影・注釈ワークフロー
//!
//! ```text
//! Idle ─撮影要求→ Capturing ─画像取得→ Cropping ─確定→ Idle（名刺追加）
//!                    └キャンセル→ Idle      └キャンセル→ Idle
//! Idle ─詳細表示→ Recognizing ─OCR結果→ Annotating ─保存/削除→ Idle
//! ```
//!
//! OCRの結果は対象の名刺をまだ認識中の場合だけ反映する。
//! 詳細を閉じた後に届いた結果は捨てる。

use crate::confirm::{ConfirmPrompt, Confirmer};
use crate::error::{Error, Result};
use crate::extractor::{extract, format_with, AnnotationLabels};
use crate::store::{Card, CardStore};
use crate::types::{CaptureMode, CaptureState, CardId, CardImage, CardSide};

/// ワークフローの状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Capturing { mode: CaptureMode },
    Cropping { mode: CaptureMode },
    Recognizing { card: CardId },
    Annotating { card: CardId, draft: String },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "待機",
            WorkflowState::Capturing { .. } => "撮影",
            WorkflowState::Cropping { .. } => "トリミング",
            WorkflowState::Recognizing { .. } => "文字認識",
            WorkflowState::Annotating { .. } => "注釈編集",
        }
    }
}

/// トリミング確定で追加された名刺
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendedCard {
    pub id: CardId,
    pub position: usize,
    pub side: CardSide,
}

/// OCR結果の反映結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionApplied {
    /// 下書きに反映した
    Drafted { card: CardId },
    /// 対象がもう開かれていないので捨てた
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedAnnotation {
    pub id: CardId,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Removed(Card),
    Cancelled,
}

#[derive(Debug, Default)]
pub struct Workflow {
    state: WorkflowState,
    capture: CaptureState,
}

impl Workflow {
    pub fn new(mode: CaptureMode) -> Self {
        Self {
            state: WorkflowState::Idle,
            capture: CaptureState::new(mode),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn capture_state(&self) -> &CaptureState {
        &self.capture
    }

    pub fn capture_state_mut(&mut self) -> &mut CaptureState {
        &mut self.capture
    }

    /// 編集中の下書き
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Annotating { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// 詳細表示中の名刺
    pub fn open_card_id(&self) -> Option<CardId> {
        match &self.state {
            WorkflowState::Recognizing { card } | WorkflowState::Annotating { card, .. } => Some(*card),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    pub fn request_capture(&mut self, mode: CaptureMode) -> Result<()> {
        if self.state != WorkflowState::Idle {
            return Err(self.invalid("撮影"));
        }
        self.capture.pending_mode = mode;
        self.state = WorkflowState::Capturing { mode };
        Ok(())
    }

    pub fn image_acquired(&mut self) -> Result<()> {
        match self.state {
            WorkflowState::Capturing { mode } => {
                self.state = WorkflowState::Cropping { mode };
                Ok(())
            }
            _ => Err(self.invalid("画像を受け取る")),
        }
    }

    pub fn cancel_capture(&mut self) -> Result<()> {
        match self.state {
            WorkflowState::Capturing { .. } => {
                self.state = WorkflowState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("撮影をキャンセル")),
        }
    }

    /// トリミング確定: 空の注釈で名刺を追加
    pub fn confirm_crop(&mut self, store: &mut CardStore, image: CardImage) -> Result<AppendedCard> {
        if !matches!(self.state, WorkflowState::Cropping { .. }) {
            return Err(self.invalid("トリミングを確定"));
        }
        let side = self.capture.record_crop();
        let position = store.append_with_annotation(image, side, String::new());
        let id = store.get_at(position)?.id;
        self.state = WorkflowState::Idle;
        Ok(AppendedCard { id, position, side })
    }

    pub fn cancel_crop(&mut self) -> Result<()> {
        match self.state {
            WorkflowState::Cropping { .. } => {
                self.state = WorkflowState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("トリミングをキャンセル")),
        }
    }

    /// 詳細を開いて文字認識待ちにする
    pub fn open_card(&mut self, store: &CardStore, position: usize) -> Result<CardId> {
        if self.state != WorkflowState::Idle {
            return Err(self.invalid("詳細を開く"));
        }
        let id = store.get_at(position)?.id;
        self.state = WorkflowState::Recognizing { card: id };
        Ok(id)
    }

    /// 結果を反映してよいか。認識中の名刺が削除済みなら詳細を閉じる
    fn accept_result(&mut self, store: &CardStore, card: CardId) -> bool {
        if self.state != (WorkflowState::Recognizing { card }) {
            return false;
        }
        if store.get(card).is_none() {
            self.state = WorkflowState::Idle;
            return false;
        }
        true
    }

    /// OCR結果から下書きを作る
    pub fn text_recognized(
        &mut self,
        store: &CardStore,
        card: CardId,
        text: &str,
        labels: &AnnotationLabels,
    ) -> RecognitionApplied {
        if !self.accept_result(store, card) {
            return RecognitionApplied::Ignored;
        }
        let draft = format_with(&extract(text), labels);
        self.state = WorkflowState::Annotating { card, draft };
        RecognitionApplied::Drafted { card }
    }

    /// OCR失敗: 現在の注釈のまま手入力へ
    pub fn recognition_failed(&mut self, store: &CardStore, card: CardId) -> RecognitionApplied {
        if !self.accept_result(store, card) {
            return RecognitionApplied::Ignored;
        }
        let draft = store.get(card).map(|c| c.annotation.clone()).unwrap_or_default();
        self.state = WorkflowState::Annotating { card, draft };
        RecognitionApplied::Drafted { card }
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) -> Result<()> {
        if let WorkflowState::Annotating { draft, .. } = &mut self.state {
            *draft = text.into();
            return Ok(());
        }
        Err(self.invalid("注釈を編集"))
    }

    /// 下書きを保存して詳細を閉じる
    pub fn save(&mut self, store: &mut CardStore) -> Result<SavedAnnotation> {
        let (card, draft) = match &self.state {
            WorkflowState::Annotating { card, draft } => (*card, draft.clone()),
            _ => return Err(self.invalid("保存")),
        };
        let position = store.update_annotation_by_id(card, draft)?;
        self.state = WorkflowState::Idle;
        Ok(SavedAnnotation { id: card, position })
    }

    /// 詳細表示中の名刺を確認の上で削除
    pub fn delete(&mut self, store: &mut CardStore, confirmer: &mut dyn Confirmer) -> Result<DeleteOutcome> {
        let card = match &self.state {
            WorkflowState::Annotating { card, .. } => *card,
            _ => return Err(self.invalid("削除")),
        };
        if !confirmer.confirm(&ConfirmPrompt::delete_card())? {
            return Ok(DeleteOutcome::Cancelled);
        }
        let removed = store.remove_by_id(card)?;
        self.state = WorkflowState::Idle;
        Ok(DeleteOutcome::Removed(removed))
    }

    /// 一覧から位置指定で削除
    pub fn delete_at(
        &mut self,
        store: &mut CardStore,
        position: usize,
        confirmer: &mut dyn Confirmer,
    ) -> Result<DeleteOutcome> {
        if self.state != WorkflowState::Idle {
            return Err(self.invalid("削除"));
        }
        store.get_at(position)?;
        if !confirmer.confirm(&ConfirmPrompt::delete_card())? {
            return Ok(DeleteOutcome::Cancelled);
        }
        Ok(DeleteOutcome::Removed(store.remove(position)?))
    }

    /// 詳細を閉じる（下書きは破棄）
    pub fn close(&mut self) {
        if matches!(
            self.state,
            WorkflowState::Recognizing { .. } | WorkflowState::Annotating { .. }
        ) {
            self.state = WorkflowState::Idle;
        }
    }
}
