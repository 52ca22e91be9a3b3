//! 名刺管理セッション
//!
//! 名刺ストアとワークフローを持ち、撮影・トリミング・文字認識・
//! 確認の各処理を受け取って状態を進める。名刺はセッション中のみ保持する。

use crate::capture::{CaptureSource, Cropper};
use crate::error::Result;
use crate::recognizer::{spawn_recognition, RecognitionOutcome, RecognitionTask, Recognizer};
use meishi_common::{
    AnnotationLabels, AppendedCard, CaptureMode, Card, CardSide, CardStore, Confirmer, DeleteOutcome,
    RecognitionApplied, SavedAnnotation, Workflow, WorkflowState,
};
use std::sync::Arc;
use tracing::{info, warn};

pub struct Session {
    store: CardStore,
    workflow: Workflow,
    recognizer: Arc<dyn Recognizer>,
    labels: AnnotationLabels,
}

impl Session {
    pub fn new(recognizer: Arc<dyn Recognizer>, mode: CaptureMode, labels: AnnotationLabels) -> Self {
        Self {
            store: CardStore::new(),
            workflow: Workflow::new(mode),
            recognizer,
            labels,
        }
    }

    /// 表示用の一覧
    pub fn cards(&self) -> Vec<Card> {
        self.store.list()
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    pub fn pending_mode(&self) -> CaptureMode {
        self.workflow.capture_state().pending_mode
    }

    pub fn next_side(&self) -> CardSide {
        self.workflow.capture_state().next_side()
    }

    /// 裏面を撮らずに次の名刺へ
    pub fn reset_pair(&mut self) {
        self.workflow.capture_state_mut().reset_pair();
    }

    /// 撮影してトリミングし、名刺を追加する
    ///
    /// キャンセル時は `Ok(None)`。撮影・トリミングが失敗しても状態は待機に戻る。
    pub fn capture(
        &mut self,
        mode: CaptureMode,
        source: &mut dyn CaptureSource,
        cropper: &mut dyn Cropper,
    ) -> Result<Option<AppendedCard>> {
        self.workflow.request_capture(mode)?;

        let raw = match source.capture(mode) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.workflow.cancel_capture()?;
                info!(%mode, "撮影キャンセル");
                return Ok(None);
            }
            Err(e) => {
                self.workflow.cancel_capture()?;
                return Err(e);
            }
        };
        self.workflow.image_acquired()?;

        let image = match cropper.crop(raw) {
            Ok(Some(image)) => image,
            Ok(None) => {
                self.workflow.cancel_crop()?;
                info!("トリミングキャンセル");
                return Ok(None);
            }
            Err(e) => {
                self.workflow.cancel_crop()?;
                return Err(e);
            }
        };

        let appended = self.workflow.confirm_crop(&mut self.store, image)?;
        info!(card = %appended.id, position = appended.position, side = ?appended.side, "名刺を追加");
        Ok(Some(appended))
    }

    /// 詳細を開いて文字認識を開始する
    pub fn begin_detail(&mut self, position: usize) -> Result<RecognitionTask> {
        let card = self.workflow.open_card(&self.store, position)?;
        let image = self.store.get_at(position)?.image.clone();
        Ok(spawn_recognition(Arc::clone(&self.recognizer), card, image))
    }

    /// 認識結果を反映する（失敗はログのみで手入力へ）
    pub fn apply_recognition(&mut self, outcome: RecognitionOutcome) -> RecognitionApplied {
        let applied = match outcome.result {
            Ok(text) => self
                .workflow
                .text_recognized(&self.store, outcome.card, &text, &self.labels),
            Err(e) => {
                warn!(card = %outcome.card, "文字認識に失敗: {}", e);
                self.workflow.recognition_failed(&self.store, outcome.card)
            }
        };
        if applied == RecognitionApplied::Ignored {
            info!(card = %outcome.card, "閉じた詳細への認識結果を破棄");
        }
        applied
    }

    /// 詳細を開き、認識結果を下書きに入れる
    pub async fn open_detail(&mut self, position: usize) -> Result<RecognitionApplied> {
        let task = self.begin_detail(position)?;
        let outcome = task.wait().await;
        Ok(self.apply_recognition(outcome))
    }

    pub fn draft(&self) -> Option<&str> {
        self.workflow.draft()
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) -> Result<()> {
        Ok(self.workflow.edit_draft(text)?)
    }

    pub fn save(&mut self) -> Result<SavedAnnotation> {
        let saved = self.workflow.save(&mut self.store)?;
        info!(card = %saved.id, position = saved.position, "注釈を保存");
        Ok(saved)
    }

    /// 詳細表示中の名刺を削除（確認あり）
    pub fn delete(&mut self, confirmer: &mut dyn Confirmer) -> Result<DeleteOutcome> {
        let outcome = self.workflow.delete(&mut self.store, confirmer)?;
        if let DeleteOutcome::Removed(card) = &outcome {
            info!(card = %card.id, "名刺を削除");
        }
        Ok(outcome)
    }

    /// 一覧から削除（確認あり）
    pub fn delete_at(&mut self, position: usize, confirmer: &mut dyn Confirmer) -> Result<DeleteOutcome> {
        let outcome = self.workflow.delete_at(&mut self.store, position, confirmer)?;
        if let DeleteOutcome::Removed(card) = &outcome {
            info!(card = %card.id, position, "名刺を削除");
        }
        Ok(outcome)
    }

    pub fn close_detail(&mut self) {
        self.workflow.close();
    }
}
