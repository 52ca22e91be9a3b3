//! Meishi Kanri Common Library
//!
//! 名刺ストア・項目抽出・撮影ワークフローなど、UIに依存しない部分

pub mod types;
pub mod error;
pub mod store;
pub mod extractor;
pub mod confirm;
pub mod workflow;

pub use types::{CardId, CardImage, CardSide, CaptureMode, CaptureState, RawImage};
pub use error::{Error, Result};
pub use store::{Card, CardStore};
pub use extractor::{extract, format, format_with, AnnotationLabels, ExtractedFields};
pub use confirm::{AlwaysConfirm, ConfirmPrompt, Confirmer, NeverConfirm};
pub use workflow::{
    AppendedCard, DeleteOutcome, RecognitionApplied, SavedAnnotation, Workflow, WorkflowState,
};
