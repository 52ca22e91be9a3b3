//! 対話式の名刺管理
//!
//! メニュー: 撮影 / モード切替 / 詳細（注釈編集・保存・削除）/ 一覧から削除 / 終了

use crate::capture::{CommandCamera, GalleryPicker, InteractiveCropper, ModeSwitch};
use crate::config::Config;
use crate::confirm::TerminalConfirmer;
use crate::error::Result;
use crate::recognizer::TesseractCli;
use crate::session::Session;
use dialoguer::{Editor, Select};
use indicatif::ProgressBar;
use meishi_common::{CaptureMode, DeleteOutcome};
use std::sync::Arc;
use std::time::Duration;

enum MenuAction {
    Capture,
    SwitchMode,
    NextCard,
    OpenDetail,
    Delete,
    Quit,
}

enum DetailAction {
    Edit,
    Save,
    Delete,
    Back,
}

/// 対話セッションを実行
pub async fn run(config: &Config, mode: CaptureMode) -> Result<()> {
    let recognizer = Arc::new(TesseractCli::new(
        config.ocr_command.clone(),
        config.languages.clone(),
    ));
    let mut session = Session::new(recognizer, mode, config.labels.labels());
    let mut source = ModeSwitch {
        camera: CommandCamera::new(
            config.camera_command.clone(),
            std::env::temp_dir().join("meishi-kanri"),
        ),
        gallery: GalleryPicker::new(config.gallery_dir()),
    };
    let mut cropper = InteractiveCropper;
    let mut confirmer = TerminalConfirmer;
    let mut mode = mode;

    println!("📇 名刺管理\n");

    loop {
        print_cards(&session);

        match prompt_menu(&session, mode)? {
            MenuAction::Capture => match session.capture(mode, &mut source, &mut cropper) {
                Ok(Some(appended)) => println!(
                    "✔ 名刺を追加しました: #{} ({}面)\n",
                    appended.position + 1,
                    appended.side.label()
                ),
                Ok(None) => println!("キャンセルしました\n"),
                Err(e) => println!("⚠ {}\n", e),
            },
            MenuAction::SwitchMode => {
                mode = match mode {
                    CaptureMode::Camera => CaptureMode::Gallery,
                    CaptureMode::Gallery => CaptureMode::Camera,
                };
                println!("撮影モード: {}\n", mode);
            }
            MenuAction::NextCard => {
                session.reset_pair();
                println!("次の名刺は表面から撮影します\n");
            }
            MenuAction::OpenDetail => {
                if let Some(position) = pick_card(&session, "詳細を開く名刺")? {
                    if let Err(e) = detail(&mut session, position, &mut confirmer).await {
                        session.close_detail();
                        println!("⚠ {}\n", e);
                    }
                }
            }
            MenuAction::Delete => {
                if let Some(position) = pick_card(&session, "削除する名刺")? {
                    match session.delete_at(position, &mut confirmer) {
                        Ok(DeleteOutcome::Removed(_)) => println!("✔ 削除しました\n"),
                        Ok(DeleteOutcome::Cancelled) => println!("キャンセルしました\n"),
                        Err(e) => println!("⚠ {}\n", e),
                    }
                }
            }
            MenuAction::Quit => break,
        }
    }

    println!("終了します（名刺は保存されません）");
    Ok(())
}

fn print_cards(session: &Session) {
    let cards = session.cards();
    if cards.is_empty() {
        println!("名刺はまだありません\n");
        return;
    }

    println!("名刺一覧: {}枚", cards.len());
    for (i, card) in cards.iter().enumerate() {
        let summary = card.annotation.lines().next().unwrap_or("（注釈なし）");
        println!("  #{} [{}] {} - {}", i + 1, card.side.label(), card.image.label(), summary);
    }
    println!();
}

fn prompt_menu(session: &Session, mode: CaptureMode) -> Result<MenuAction> {
    let items = [
        format!("名刺を撮影（{}面）", session.next_side().label()),
        format!("撮影モード切替（現在: {}）", mode),
        "次の名刺へ（表面から）".to_string(),
        "詳細を開く".to_string(),
        "削除".to_string(),
        "終了".to_string(),
    ];

    let choice = Select::new()
        .with_prompt("操作を選択")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => MenuAction::Capture,
        1 => MenuAction::SwitchMode,
        2 => MenuAction::NextCard,
        3 => MenuAction::OpenDetail,
        4 => MenuAction::Delete,
        _ => MenuAction::Quit,
    })
}

fn pick_card(session: &Session, prompt: &str) -> Result<Option<usize>> {
    let cards = session.cards();
    if cards.is_empty() {
        println!("名刺がありません\n");
        return Ok(None);
    }

    let items: Vec<String> = cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("#{} {}", i + 1, c.image.label()))
        .collect();

    Ok(Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?)
}

/// 詳細画面: 文字認識 → 注釈の編集・保存・削除
async fn detail(session: &mut Session, position: usize, confirmer: &mut TerminalConfirmer) -> Result<()> {
    let task = session.begin_detail(position)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("文字認識中...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcome = task.wait().await;
    spinner.finish_and_clear();

    if outcome.result.is_err() {
        println!("⚠ 文字を認識できませんでした。注釈を手入力してください");
    }
    session.apply_recognition(outcome);

    loop {
        let draft = session.draft().unwrap_or_default().to_string();
        println!("--- 注釈 ---");
        println!("{}", if draft.is_empty() { "（空）" } else { draft.as_str() });
        println!("------------");

        match prompt_detail()? {
            DetailAction::Edit => {
                if let Some(text) = Editor::new().edit(&draft)? {
                    session.edit_draft(text.trim_end())?;
                }
            }
            DetailAction::Save => {
                let saved = session.save()?;
                println!("✔ 注釈を保存しました: #{}\n", saved.position + 1);
                return Ok(());
            }
            DetailAction::Delete => match session.delete(confirmer)? {
                DeleteOutcome::Removed(_) => {
                    println!("✔ 削除しました\n");
                    return Ok(());
                }
                DeleteOutcome::Cancelled => continue,
            },
            DetailAction::Back => {
                session.close_detail();
                println!();
                return Ok(());
            }
        }
    }
}

fn prompt_detail() -> Result<DetailAction> {
    let items = ["注釈を編集", "保存", "削除", "戻る"];
    let choice = Select::new()
        .with_prompt("詳細")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => DetailAction::Edit,
        1 => DetailAction::Save,
        2 => DetailAction::Delete,
        _ => DetailAction::Back,
    })
}
