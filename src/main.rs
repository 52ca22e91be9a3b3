use clap::Parser;
use meishi_common::{extract, format_with, CardId, CardImage};
use meishi_kanri::{cli, config, error, interactive, recognizer};
use cli::{Cli, Commands};
use config::Config;
use error::{MeishiError, Result};
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MeishiError::Config(e.to_string()))?;

    let config = Config::load()?;
    debug!(?config, "設定を読み込み");

    match cli.command {
        Commands::Session { mode, gallery } => {
            let mut config = config;
            if let Some(folder) = gallery {
                if !folder.is_dir() {
                    return Err(MeishiError::FolderNotFound(folder.display().to_string()));
                }
                config.gallery_dir = Some(folder);
            }
            let mode = mode.unwrap_or(config.default_mode);
            interactive::run(&config, mode).await?;
        }

        Commands::Extract { input, json, labels } => {
            let text = match input {
                Some(path) => {
                    if !path.exists() {
                        return Err(MeishiError::FileNotFound(path.display().to_string()));
                    }
                    std::fs::read_to_string(&path)?
                }
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let fields = extract(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                let labels = labels.unwrap_or(config.labels).labels();
                println!("{}", format_with(&fields, &labels));
            }
        }

        Commands::Recognize { image, raw, languages } => {
            if !image.exists() {
                return Err(MeishiError::FileNotFound(image.display().to_string()));
            }
            let languages = match languages {
                Some(list) => recognizer::parse_languages(&list)?,
                None => config.languages.clone(),
            };

            let bytes = std::fs::read(&image)?;
            let label = image
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let card_image = CardImage::new(bytes, label).with_source(&image);

            let ocr = Arc::new(recognizer::TesseractCli::new(config.ocr_command.clone(), languages));
            let outcome = recognizer::spawn_recognition(ocr, CardId::new(), card_image)
                .wait()
                .await;
            let text = outcome.result?;

            if raw {
                print!("{}", text);
            } else {
                println!("{}", format_with(&extract(&text), &config.labels.labels()));
            }
        }

        Commands::Config {
            show,
            set_languages,
            set_ocr_command,
            set_camera_command,
            set_gallery,
            set_mode,
            set_labels,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(list) = set_languages {
                config.languages = recognizer::parse_languages(&list)?;
                changed = true;
            }
            if let Some(command) = set_ocr_command {
                config.ocr_command = command;
                changed = true;
            }
            if let Some(command) = set_camera_command {
                config.camera_command = Some(command);
                changed = true;
            }
            if let Some(folder) = set_gallery {
                config.gallery_dir = Some(folder);
                changed = true;
            }
            if let Some(mode) = set_mode {
                config.default_mode = mode;
                changed = true;
            }
            if let Some(labels) = set_labels {
                config.labels = labels;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let languages = config
                    .languages
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("設定:");
                println!("  認識言語: {}", languages);
                println!("  OCRコマンド: {}", config.ocr_command);
                println!("  撮影コマンド: {}", config.camera_command.as_deref().unwrap_or("未設定"));
                println!("  ギャラリー: {}", config.gallery_dir().display());
                println!("  撮影モード: {}", config.default_mode);
                println!("  ラベル: {:?}", config.labels);
            }
        }
    }

    Ok(())
}
