use crate::config::LabelStyle;
use clap::{Parser, Subcommand};
use meishi_common::CaptureMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meishi")]
#[command(about = "名刺撮影・トリミング・OCR注釈ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式で名刺を撮影・注釈する
    Session {
        /// 撮影モード (camera/gallery)
        #[arg(short, long)]
        mode: Option<CaptureMode>,

        /// ギャラリーとして使うフォルダ
        #[arg(short, long)]
        gallery: Option<PathBuf>,
    },

    /// OCRテキストから名刺項目を抽出
    Extract {
        /// テキストファイル（省略時は標準入力）
        input: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// ラベル言語 (ja/en)
        #[arg(short, long)]
        labels: Option<LabelStyle>,
    },

    /// 画像を文字認識して注釈を出力
    Recognize {
        /// 名刺画像
        #[arg(required = true)]
        image: PathBuf,

        /// 認識結果をそのまま出力
        #[arg(long)]
        raw: bool,

        /// 認識言語（カンマ区切り: ja,en）
        #[arg(long)]
        languages: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 認識言語（カンマ区切り: ja,en）
        #[arg(long)]
        set_languages: Option<String>,

        /// OCRコマンド
        #[arg(long)]
        set_ocr_command: Option<String>,

        /// 撮影コマンド（{output} が保存先に置換される）
        #[arg(long)]
        set_camera_command: Option<String>,

        /// ギャラリーフォルダ
        #[arg(long)]
        set_gallery: Option<PathBuf>,

        /// 既定の撮影モード (camera/gallery)
        #[arg(long)]
        set_mode: Option<CaptureMode>,

        /// ラベル言語 (ja/en)
        #[arg(long)]
        set_labels: Option<LabelStyle>,
    },
}
