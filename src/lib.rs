//! 名刺管理 (meishi-kanri)
//!
//! 名刺を撮影・トリミングし、文字認識の結果から注釈を作る。

pub mod capture;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod interactive;
pub mod recognizer;
pub mod scanner;
pub mod session;
