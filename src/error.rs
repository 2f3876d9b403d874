//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、kizami全体で使用される統一的なエラー型と
//! エラー報告システムを提供します。

use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// kizamiの統一エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KizamiError {
    /// パターンテーブルの構成エラー
    #[error("パターン構成エラー")]
    Config(#[from] ConfigError),

    /// トークン化エラー
    #[error("トークン化エラー")]
    Tokenize(#[from] TokenizeError),
}

/// パターンテーブル構成エラーの詳細
///
/// トークナイザの構築時に検出される。部分的に構築された
/// トークナイザが返ることはない。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("パターンテーブルが空です")]
    EmptyTable,

    #[error("不正なパターンフラグメント '{fragment}': {message}")]
    InvalidFragment { fragment: String, message: String },

    #[error("フラグメント '{fragment}' にキャプチャグループが含まれています")]
    CapturingGroup { fragment: String },

    #[error("トークン型 {identifier} は既に登録されています")]
    DuplicateType { identifier: String },
}

/// トークン化エラーの詳細
///
/// どのフラグメントにもマッチしなかった位置を1始まりの行・列で保持する。
/// `offset` は入力先頭からのバイトオフセット。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("認識できない文字 '{character}' (行 {line}, 列 {column})")]
pub struct TokenizeError {
    pub character: char,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl KizamiError {
    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        match self {
            KizamiError::Config(e) => Diagnostic::error().with_message(e.to_string()),
            KizamiError::Tokenize(e) => e.to_diagnostic(file_id),
        }
    }
}

impl TokenizeError {
    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let end = self.offset + self.character.len_utf8();
        Diagnostic::error()
            .with_message(format!("認識できない文字: '{}'", self.character))
            .with_labels(vec![Label::primary(file_id, self.offset..end)
                .with_message(format!("行 {}, 列 {}", self.line, self.column))])
    }
}

/// Result型のエイリアス
pub type KizamiResult<T> = Result<T, KizamiError>;
