//! トークン定義

use serde::Serialize;
use std::fmt;

/// トークン化の結果として得られる1つのトークン
///
/// `value` は入力から切り出された部分文字列そのもの、`offset` は
/// 入力先頭からのバイトオフセット。`ty` はこのトークンを生成した
/// パターンの識別子で、無名フラグメントから構築したトークナイザの
/// 場合は常に `None` になる。
///
/// トークン列は隙間も重なりもなく入力全体を覆う。`value` を順に
/// 連結すると元の入力が完全に復元される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<T> {
    pub value: String,
    pub offset: usize,
    pub ty: Option<T>,
}

impl<T> Token<T> {
    pub fn new(value: impl Into<String>, offset: usize, ty: Option<T>) -> Self {
        Self {
            value: value.into(),
            offset,
            ty,
        }
    }

    /// トークンの終端オフセット（排他的）
    pub fn end(&self) -> usize {
        self.offset + self.value.len()
    }
}

impl<T: fmt::Debug> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{:?}({:?})", ty, self.value),
            None => write!(f, "{:?}", self.value),
        }
    }
}

/// エラー報告用の位置情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
