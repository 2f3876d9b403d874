//! 正規表現ベースのトークナイザ
//!
//! 順序付きのパターンテーブルを1つの結合選択肢パターンへコンパイルし、
//! 入力文字列を左から右へ走査してトークン列を生成する。

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{ConfigError, TokenizeError};
use crate::token::{Position, Token};

/// トークン型識別子 → パターンフラグメントの順序付きテーブル
///
/// 挿入順がそのままマッチの優先順位になる。
pub type PatternTable<T> = IndexMap<T, String>;

/// 正規表現ベースのトークナイザ
///
/// 構築時にテーブル全体を `\A(?:(?P<t0>f0)|(?P<t1>f1)|…)` という
/// 1つのパターンへコンパイルする。regexクレートの選択肢は
/// 最左優先（最長一致ではない）なので、同じ位置で複数のフラグメントが
/// マッチしうる場合はテーブル上で先に登録されたものが勝つ。
/// したがって、より特殊なフラグメントはより一般的なフラグメントより
/// 先に登録しなければならない。
#[derive(Debug, Clone)]
pub struct Tokenizer<T> {
    regex: Regex,
    types: Vec<Option<T>>,
}

impl<T: Clone + Eq + Hash + fmt::Debug> Tokenizer<T> {
    /// 名前付きパターンテーブルからトークナイザを構築
    ///
    /// テーブルが空、フラグメントがコンパイルできない、識別子が重複、
    /// フラグメントが独自のキャプチャグループを含む、のいずれかの場合は
    /// `ConfigError` を返す。
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (T, S)>,
        S: AsRef<str>,
    {
        let mut table: PatternTable<T> = PatternTable::new();
        for (ty, fragment) in patterns {
            if table.insert(ty.clone(), fragment.as_ref().to_owned()).is_some() {
                return Err(ConfigError::DuplicateType {
                    identifier: format!("{ty:?}"),
                });
            }
        }
        let (types, fragments): (Vec<_>, Vec<_>) = table
            .into_iter()
            .map(|(ty, fragment)| (Some(ty), fragment))
            .unzip();
        Self::compile(types, fragments)
    }
}

impl<T: Clone> Tokenizer<T> {
    /// 無名フラグメントのリストからトークナイザを構築
    ///
    /// 生成されるトークンの `ty` は常に `None` になる。
    pub fn from_fragments<I, S>(fragments: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments: Vec<String> = fragments
            .into_iter()
            .map(|fragment| fragment.as_ref().to_owned())
            .collect();
        let types = vec![None; fragments.len()];
        Self::compile(types, fragments)
    }

    fn compile(types: Vec<Option<T>>, fragments: Vec<String>) -> Result<Self, ConfigError> {
        if fragments.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        for fragment in &fragments {
            let compiled = Regex::new(&format!("(?:{fragment})")).map_err(|e| {
                ConfigError::InvalidFragment {
                    fragment: fragment.clone(),
                    message: e.to_string(),
                }
            })?;
            // フラグメント内に独自のキャプチャグループがあると
            // 結合パターンのグループ番号と型の対応が崩れる
            if compiled.captures_len() > 1 {
                return Err(ConfigError::CapturingGroup {
                    fragment: fragment.clone(),
                });
            }
        }

        let alternation = fragments
            .iter()
            .enumerate()
            .map(|(i, fragment)| format!("(?P<t{i}>{fragment})"))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"\A(?:{alternation})");
        let regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidFragment {
            fragment: pattern.clone(),
            message: e.to_string(),
        })?;

        log::debug!("compiled tokenizer with {} patterns", fragments.len());
        Ok(Self { regex, types })
    }

    /// 入力文字列全体をトークン列へ変換
    ///
    /// 走査カーソルをオフセット0から始め、カーソル位置に固定して
    /// マッチを繰り返す。どのフラグメントにもマッチしない位置に
    /// 到達すると `TokenizeError` を返し、途中結果は破棄される。
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token<T>>, TokenizeError> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < input.len() {
            match self.match_at(input, offset) {
                // 長さ0のマッチは前進できないため未認識扱い
                Some((value, ty)) if !value.is_empty() => {
                    log::trace!("token {value:?} at offset {offset}");
                    let len = value.len();
                    tokens.push(Token { value, offset, ty });
                    offset += len;
                }
                _ => {
                    let err = self.failure(input, offset);
                    log::debug!("tokenize failed: {err}");
                    return Err(err);
                }
            }
        }

        Ok(tokens)
    }

    /// 現在の走査位置にアンカーしてマッチを試みる
    ///
    /// パターンは `\A` でアンカーされているため、`offset` ちょうどから
    /// 始まるマッチだけが成立する。マッチに参加する生成グループは
    /// 常に1つだけなので、最初に埋まっているグループが勝者になる。
    fn match_at(&self, input: &str, offset: usize) -> Option<(String, Option<T>)> {
        let caps = self.regex.captures(&input[offset..])?;
        self.types.iter().enumerate().find_map(|(i, ty)| {
            caps.get(i + 1).map(|m| (m.as_str().to_owned(), ty.clone()))
        })
    }

    /// 失敗位置の行・列を、消費済みのプレフィックスを
    /// 歩き直して計算する
    fn failure(&self, input: &str, offset: usize) -> TokenizeError {
        let mut position = Position::new();
        for ch in input[..offset].chars() {
            position.advance(ch);
        }
        let character = input[offset..].chars().next().unwrap_or('\0');
        TokenizeError {
            character,
            offset,
            line: position.line,
            column: position.column,
        }
    }
}
