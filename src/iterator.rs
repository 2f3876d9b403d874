//! トークン列上のカーソルベースのナビゲーション
//!
//! `TokenIterator` は生成済みのトークン列に対する読み取り専用のビューで、
//! 先読み・後読み・一括スキップ・一括収集のプリミティブを提供する。
//! すべての操作は失敗しない。見つからなかった場合は `None` や空の列を
//! 返すだけで、例外的なエラーにはならない。文法の省略可能な構文を
//! 探るときに「見つからない」ことは正常な結果だからである。

use std::collections::HashSet;
use std::hash::Hash;

use crate::token::Token;

/// ナビゲーション操作に渡すフィルタ
///
/// `Type` はトークン型識別子との一致、`Value` はトークン値との
/// 一致を表す。複数指定した場合はいずれか1つに一致すればよい(OR)。
/// 空のフィルタ列はすべてのトークンに一致する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<T> {
    Type(T),
    Value(String),
}

impl<T> Filter<T> {
    /// 値フィルタを作るショートハンド
    pub fn value(value: impl Into<String>) -> Self {
        Filter::Value(value.into())
    }
}

/// トークン列上のステートフルなカーソル
///
/// `position` は公開フィールドであり、投機的なパースのために自由に
/// 保存・復元してよい。`-1` は「先頭の前」を意味し、範囲外の値を
/// 設定しても以降の操作はその生の添字に対して一貫して振る舞う。
///
/// 無視型の集合に登録された型のトークンは、すべてのナビゲーション
/// 操作から透過的にスキップされる。集合はイテレータの生存期間中
/// いつでも変更でき、変更は以降のすべての呼び出しに即座に反映される。
#[derive(Debug, Clone)]
pub struct TokenIterator<T> {
    tokens: Vec<Token<T>>,
    /// 現在のカーソル位置。`-1` で先頭の前を表す
    pub position: isize,
    ignored: HashSet<T>,
}

impl<T: Clone + Eq + Hash> TokenIterator<T> {
    pub fn new(tokens: Vec<Token<T>>) -> Self {
        Self {
            tokens,
            position: -1,
            ignored: HashSet::new(),
        }
    }

    /// カーソルを先頭の前(-1)へ戻す。無視型の集合は変更しない
    pub fn reset(&mut self) {
        self.position = -1;
    }

    /// 指定した型を無視対象に加える
    pub fn ignore(&mut self, ty: T) {
        self.ignored.insert(ty);
    }

    /// 指定した型を無視対象から外す
    pub fn unignore(&mut self, ty: &T) {
        self.ignored.remove(ty);
    }

    /// 現在の無視対象の型の集合
    pub fn ignored_types(&self) -> &HashSet<T> {
        &self.ignored
    }

    /// 保持しているトークン列全体
    pub fn tokens(&self) -> &[Token<T>] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// カーソル位置のトークンを取得
    ///
    /// `position` を直接設定した場合のエスケープハッチでもあるため、
    /// 無視型のフィルタは適用せず生の添字で引く。
    pub fn current_token(&self) -> Option<&Token<T>> {
        self.get(self.position)
    }

    /// カーソル位置のトークンの値
    pub fn current_value(&self) -> Option<&str> {
        self.current_token().map(|t| t.value.as_str())
    }

    /// 次の非無視トークンがフィルタに一致すればそこへ進んで返す
    ///
    /// 一致しない場合は `position` を変えずに `None` を返す。
    /// 一致しない非無視トークンを飛び越えて先を探すことはしない。
    pub fn next_token(&mut self, filters: &[Filter<T>]) -> Option<&Token<T>> {
        let index = self.scan_forward(self.position)?;
        if Self::matches(&self.tokens[index], filters) {
            self.position = index as isize;
            Some(&self.tokens[index])
        } else {
            None
        }
    }

    /// `next_token` と同じだが値だけを返す
    pub fn next_value(&mut self, filters: &[Filter<T>]) -> Option<&str> {
        self.next_token(filters).map(|t| t.value.as_str())
    }

    /// フィルタに一致するトークンの直前まで進み、通過したトークンを返す
    ///
    /// 一致するトークン自体は消費しない。どのトークンも一致しない
    /// 場合は末尾まで進み、残りをすべて返す。無視型のトークンは
    /// 返却列に含まれず、カーソルの着地点にもならない。
    pub fn next_until(&mut self, filters: &[Filter<T>]) -> Vec<Token<T>> {
        let mut collected = Vec::new();
        while let Some(index) = self.scan_forward(self.position) {
            if Self::matches(&self.tokens[index], filters) {
                break;
            }
            collected.push(self.tokens[index].clone());
            self.position = index as isize;
        }
        collected
    }

    /// `next_until` と同じだが通過したトークンの値を連結して返す
    pub fn join_until(&mut self, filters: &[Filter<T>]) -> String {
        self.next_until(filters)
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    /// `next_token` を `None` になるまで繰り返し、一致した
    /// トークンをすべて収集する
    pub fn next_all(&mut self, filters: &[Filter<T>]) -> Vec<Token<T>> {
        let mut collected = Vec::new();
        while let Some(token) = self.next_token(filters) {
            collected.push(token.clone());
        }
        collected
    }

    /// `next_all` と同じだが値を連結して返す
    pub fn join_all(&mut self, filters: &[Filter<T>]) -> String {
        self.next_all(filters).into_iter().map(|t| t.value).collect()
    }

    /// カーソル位置のトークンが存在し、かつフィルタに一致するか
    pub fn is_current(&self, filters: &[Filter<T>]) -> bool {
        self.current_token()
            .is_some_and(|token| Self::matches(token, filters))
    }

    /// 1トークンの先読み。カーソルは動かさない
    ///
    /// 次の非無視トークンがフィルタに一致するときだけ true。
    /// 「どこか先に存在する」かどうかの探索ではない。
    pub fn is_next(&self, filters: &[Filter<T>]) -> bool {
        self.scan_forward(self.position)
            .is_some_and(|index| Self::matches(&self.tokens[index], filters))
    }

    /// 1トークンの後読み。カーソルは動かさない
    pub fn is_prev(&self, filters: &[Filter<T>]) -> bool {
        self.scan_backward(self.position)
            .is_some_and(|index| Self::matches(&self.tokens[index], filters))
    }

    /// 生の添字でトークンを引く。範囲外は None
    fn get(&self, index: isize) -> Option<&Token<T>> {
        usize::try_from(index).ok().and_then(|i| self.tokens.get(i))
    }

    /// `from` より後ろで最初の非無視トークンの添字
    fn scan_forward(&self, from: isize) -> Option<usize> {
        let mut index = if from < 0 {
            0
        } else {
            usize::try_from(from).ok()?.checked_add(1)?
        };
        while index < self.tokens.len() {
            if !self.is_ignored(&self.tokens[index]) {
                return Some(index);
            }
            index += 1;
        }
        None
    }

    /// `from` より前で最初の非無視トークンの添字
    fn scan_backward(&self, from: isize) -> Option<usize> {
        let mut index = from.min(self.tokens.len() as isize).checked_sub(1)?;
        while index >= 0 {
            let i = index as usize;
            if !self.is_ignored(&self.tokens[i]) {
                return Some(i);
            }
            index -= 1;
        }
        None
    }

    fn is_ignored(&self, token: &Token<T>) -> bool {
        token
            .ty
            .as_ref()
            .is_some_and(|ty| self.ignored.contains(ty))
    }

    fn matches(token: &Token<T>, filters: &[Filter<T>]) -> bool {
        if filters.is_empty() {
            return true;
        }
        filters.iter().any(|filter| match filter {
            Filter::Type(ty) => token.ty.as_ref() == Some(ty),
            Filter::Value(value) => token.value == *value,
        })
    }
}
