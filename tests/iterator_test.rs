//! トークンイテレータテスト
//!
//! カーソルナビゲーション、フィルタ、無視型の透過スキップ、
//! バックトラッキングのエスケープハッチを検証するテストスイート。

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use kizami::{Filter, Token, TokenIterator, Tokenizer};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Tok {
        Word,
        Whitespace,
        Number,
        Punct,
    }

    /// 標準テーブルで入力をトークン化してイテレータを作る
    /// ヘルパー関数
    fn iterate(input: &str) -> TokenIterator<Tok> {
        let tokenizer = Tokenizer::new(vec![
            (Tok::Number, r"\d+"),
            (Tok::Whitespace, r"\s+"),
            (Tok::Word, r"[a-zA-Z_][a-zA-Z0-9_]*"),
            (Tok::Punct, r"[^\s\w]"),
        ])
        .expect("valid table");
        TokenIterator::new(tokenizer.tokenize(input).expect("tokenizable input"))
    }

    /// イテレータを先頭から走り切って値の列を記録するヘルパー関数
    fn drain_values(it: &mut TokenIterator<Tok>) -> Vec<String> {
        let mut values = Vec::new();
        while let Some(value) = it.next_value(&[]) {
            values.push(value.to_owned());
        }
        values
    }

    #[test]
    fn test_lookahead_independence() {
        // 基準シナリオ: [Word "say", Whitespace " ", Number "123"]
        let mut it = iterate("say 123");

        assert!(!it.is_prev(&[]));
        assert!(it.is_next(&[]));

        let skipped = it.next_until(&[Filter::Type(Tok::Number)]);
        assert_eq!(skipped.len(), 2);
        assert_eq!(it.current_value(), Some(" "));
        assert!(it.is_prev(&[Filter::Type(Tok::Word)]));
        assert!(it.is_next(&[Filter::Type(Tok::Number)]));

        let rest = it.next_all(&[]);
        assert_eq!(rest, vec![Token::new("123", 4, Some(Tok::Number))]);
        assert!(!it.is_next(&[]));
    }

    #[test]
    fn test_is_next_is_one_token_lookahead() {
        // is_nextは「どこか先に存在するか」ではなく、直後の
        // 非無視トークン1つだけを見る
        let it = iterate("say 123");
        assert!(it.is_next(&[Filter::Type(Tok::Word)]));
        assert!(!it.is_next(&[Filter::Type(Tok::Number)]));
    }

    #[test]
    fn test_ignored_type_transparency() {
        let mut it = iterate("say 123");
        it.ignore(Tok::Whitespace);

        // 空白で止まることなくWordへ進み、positionは実添字を指す
        let token = it.next_token(&[]).cloned();
        assert_eq!(token, Some(Token::new("say", 0, Some(Tok::Word))));
        assert_eq!(it.position, 0);

        // 真の次の非無視トークンはWordなので、Number要求は
        // positionを動かさずに失敗する
        it.reset();
        assert_eq!(it.next_token(&[Filter::Type(Tok::Number)]), None);
        assert_eq!(it.position, -1);
    }

    #[test]
    fn test_ignored_tokens_not_collected() {
        let mut it = iterate("say 123 end");
        it.ignore(Tok::Whitespace);

        let skipped = it.next_until(&[Filter::Type(Tok::Word), Filter::value("end")]);
        // 直後のWordが既に一致するため何も収集されない
        assert_eq!(skipped, vec![]);
        assert_eq!(it.position, -1);

        let all = it.next_all(&[]);
        let values: Vec<_> = all.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["say", "123", "end"]);
    }

    #[test]
    fn test_value_filters() {
        let mut it = iterate("key = value");
        it.ignore(Tok::Whitespace);

        assert_eq!(it.next_value(&[Filter::value("key")]), Some("key"));
        assert!(it.is_next(&[Filter::value("=")]));
        // 型フィルタと値フィルタの混在はORで評価される
        assert!(it.is_next(&[Filter::Type(Tok::Number), Filter::value("=")]));
        assert_eq!(it.next_value(&[Filter::value("=")]), Some("="));
        assert_eq!(it.next_value(&[]), Some("value"));
    }

    #[test]
    fn test_next_until_consumes_to_end_without_match() {
        let mut it = iterate("a b c");
        let skipped = it.next_until(&[Filter::value(";")]);

        let values: Vec<_> = skipped.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["a", " ", "b", " ", "c"]);
        assert_eq!(it.position, 4);
        assert!(!it.is_next(&[]));
    }

    #[test]
    fn test_join_until_and_join_all() {
        let mut it = iterate("say 123; done");
        assert_eq!(it.join_until(&[Filter::value(";")]), "say 123");
        assert_eq!(it.current_value(), Some("123"));

        it.reset();
        assert_eq!(it.join_all(&[]), "say 123; done");
    }

    #[test]
    fn test_next_all_with_filter_stops_at_nonmatching() {
        let mut it = iterate("1 2 3 stop");
        it.ignore(Tok::Whitespace);

        let numbers = it.next_all(&[Filter::Type(Tok::Number)]);
        let values: Vec<_> = numbers.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["1", "2", "3"]);
        // カーソルは最後に一致したトークンの位置に残る
        assert_eq!(it.current_value(), Some("3"));
        assert!(it.is_next(&[Filter::value("stop")]));
    }

    #[test]
    fn test_absence_is_idempotent() {
        let mut it = iterate("say 123");
        it.next_token(&[]);
        let saved = it.position;

        for _ in 0..3 {
            assert_eq!(it.next_token(&[Filter::value("never")]), None);
            assert_eq!(it.position, saved);
        }
    }

    #[test]
    fn test_reset_reproduces_traversal() {
        let mut it = iterate("one 2 three; 4");
        let first = drain_values(&mut it);
        it.reset();
        let second = drain_values(&mut it);
        assert_eq!(first, second);
    }

    #[test]
    fn test_position_save_restore_backtracking() {
        // 投機的に先読みして失敗したら巻き戻す、手書きパーサの常套手段
        let mut it = iterate("name = 42");
        it.ignore(Tok::Whitespace);

        it.next_token(&[Filter::Type(Tok::Word)]);
        let checkpoint = it.position;

        // 「= 数値」の並びを試す
        assert!(it.next_token(&[Filter::value("=")]).is_some());
        assert_eq!(it.next_token(&[Filter::Type(Tok::Word)]), None);

        it.position = checkpoint;
        assert_eq!(it.current_value(), Some("name"));
        assert_eq!(it.next_value(&[Filter::value("=")]), Some("="));
        assert_eq!(it.next_value(&[Filter::Type(Tok::Number)]), Some("42"));
    }

    #[test]
    fn test_live_ignored_set_mutation() {
        // 無視集合は生存期間中いつでも変更でき、即座に反映される
        let mut it = iterate("a 1 b");
        it.next_token(&[]);
        assert_eq!(it.current_value(), Some("a"));

        it.ignore(Tok::Whitespace);
        assert!(it.is_next(&[Filter::Type(Tok::Number)]));

        it.unignore(&Tok::Whitespace);
        assert!(it.is_next(&[Filter::Type(Tok::Whitespace)]));
        assert!(it.ignored_types().is_empty());
    }

    #[test]
    fn test_current_token_raw_position() {
        // positionを直接設定した場合、無視型であっても生の添字で引ける
        let mut it = iterate("say 123");
        it.ignore(Tok::Whitespace);

        it.position = 1;
        assert_eq!(it.current_value(), Some(" "));
        assert!(it.is_current(&[Filter::Type(Tok::Whitespace)]));

        it.position = 99;
        assert_eq!(it.current_token(), None);
        assert!(!it.is_current(&[]));
    }

    #[test]
    fn test_extreme_position_values() {
        // positionはisizeの端の値を含めどんな整数でも設定でき、
        // どの操作もパニックせずに不在を返す
        let mut it = iterate("say 123");

        it.position = isize::MIN;
        assert_eq!(it.current_token(), None);
        assert!(!it.is_prev(&[]));
        assert!(it.is_next(&[Filter::Type(Tok::Word)]));
        assert_eq!(it.next_value(&[]), Some("say"));
        assert_eq!(it.position, 0);

        it.position = isize::MAX;
        assert_eq!(it.current_token(), None);
        assert_eq!(it.next_token(&[]), None);
        assert!(it.is_prev(&[Filter::Type(Tok::Number)]));
    }

    #[test]
    fn test_empty_sequence() {
        let mut it = TokenIterator::<Tok>::new(vec![]);
        assert!(it.is_empty());
        assert!(!it.is_next(&[]));
        assert!(!it.is_prev(&[]));
        assert_eq!(it.next_token(&[]), None);
        assert_eq!(it.next_until(&[]), vec![]);
    }

    #[test]
    fn test_iterator_over_handmade_sequence() {
        // トークナイザを介さず直接組んだ列も受け付ける
        let mut it = TokenIterator::new(vec![
            Token::new("x", 0, Some(Tok::Word)),
            Token::new("7", 1, None),
        ]);

        assert_eq!(it.next_value(&[]), Some("x"));
        // ty が None のトークンは型フィルタには一致しない
        assert_eq!(it.next_token(&[Filter::Type(Tok::Number)]), None);
        assert_eq!(it.next_value(&[Filter::value("7")]), Some("7"));
    }
}
