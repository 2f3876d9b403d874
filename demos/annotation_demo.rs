//! Demonstrates tokenizing a doc-comment annotation DSL and walking the
//! token stream with the cursor API.

use kizami::{Filter, TokenIterator, Tokenizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Tok {
    At,
    Ident,
    Number,
    Quoted,
    Punct,
    Whitespace,
    Text,
}

#[derive(Debug)]
struct Annotation {
    name: String,
    args: Vec<(String, Option<String>)>,
}

fn tokenizer() -> Tokenizer<Tok> {
    Tokenizer::new(vec![
        (Tok::At, r"@"),
        (Tok::Ident, r"[a-zA-Z_][a-zA-Z0-9_]*"),
        (Tok::Number, r"\d+(?:\.\d+)?"),
        (Tok::Quoted, r#""(?:[^"\\]|\\.)*""#),
        (Tok::Punct, r"[(),=]"),
        (Tok::Whitespace, r"\s+"),
        (Tok::Text, r"[^\s@()=,]+"),
    ])
    .expect("annotation pattern table")
}

/// Pulls every `@name(key = value, flag)` out of a free-form comment body.
fn parse_annotations(it: &mut TokenIterator<Tok>) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    loop {
        // Skip prose until the next marker.
        it.next_until(&[Filter::Type(Tok::At)]);
        if it.next_token(&[Filter::Type(Tok::At)]).is_none() {
            break;
        }
        let Some(name) = it.next_value(&[Filter::Type(Tok::Ident)]) else {
            continue;
        };
        let mut annotation = Annotation {
            name: name.to_owned(),
            args: Vec::new(),
        };

        if it.next_token(&[Filter::value("(")]).is_some() {
            while let Some(key) = it.next_value(&[Filter::Type(Tok::Ident)]) {
                let key = key.to_owned();
                let value = if it.next_token(&[Filter::value("=")]).is_some() {
                    it.next_value(&[Filter::Type(Tok::Quoted), Filter::Type(Tok::Number)])
                        .map(|v| v.to_owned())
                } else {
                    None
                };
                annotation.args.push((key, value));
                if it.next_token(&[Filter::value(",")]).is_none() {
                    break;
                }
            }
            it.next_token(&[Filter::value(")")]);
        }

        annotations.push(annotation);
    }

    annotations
}

fn main() {
    let examples = vec![
        (
            "Single marker",
            "Checks the cache first. @deprecated",
        ),
        (
            "Arguments",
            r#"@route(path = "/users", method = "GET")"#,
        ),
        (
            "Mixed prose and markers",
            r#"Stores one record. @param(name = "id") @retry(count = 3, backoff)"#,
        ),
    ];

    let tokenizer = tokenizer();

    for (name, body) in examples {
        println!("\n=== {} ===", name);
        println!("Input: {}\n", body);

        match tokenizer.tokenize(body) {
            Ok(tokens) => {
                println!("{} tokens", tokens.len());
                let mut it = TokenIterator::new(tokens);
                it.ignore(Tok::Whitespace);

                for annotation in parse_annotations(&mut it) {
                    println!("  @{}", annotation.name);
                    for (key, value) in &annotation.args {
                        match value {
                            Some(value) => println!("    {} = {}", key, value),
                            None => println!("    {} (flag)", key),
                        }
                    }
                }
            }
            Err(e) => println!("tokenize error: {}", e),
        }
    }
}
