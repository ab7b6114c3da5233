//! Token definitions for TODO keyword declarations
//!
//! A declaration such as `#+SEQ_TODO: TODO(t) WAITING(w) | DONE(d)` is tokenized with logos.
//! Only all-caps words become keywords; abbreviations, the `|` separator and anything the
//! lexer does not know are dropped.
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\f]+")]
pub enum KeywordToken {
    #[regex(r"[A-Za-z0-9_]+", |lex| lex.slice().to_string())]
    Word(String),

    // Fast-access key, e.g. `(w)` or `(w@/!)`
    #[regex(r"\([^)]*\)")]
    Abbreviation,

    #[token("|")]
    Separator,
}

impl KeywordToken {
    /// The keyword carried by this token, if it is an all-caps word
    pub fn keyword(&self) -> Option<&str> {
        match self {
            KeywordToken::Word(word) if is_keyword(word) => Some(word),
            _ => None,
        }
    }
}

fn is_keyword(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase())
}

/// Tokenize a declaration argument list, skipping characters the lexer rejects
pub fn tokenize(source: &str) -> Vec<KeywordToken> {
    let mut lexer = KeywordToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push(token);
        }
    }

    tokens
}

/// Extract the pure keywords of a declaration, in order
pub fn declared_keywords(source: &str) -> Vec<String> {
    tokenize(source)
        .iter()
        .filter_map(|token| token.keyword().map(str::to_string))
        .collect()
}
