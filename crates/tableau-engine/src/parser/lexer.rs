//! Tokenizer: Unicode quantifier symbols, connective symbols (longest
//! match first), brackets, and identifiers.

use crate::connective::symbols_by_length_desc;
use crate::connective::ConnectiveSpec;
use crate::error::TableauError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Symbol(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    ForAll,
    Exists,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    pub token: Token,
    pub position: usize,
}

/// Lex `input` against `connectives`' surface symbols. Positions are char
/// offsets, not byte offsets.
pub fn lex(input: &str, connectives: &[ConnectiveSpec]) -> Result<Vec<PositionedToken>, TableauError> {
    let symbols = symbols_by_length_desc(connectives);
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        if c.is_whitespace() {
            pos += 1;
            continue;
        }
        match c {
            '(' => {
                tokens.push(PositionedToken { token: Token::LParen, position: pos });
                pos += 1;
                continue;
            }
            ')' => {
                tokens.push(PositionedToken { token: Token::RParen, position: pos });
                pos += 1;
                continue;
            }
            '[' => {
                tokens.push(PositionedToken { token: Token::LBracket, position: pos });
                pos += 1;
                continue;
            }
            ']' => {
                tokens.push(PositionedToken { token: Token::RBracket, position: pos });
                pos += 1;
                continue;
            }
            ',' => {
                tokens.push(PositionedToken { token: Token::Comma, position: pos });
                pos += 1;
                continue;
            }
            '∀' => {
                tokens.push(PositionedToken { token: Token::ForAll, position: pos });
                pos += 1;
                continue;
            }
            '∃' => {
                tokens.push(PositionedToken { token: Token::Exists, position: pos });
                pos += 1;
                continue;
            }
            _ => {}
        }

        if let Some(sym) = symbols.iter().find(|s| matches_at(&chars, pos, s)) {
            tokens.push(PositionedToken {
                token: Token::Symbol(sym.to_string()),
                position: pos,
            });
            pos += sym.chars().count();
            continue;
        }

        if c.is_alphabetic() {
            let start = pos;
            let mut end = pos + 1;
            while end < chars.len() && (chars[end].is_alphanumeric() || chars[end] == '_') {
                end += 1;
            }
            let ident: String = chars[start..end].iter().collect();
            tokens.push(PositionedToken { token: Token::Ident(ident), position: start });
            pos = end;
            continue;
        }

        return Err(TableauError::Lex { position: pos, found: c });
    }

    tokens.push(PositionedToken { token: Token::Eof, position: chars.len() });
    Ok(tokens)
}

fn matches_at(chars: &[char], pos: usize, symbol: &str) -> bool {
    let sym_chars: Vec<char> = symbol.chars().collect();
    if pos + sym_chars.len() > chars.len() {
        return false;
    }
    chars[pos..pos + sym_chars.len()] == sym_chars[..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connective::{Associativity, Format};

    fn classical_connectives() -> Vec<ConnectiveSpec> {
        vec![
            ConnectiveSpec::new("~", "not", 1, 4, Associativity::None, Format::Prefix),
            ConnectiveSpec::new("&", "and", 2, 3, Associativity::Left, Format::Infix),
            ConnectiveSpec::new("|", "or", 2, 2, Associativity::Left, Format::Infix),
            ConnectiveSpec::new("->", "implies", 2, 1, Associativity::Right, Format::Infix),
        ]
    }

    #[test]
    fn lexes_implication_longest_first() {
        let table = classical_connectives();
        let tokens = lex("p -> q", &table).unwrap();
        let kinds: Vec<Token> = tokens.into_iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Ident("p".into()),
                Token::Symbol("->".into()),
                Token::Ident("q".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn lexes_restricted_quantifier_brackets() {
        let table = classical_connectives();
        let tokens = lex("[∀X Bird(X)]Flies(X)", &table).unwrap();
        assert_eq!(tokens[0].token, Token::LBracket);
        assert_eq!(tokens[1].token, Token::ForAll);
        assert_eq!(tokens[2].token, Token::Ident("X".into()));
    }

    #[test]
    fn rejects_unknown_character() {
        let table = classical_connectives();
        let err = lex("p @ q", &table).unwrap_err();
        assert!(matches!(err, TableauError::Lex { position: 2, found: '@' }));
    }
}
