//! Recursive-descent parser over the tokens produced by [`super::lexer`].
//!
//! Precedence, lowest to highest: implication (right-assoc) → disjunction
//! (left) → conjunction (left) → negation (prefix) → primary. Which surface
//! symbols occupy each level is read off the active logic's connective
//! table, so `&` and `'` both parse as conjunction without special-casing.

use super::lexer::{lex, PositionedToken, Token};
use crate::connective::{canonical_symbol_for, symbols_with_canonical, ConnectiveSpec};
use crate::error::TableauError;
use crate::formula::{Formula, FormulaRef};
use crate::term::Term;

pub fn parse(input: &str, connectives: &[ConnectiveSpec]) -> Result<FormulaRef, TableauError> {
    let tokens = lex(input, connectives)?;
    let mut parser = Parser { tokens, pos: 0, connectives };
    let formula = parser.parse_formula()?;
    parser.expect_eof()?;
    Ok(formula)
}

struct Parser<'a> {
    tokens: Vec<PositionedToken>,
    pos: usize,
    connectives: &'a [ConnectiveSpec],
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &PositionedToken {
        &self.tokens[self.pos]
    }

    fn position(&self) -> usize {
        self.peek().position
    }

    fn advance(&mut self) -> PositionedToken {
        let t = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn error(&self, message: impl Into<String>) -> TableauError {
        TableauError::Parse { message: message.into(), position: self.position() }
    }

    fn expect_eof(&self) -> Result<(), TableauError> {
        if self.peek().token == Token::Eof {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing input: {:?}", self.peek().token)))
        }
    }

    /// Whether the current token is any alias of `canonical` at this
    /// precedence level. Does not return the matched surface symbol: the
    /// AST always stores `canonical_symbol_for(canonical)` instead, so every
    /// alias of an operation parses to a structurally equal formula.
    fn symbol_at_this_level(&self, canonical: &str) -> bool {
        if let Token::Symbol(s) = &self.peek().token {
            symbols_with_canonical(self.connectives, canonical).contains(&s.as_str())
        } else {
            false
        }
    }

    fn canonical_symbol(&self, canonical: &str) -> &'a str {
        canonical_symbol_for(self.connectives, canonical)
            .unwrap_or_else(|| panic!("no connective registered for canonical operation '{canonical}'"))
    }

    fn parse_formula(&mut self) -> Result<FormulaRef, TableauError> {
        self.parse_implication()
    }

    fn parse_implication(&mut self) -> Result<FormulaRef, TableauError> {
        let left = self.parse_disjunction()?;
        if self.symbol_at_this_level("implies") {
            let sym = self.canonical_symbol("implies");
            self.advance();
            let right = self.parse_implication()?;
            return Ok(Formula::compound(sym, vec![left, right]));
        }
        Ok(left)
    }

    fn parse_disjunction(&mut self) -> Result<FormulaRef, TableauError> {
        let mut left = self.parse_conjunction()?;
        while self.symbol_at_this_level("or") {
            let sym = self.canonical_symbol("or");
            self.advance();
            let right = self.parse_conjunction()?;
            left = Formula::compound(sym, vec![left, right]);
        }
        Ok(left)
    }

    fn parse_conjunction(&mut self) -> Result<FormulaRef, TableauError> {
        let mut left = self.parse_negation()?;
        while self.symbol_at_this_level("and") {
            let sym = self.canonical_symbol("and");
            self.advance();
            let right = self.parse_negation()?;
            left = Formula::compound(sym, vec![left, right]);
        }
        Ok(left)
    }

    fn parse_negation(&mut self) -> Result<FormulaRef, TableauError> {
        if self.symbol_at_this_level("not") {
            let sym = self.canonical_symbol("not");
            self.advance();
            let operand = self.parse_negation()?;
            return Ok(Formula::compound(sym, vec![operand]));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<FormulaRef, TableauError> {
        match self.peek().token.clone() {
            Token::LParen => {
                self.advance();
                let inner = self.parse_formula()?;
                self.expect(Token::RParen, "expected ')'")?;
                Ok(inner)
            }
            Token::LBracket => self.parse_quantified(),
            Token::Ident(name) => {
                if is_upper_initial(&name) {
                    self.advance();
                    self.parse_predicate_args(name)
                } else {
                    self.advance();
                    Ok(Formula::atom(name))
                }
            }
            other => Err(self.error(format!("unexpected token {:?}", other))),
        }
    }

    fn parse_quantified(&mut self) -> Result<FormulaRef, TableauError> {
        self.expect(Token::LBracket, "expected '['")?;
        let is_universal = match self.peek().token {
            Token::ForAll => {
                self.advance();
                true
            }
            Token::Exists => {
                self.advance();
                false
            }
            ref other => {
                return Err(self.error(format!("expected '∀' or '∃', found {:?}", other)));
            }
        };
        let var = self.parse_variable()?;
        let restriction = self.parse_primary()?;
        self.expect(Token::RBracket, "expected ']'")?;
        let matrix = self.parse_primary()?;
        Ok(if is_universal {
            Formula::restricted_universal(var, restriction, matrix)
        } else {
            Formula::restricted_existential(var, restriction, matrix)
        })
    }

    fn parse_predicate_args(&mut self, name: String) -> Result<FormulaRef, TableauError> {
        self.expect(Token::LParen, "expected '(' after predicate name")?;
        let mut terms = Vec::new();
        if self.peek().token != Token::RParen {
            terms.push(self.parse_term()?);
            while self.peek().token == Token::Comma {
                self.advance();
                terms.push(self.parse_term()?);
            }
        }
        self.expect(Token::RParen, "expected ')' to close predicate arguments")?;
        Ok(Formula::predicate(name, terms))
    }

    fn parse_term(&mut self) -> Result<Term, TableauError> {
        match self.peek().token.clone() {
            Token::Ident(name) if is_upper_initial(&name) => {
                self.advance();
                if name.chars().count() != 1 {
                    return Err(self.error(format!(
                        "'{}' is not a valid variable: variables are a single uppercase letter",
                        name
                    )));
                }
                Ok(Term::variable(name))
            }
            Token::Ident(name) => {
                self.advance();
                Ok(Term::constant(name))
            }
            other => Err(self.error(format!("expected a term, found {:?}", other))),
        }
    }

    fn parse_variable(&mut self) -> Result<String, TableauError> {
        match self.peek().token.clone() {
            Token::Ident(name) if is_upper_initial(&name) && name.chars().count() == 1 => {
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!(
                "expected a single uppercase variable, found {:?}",
                other
            ))),
        }
    }

    fn expect(&mut self, expected: Token, message: &str) -> Result<(), TableauError> {
        if self.peek().token == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }
}

fn is_upper_initial(s: &str) -> bool {
    s.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connective::{Associativity, Format};

    fn classical_connectives() -> Vec<ConnectiveSpec> {
        vec![
            ConnectiveSpec::new("~", "not", 1, 4, Associativity::None, Format::Prefix),
            ConnectiveSpec::new("&", "and", 2, 3, Associativity::Left, Format::Infix),
            ConnectiveSpec::new("'", "and", 2, 3, Associativity::Left, Format::Infix),
            ConnectiveSpec::new("|", "or", 2, 2, Associativity::Left, Format::Infix),
            ConnectiveSpec::new("->", "implies", 2, 1, Associativity::Right, Format::Infix),
        ]
    }

    #[test]
    fn parses_precedence_correctly() {
        let table = classical_connectives();
        let f = parse("p | q & r", &table).unwrap();
        // conjunction binds tighter than disjunction: p | (q & r)
        match f.as_ref() {
            Formula::Compound(sym, args) if sym.as_ref() == "|" => {
                assert!(matches!(args[1].as_ref(), Formula::Compound(s, _) if s.as_ref() == "&"));
            }
            _ => panic!("expected top-level disjunction"),
        }
    }

    #[test]
    fn implication_is_right_associative() {
        let table = classical_connectives();
        let f = parse("p -> q -> r", &table).unwrap();
        match f.as_ref() {
            Formula::Compound(sym, args) if sym.as_ref() == "->" => {
                assert!(matches!(args[0].as_ref(), Formula::Atom(a) if a.as_ref() == "p"));
                assert!(matches!(args[1].as_ref(), Formula::Compound(s, _) if s.as_ref() == "->"));
            }
            _ => panic!("expected top-level implication"),
        }
    }

    #[test]
    fn aliases_parse_to_equal_ast() {
        let table = classical_connectives();
        let a = parse("p & q", &table).unwrap();
        let b = parse("p ' q", &table).unwrap();
        assert_eq!(a, b, "aliases of the same connective must parse to equal ASTs");
        match a.as_ref() {
            Formula::Compound(sym, _) => assert_eq!(sym.as_ref(), "&", "canonical representative is the table's first symbol"),
            _ => panic!("expected a compound"),
        }
    }

    #[test]
    fn parses_restricted_universal_with_predicates() {
        let table = classical_connectives();
        let f = parse("[∀X Bird(X)]Flies(X)", &table).unwrap();
        assert!(matches!(f.as_ref(), Formula::RestrictedUniversal { .. }));
    }

    #[test]
    fn rejects_multi_letter_variable() {
        let table = classical_connectives();
        let err = parse("[∀XY Bird(XY)]Flies(XY)", &table).unwrap_err();
        assert!(matches!(err, TableauError::Parse { .. }));
    }

    #[test]
    fn round_trips_through_print() {
        let table = classical_connectives();
        let f = parse("(p & q) -> ~r", &table).unwrap();
        let printed = f.display(&table);
        let reparsed = parse(&printed, &table).unwrap();
        assert_eq!(f, reparsed);
    }
}
