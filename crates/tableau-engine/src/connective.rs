//! Connective specifications: parsing/printing metadata for a logic's connectives.

/// Associativity of an infix connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// How a connective is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Infix,
    Prefix,
    Functional,
}

/// Per-connective metadata a logic plugin supplies: symbol, arity, and the
/// precedence/associativity/format that drive both the parser and the
/// printer. Two symbols may alias the same logical connective — e.g. `&`
/// and `'` both resolve to conjunction in several shipped logics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectiveSpec {
    pub symbol: &'static str,
    /// The logical operation this symbol denotes, independent of surface
    /// spelling: `"not"`, `"and"`, `"or"`, `"implies"`, or `"iff"`. Truth and
    /// sign systems dispatch on this, not on `symbol`, so `&` and `·` can
    /// both mean conjunction without duplicating rule logic.
    pub canonical: &'static str,
    pub arity: usize,
    pub precedence: u8,
    pub associativity: Associativity,
    pub format: Format,
}

impl ConnectiveSpec {
    pub const fn new(
        symbol: &'static str,
        canonical: &'static str,
        arity: usize,
        precedence: u8,
        associativity: Associativity,
        format: Format,
    ) -> Self {
        ConnectiveSpec {
            symbol,
            canonical,
            arity,
            precedence,
            associativity,
            format,
        }
    }
}

/// A logic's full set of connectives, aliases included. Order is
/// insignificant except that the lexer tries symbols longest-first so a
/// multi-character symbol is never shadowed by a shorter prefix of itself.
pub type ConnectiveTable = Vec<ConnectiveSpec>;

pub fn find_by_symbol<'a>(table: &'a [ConnectiveSpec], symbol: &str) -> Option<&'a ConnectiveSpec> {
    table.iter().find(|s| s.symbol == symbol)
}

/// Every surface symbol that denotes `canonical` (e.g. `"and"` ->
/// `["&", "'"]`), used by the parser to recognize any alias at a given
/// precedence level.
pub fn symbols_with_canonical<'a>(table: &'a [ConnectiveSpec], canonical: &str) -> Vec<&'a str> {
    table
        .iter()
        .filter(|s| s.canonical == canonical)
        .map(|s| s.symbol)
        .collect()
}

/// The canonical representative symbol for `canonical` — the first entry in
/// `table` whose `canonical` field matches. Used by the parser to store one
/// consistent surface symbol for every alias of an operation, so `&` and `'`
/// both build structurally equal ASTs.
pub fn canonical_symbol_for<'a>(table: &'a [ConnectiveSpec], canonical: &str) -> Option<&'a str> {
    table.iter().find(|s| s.canonical == canonical).map(|s| s.symbol)
}

/// Symbols sorted longest-first, for greedy lexing.
pub fn symbols_by_length_desc(table: &[ConnectiveSpec]) -> Vec<&str> {
    let mut out: Vec<&str> = table.iter().map(|s| s.symbol).collect();
    out.sort_by_key(|s| std::cmp::Reverse(s.len()));
    out
}
