//! Lexer for the Sable programming language
//!
//! Handles tokenization including:
//! - Keywords, word operators and literal words (`true`, `false`, `nullptr`)
//! - Identifiers and literals (int with radix prefixes, float with `f` suffix, string, char)
//! - Operators and punctuation, assembled greedily per leading character
//! - Trivia: whitespace runs, newlines, line and block comments
//!
//! The lexer is pull-based: [`Lexer::next_token`] scans exactly one token. Its whole state is the cheaply
//! clonable [`LexerState`], so the parser can [`snapshot`](Lexer::snapshot) before a speculative parse and
//! [`restore`](Lexer::restore) it verbatim on failure.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, TokenValue, Token)
//! - `strings` - String/char literal scanning and escape decoding
//! - `numbers` - Numeric literal scanning and the shared radix-digit reader

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, TokenValue, keyword_id};

use crate::source::{Position, Span};
use sable_core::lang::keywords::KeywordId;
use sable_core::lang::operators::{self, OperatorId};
use sable_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ============================================================================

/// Everything the lexer knows, as a plain value.
///
/// Cloning a `LexerState` is a full snapshot: restoring it rewinds the cursor, the current character and the
/// current token together.
#[derive(Debug, Clone, PartialEq)]
pub struct LexerState {
    offset: usize,
    position: Position,
    current: Option<char>,
    eof: bool,
    token: Token,
}

impl LexerState {
    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Editor position of the cursor.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The most recently scanned token.
    pub fn token(&self) -> &Token {
        &self.token
    }
}

/// Lexer for Sable source code.
pub struct Lexer<'a> {
    source: &'a str,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer positioned before the first character of `source`.
    ///
    /// The current token starts out as a zero-width `Invalid` token; call [`next_token`](Self::next_token) to scan
    /// the first real one.
    pub fn new(source: &'a str) -> Self {
        let start = Position::default();
        Self {
            source,
            state: LexerState {
                offset: 0,
                position: start,
                current: source.chars().next(),
                eof: source.is_empty(),
                token: Token::placeholder(start, 0),
            },
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The token returned by the last call to [`next_token`](Self::next_token).
    pub fn token(&self) -> &Token {
        &self.state.token
    }

    /// Take a full snapshot of the lexer.
    pub fn snapshot(&self) -> LexerState {
        self.state.clone()
    }

    /// Replace the live state with a snapshot taken earlier.
    pub fn restore(&mut self, state: LexerState) {
        self.state = state;
    }

    /// Scan and return the next token (trivia included).
    ///
    /// After the end of input every call returns an `Eof` token.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        self.state.token = token.clone();
        token
    }

    /// Scan every token up to and including the first `Eof`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Split a current `>>`, `>>=` or `>=` token so that only its leading `>` is consumed.
    ///
    /// The current token becomes a single `>` and the cursor rewinds to the character right after it. This is
    /// how nested generic argument lists (`List<List<Int32>>`) close.
    ///
    /// ## Returns
    /// - `true` if a split happened.
    pub fn split_angle(&mut self) -> bool {
        let token = &self.state.token;
        if !matches!(
            token.kind,
            TokenKind::Operator(OperatorId::Shr | OperatorId::ShrEq | OperatorId::GtEq)
        ) {
            return false;
        }
        let start = token.span.start;
        let offset = token.offset + 1;
        let position = Position::new(start.line, start.character + 1);
        self.state.offset = offset;
        self.state.position = position;
        self.state.current = self.source[offset..].chars().next();
        self.state.eof = self.state.current.is_none();
        self.state.token = Token::new(
            TokenKind::Operator(OperatorId::Gt),
            TokenValue::None,
            Span::new(start, position),
            offset - 1,
            1,
            1,
        );
        true
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.state.current
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.state.offset..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.state.current?;
        self.state.offset += c.len_utf8();
        if c == '\n' {
            self.state.position.line += 1;
            self.state.position.character = 0;
        } else {
            self.state.position.character += c.len_utf16() as u32;
        }
        self.state.current = self.source[self.state.offset..].chars().next();
        self.state.eof = self.state.current.is_none();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Token {
        let start = self.state.offset;
        let start_pos = self.state.position;

        if self.state.eof {
            return Token::eof(start_pos, start);
        }
        let Some(c) = self.advance() else {
            return Token::eof(start_pos, start);
        };

        match c {
            ' ' | '\t' | '\r' => {
                while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
                    self.advance();
                }
                self.make(TokenKind::Whitespace, TokenValue::None, start, start_pos)
            }
            '\n' => self.make(TokenKind::Newline, TokenValue::None, start, start_pos),

            '/' => self.scan_slash(start, start_pos),
            '+' => {
                if self.match_char('=') {
                    self.op(OperatorId::PlusEq, start, start_pos)
                } else if self.match_char('+') {
                    self.op(OperatorId::PlusPlus, start, start_pos)
                } else {
                    self.op(OperatorId::Plus, start, start_pos)
                }
            }
            '-' => {
                if self.match_char('=') {
                    self.op(OperatorId::MinusEq, start, start_pos)
                } else if self.match_char('>') {
                    self.punct(PunctuationId::Arrow, start, start_pos)
                } else if self.match_char('-') {
                    self.op(OperatorId::MinusMinus, start, start_pos)
                } else {
                    self.op(OperatorId::Minus, start, start_pos)
                }
            }
            '*' => self.operator(start, start_pos, OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '%' => self.operator(start, start_pos, OperatorId::Percent, &[('=', OperatorId::PercentEq)]),
            '^' => self.operator(start, start_pos, OperatorId::Caret, &[('=', OperatorId::CaretEq)]),
            '&' => self.operator(
                start,
                start_pos,
                OperatorId::Amp,
                &[('=', OperatorId::AmpEq), ('&', OperatorId::AmpAmp)],
            ),
            '|' => self.operator(
                start,
                start_pos,
                OperatorId::Pipe,
                &[('=', OperatorId::PipeEq), ('|', OperatorId::PipePipe)],
            ),
            '<' => self.scan_angle(start, start_pos, '<'),
            '>' => self.scan_angle(start, start_pos, '>'),
            '=' => self.operator(start, start_pos, OperatorId::Eq, &[('=', OperatorId::EqEq)]),
            '!' => self.operator(start, start_pos, OperatorId::Bang, &[('=', OperatorId::NotEq)]),
            '~' => self.op(OperatorId::Tilde, start, start_pos),

            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    self.punct(PunctuationId::Ellipsis, start, start_pos)
                } else {
                    self.punct(PunctuationId::Dot, start, start_pos)
                }
            }
            ',' => self.punct(PunctuationId::Comma, start, start_pos),
            ':' => self.punct(PunctuationId::Colon, start, start_pos),
            ';' => self.punct(PunctuationId::Semicolon, start, start_pos),
            '(' => self.punct(PunctuationId::LParen, start, start_pos),
            ')' => self.punct(PunctuationId::RParen, start, start_pos),
            '[' => self.punct(PunctuationId::LBracket, start, start_pos),
            ']' => self.punct(PunctuationId::RBracket, start, start_pos),
            '{' => self.punct(PunctuationId::LBrace, start, start_pos),
            '}' => self.punct(PunctuationId::RBrace, start, start_pos),

            '"' => self.scan_string(start, start_pos),
            '\'' => self.scan_char(start, start_pos),

            '0'..='9' => self.scan_number(start, start_pos, c),

            _ if is_ident_start(c) => self.scan_identifier(start, start_pos),

            _ => self.invalid(start, start_pos),
        }
    }

    // ========================================================================
    // Token construction
    // ========================================================================

    fn make(&self, kind: TokenKind, value: TokenValue, start: usize, start_pos: Position) -> Token {
        let text = &self.source[start..self.state.offset];
        Token::new(
            kind,
            value,
            Span::new(start_pos, self.state.position),
            start,
            text.len(),
            text.encode_utf16().count() as u32,
        )
    }

    fn invalid(&self, start: usize, start_pos: Position) -> Token {
        let text = self.source[start..self.state.offset].to_string();
        self.make(TokenKind::Invalid, TokenValue::Text(text), start, start_pos)
    }

    fn op(&self, id: OperatorId, start: usize, start_pos: Position) -> Token {
        self.make(TokenKind::Operator(id), TokenValue::None, start, start_pos)
    }

    fn punct(&self, id: PunctuationId, start: usize, start_pos: Position) -> Token {
        self.make(TokenKind::Punctuation(id), TokenValue::None, start, start_pos)
    }

    /// Try to match a compound operator, fallback to simple.
    fn operator(
        &mut self,
        start: usize,
        start_pos: Position,
        simple: OperatorId,
        compounds: &[(char, OperatorId)],
    ) -> Token {
        for (c, id) in compounds {
            if self.match_char(*c) {
                return self.op(*id, start, start_pos);
            }
        }
        self.op(simple, start, start_pos)
    }

    /// Scan `<`/`>` families: relational, `<=`/`>=`, shift and shift-assign.
    fn scan_angle(&mut self, start: usize, start_pos: Position, first: char) -> Token {
        let (plain, or_eq, shift, shift_eq) = if first == '<' {
            (OperatorId::Lt, OperatorId::LtEq, OperatorId::Shl, OperatorId::ShlEq)
        } else {
            (OperatorId::Gt, OperatorId::GtEq, OperatorId::Shr, OperatorId::ShrEq)
        };
        if self.match_char('=') {
            self.op(or_eq, start, start_pos)
        } else if self.match_char(first) {
            if self.match_char('=') {
                self.op(shift_eq, start, start_pos)
            } else {
                self.op(shift, start, start_pos)
            }
        } else {
            self.op(plain, start, start_pos)
        }
    }

    /// Scan slash forms: `/`, `/=`, `// line comment`, `/* block comment */`.
    fn scan_slash(&mut self, start: usize, start_pos: Position) -> Token {
        if self.match_char('/') {
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
            let text = self.source[start..self.state.offset].to_string();
            self.make(TokenKind::LineComment, TokenValue::Text(text), start, start_pos)
        } else if self.match_char('*') {
            loop {
                match self.peek() {
                    None => return self.invalid(start, start_pos),
                    Some('*') if self.peek_next() == Some('/') => {
                        self.advance();
                        self.advance();
                        break;
                    }
                    Some(_) => {
                        self.advance();
                    }
                }
            }
            let text = self.source[start..self.state.offset].to_string();
            self.make(TokenKind::BlockComment, TokenValue::Text(text), start, start_pos)
        } else if self.match_char('=') {
            self.op(OperatorId::SlashEq, start, start_pos)
        } else {
            self.op(OperatorId::Slash, start, start_pos)
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize, start_pos: Position) -> Token {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.state.offset];

        match keyword_id(spelling) {
            Some(KeywordId::True) => self.make(TokenKind::Bool, TokenValue::Bool(true), start, start_pos),
            Some(KeywordId::False) => self.make(TokenKind::Bool, TokenValue::Bool(false), start, start_pos),
            Some(KeywordId::Nullptr) => self.make(TokenKind::Null, TokenValue::None, start, start_pos),
            Some(id) => self.make(TokenKind::Keyword(id), TokenValue::None, start, start_pos),
            None => match operators::from_word(spelling) {
                Some(id) => self.op(id, start, start_pos),
                None => self.make(
                    TokenKind::Ident,
                    TokenValue::Text(spelling.to_string()),
                    start,
                    start_pos,
                ),
            },
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`. The returned vector always ends with `Eof`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    let tokens = Lexer::new(source).tokenize();
    tracing::trace!(token_count = tokens.len(), "lexed source");
    tokens
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Lex and drop whitespace/newline trivia and the trailing EOF.
    fn significant(source: &str) -> Vec<Token> {
        lex(source)
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Newline | TokenKind::Eof))
            .collect()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        significant(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        use sable_core::lang::keywords::{self, KeywordCategory};

        for k in keywords::KEYWORDS {
            let tokens = significant(k.canonical);
            assert_eq!(tokens.len(), 1, "expected single token for keyword {:?}", k.id);
            match k.id {
                KeywordId::True | KeywordId::False => assert_eq!(tokens[0].kind, TokenKind::Bool),
                KeywordId::Nullptr => assert_eq!(tokens[0].kind, TokenKind::Null),
                _ => {
                    assert_ne!(k.category, KeywordCategory::Literal);
                    assert!(tokens[0].kind.is_keyword(k.id));
                }
            }
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        for o in operators::OPERATORS {
            let tokens = significant(o.spelling);
            assert_eq!(tokens.len(), 1, "expected single token for operator {:?}", o.spelling);
            assert!(tokens[0].kind.is_operator(o.id), "{:?} lexed as {:?}", o.spelling, tokens[0].kind);
        }
    }

    #[test]
    fn test_punctuation_registry_parity() {
        use sable_core::lang::punctuation;

        for p in punctuation::PUNCTUATION {
            let tokens = significant(p.canonical);
            assert_eq!(tokens.len(), 1, "expected single token for {:?}", p.canonical);
            assert!(tokens[0].kind.is_punctuation(p.id));
        }
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        for _ in 0..5 {
            let t = lexer.next_token();
            assert!(t.is_eof());
            assert_eq!(t.offset, 1);
        }
    }

    #[test]
    fn test_trivia_is_tokenized() {
        let tokens = lex("a  // note\n/* b */");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::LineComment,
                TokenKind::Newline,
                TokenKind::BlockComment,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[2].text(), Some("// note"));
        assert_eq!(tokens[4].text(), Some("/* b */"));
    }

    #[test]
    fn test_unterminated_block_comment_is_invalid() {
        let tokens = significant("/* never closed\n x");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].span.end.line, 1);
    }

    #[test]
    fn test_block_comment_end_needs_both_chars() {
        let tokens = significant("/* a * / b */ c");
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
    }

    #[test]
    fn test_greedy_operators() {
        assert_eq!(
            kinds("+= ++ + -= -> -- - &= && & |= || | <<= << <= < >>= >> >= > == = != !"),
            vec![
                TokenKind::Operator(OperatorId::PlusEq),
                TokenKind::Operator(OperatorId::PlusPlus),
                TokenKind::Operator(OperatorId::Plus),
                TokenKind::Operator(OperatorId::MinusEq),
                TokenKind::Punctuation(PunctuationId::Arrow),
                TokenKind::Operator(OperatorId::MinusMinus),
                TokenKind::Operator(OperatorId::Minus),
                TokenKind::Operator(OperatorId::AmpEq),
                TokenKind::Operator(OperatorId::AmpAmp),
                TokenKind::Operator(OperatorId::Amp),
                TokenKind::Operator(OperatorId::PipeEq),
                TokenKind::Operator(OperatorId::PipePipe),
                TokenKind::Operator(OperatorId::Pipe),
                TokenKind::Operator(OperatorId::ShlEq),
                TokenKind::Operator(OperatorId::Shl),
                TokenKind::Operator(OperatorId::LtEq),
                TokenKind::Operator(OperatorId::Lt),
                TokenKind::Operator(OperatorId::ShrEq),
                TokenKind::Operator(OperatorId::Shr),
                TokenKind::Operator(OperatorId::GtEq),
                TokenKind::Operator(OperatorId::Gt),
                TokenKind::Operator(OperatorId::EqEq),
                TokenKind::Operator(OperatorId::Eq),
                TokenKind::Operator(OperatorId::NotEq),
                TokenKind::Operator(OperatorId::Bang),
            ]
        );
    }

    #[test]
    fn test_word_operators_and_literal_words() {
        let tokens = significant("a and not b or true false nullptr");
        assert_eq!(tokens[1].kind, TokenKind::Operator(OperatorId::And));
        assert_eq!(tokens[2].kind, TokenKind::Operator(OperatorId::Not));
        assert_eq!(tokens[4].kind, TokenKind::Operator(OperatorId::Or));
        assert_eq!(tokens[5].value, TokenValue::Bool(true));
        assert_eq!(tokens[6].value, TokenValue::Bool(false));
        assert_eq!(tokens[7].kind, TokenKind::Null);
    }

    #[test]
    fn test_identifier_carries_text() {
        let tokens = significant("_foo42 bar");
        assert_eq!(tokens[0].text(), Some("_foo42"));
        assert_eq!(tokens[1].text(), Some("bar"));
    }

    #[test]
    fn test_unknown_character_is_single_invalid_token() {
        let tokens = significant("a @ b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].text(), Some("@"));
        assert!(!tokens[1].is_valid());
    }

    #[test]
    fn test_non_ascii_identifier_rejected() {
        let tokens = significant("π");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].len, 2);
        assert_eq!(tokens[0].utf16_len, 1);
    }

    #[test]
    fn test_spans_track_lines_and_utf16_columns() {
        let tokens = significant("\"\u{1F600}\" x\n  y");
        assert_eq!(tokens[0].span.start, Position::new(0, 0));
        assert_eq!(tokens[0].span.end, Position::new(0, 4));
        assert_eq!(tokens[0].utf16_len, 4);
        assert_eq!(tokens[1].span.start, Position::new(0, 5));
        assert_eq!(tokens[2].span.start, Position::new(1, 2));
    }

    #[test]
    fn test_ellipsis_versus_dots() {
        assert_eq!(
            kinds("Ts... a.b .."),
            vec![
                TokenKind::Ident,
                TokenKind::Punctuation(PunctuationId::Ellipsis),
                TokenKind::Ident,
                TokenKind::Punctuation(PunctuationId::Dot),
                TokenKind::Ident,
                TokenKind::Punctuation(PunctuationId::Dot),
                TokenKind::Punctuation(PunctuationId::Dot),
            ]
        );
    }

    #[test]
    fn test_snapshot_restore_rewinds_everything() {
        let mut lexer = Lexer::new("a b c");
        lexer.next_token();
        let snap = lexer.snapshot();
        let first = lexer.token().clone();
        lexer.next_token();
        lexer.next_token();
        lexer.next_token();
        lexer.restore(snap);
        assert_eq!(lexer.token(), &first);
        lexer.next_token();
        let b = lexer.next_token();
        assert_eq!(b.text(), Some("b"));
    }

    #[test]
    fn test_split_angle_rewinds_one_character() {
        let mut lexer = Lexer::new(">>= x");
        let t = lexer.next_token();
        assert_eq!(t.kind, TokenKind::Operator(OperatorId::ShrEq));
        assert!(lexer.split_angle());
        assert_eq!(lexer.token().kind, TokenKind::Operator(OperatorId::Gt));
        assert_eq!(lexer.token().len, 1);
        assert_eq!(lexer.next_token().kind, TokenKind::Operator(OperatorId::GtEq));
        assert_eq!(lexer.next_token().kind, TokenKind::Whitespace);
        assert!(!lexer.split_angle());
    }
}
