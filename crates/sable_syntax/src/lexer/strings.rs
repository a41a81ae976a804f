//! String and char literal scanning.
//!
//! Both literal forms share one escape decoder. A malformed literal never aborts lexing; it becomes an `Invalid`
//! token and scanning resumes after it.

use super::{Lexer, Token, TokenKind, TokenValue};
use crate::source::Position;

/// Outcome of decoding one (possibly escaped) character.
enum Scanned {
    Char(char),
    /// An unknown escape kept verbatim: the backslash plus the character.
    Verbatim(char),
    Malformed,
    /// A raw newline or end of input; the literal is unterminated.
    End,
}

impl<'a> Lexer<'a> {
    /// Scan a `"..."` literal. The opening quote was already consumed.
    pub(super) fn scan_string(&mut self, start: usize, start_pos: Position) -> Token {
        let mut value = String::new();
        let mut valid = true;
        loop {
            if self.match_char('"') {
                break;
            }
            match self.scan_literal_char() {
                Scanned::Char(c) => value.push(c),
                Scanned::Verbatim(c) => {
                    value.push('\\');
                    value.push(c);
                }
                Scanned::Malformed => valid = false,
                Scanned::End => return self.invalid(start, start_pos),
            }
        }
        if valid {
            self.make(TokenKind::Str, TokenValue::Str(value), start, start_pos)
        } else {
            self.invalid(start, start_pos)
        }
    }

    /// Scan a `'c'` literal. The opening quote was already consumed.
    ///
    /// Exactly one (possibly escaped) character must precede the closing quote.
    pub(super) fn scan_char(&mut self, start: usize, start_pos: Position) -> Token {
        if self.match_char('\'') {
            return self.invalid(start, start_pos);
        }
        let c = match self.scan_literal_char() {
            Scanned::Char(c) => Some(c),
            Scanned::Verbatim(_) | Scanned::Malformed => None,
            Scanned::End => return self.invalid(start, start_pos),
        };
        if !self.match_char('\'') {
            return self.invalid(start, start_pos);
        }
        match c {
            Some(c) => self.make(TokenKind::Char, TokenValue::Char(c), start, start_pos),
            None => self.invalid(start, start_pos),
        }
    }

    fn scan_literal_char(&mut self) -> Scanned {
        match self.peek() {
            None | Some('\n') => Scanned::End,
            Some('\\') => {
                self.advance();
                self.scan_escape()
            }
            Some(c) => {
                self.advance();
                Scanned::Char(c)
            }
        }
    }

    fn scan_escape(&mut self) -> Scanned {
        let Some(c) = self.peek() else {
            return Scanned::End;
        };
        if c == '\n' {
            return Scanned::End;
        }
        self.advance();
        let decoded = match c {
            '\\' => '\\',
            'b' => '\u{08}',
            'r' => '\r',
            'n' => '\n',
            't' => '\t',
            'v' => '\u{0B}',
            'f' => '\u{0C}',
            'a' => '\u{07}',
            '\'' => '\'',
            '"' => '"',
            '0' => '\0',
            'u' => return self.scan_code_point(4),
            'U' => return self.scan_code_point(8),
            other => return Scanned::Verbatim(other),
        };
        Scanned::Char(decoded)
    }

    fn scan_code_point(&mut self, max_digits: usize) -> Scanned {
        let run = self.read_digits(16, max_digits, 0);
        if run.count == 0 {
            return Scanned::Malformed;
        }
        run.value
            .and_then(|v| u32::try_from(v).ok())
            .and_then(char::from_u32)
            .map_or(Scanned::Malformed, Scanned::Char)
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex;
    use super::*;

    fn first(source: &str) -> Token {
        lex(source).remove(0)
    }

    #[test]
    fn plain_string() {
        let t = first(r#""hello world""#);
        assert_eq!(t.kind, TokenKind::Str);
        assert_eq!(t.value, TokenValue::Str("hello world".into()));
    }

    #[test]
    fn fixed_escape_set() {
        let t = first(r#""\\\b\r\n\t\v\f\a\'\"\0""#);
        assert_eq!(
            t.value,
            TokenValue::Str("\\\u{08}\r\n\t\u{0B}\u{0C}\u{07}'\"\0".into())
        );
    }

    #[test]
    fn unicode_escapes_use_hex_reader() {
        assert_eq!(first(r#""\u00e9""#).value, TokenValue::Str("é".into()));
        assert_eq!(first(r#""\U0001F600""#).value, TokenValue::Str("\u{1F600}".into()));
        // `\u` stops after four digits; the rest is ordinary text.
        assert_eq!(first(r#""\u00412""#).value, TokenValue::Str("A2".into()));
    }

    #[test]
    fn bad_code_points_invalidate_the_literal() {
        assert_eq!(first(r#""\uD800""#).kind, TokenKind::Invalid);
        assert_eq!(first(r#""\u""#).kind, TokenKind::Invalid);
        // The literal is still consumed through its closing quote.
        let tokens = lex(r#""\uzz" x"#);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[2].text(), Some("x"));
    }

    #[test]
    fn unknown_escape_is_kept_verbatim() {
        assert_eq!(first(r#""a\qb""#).value, TokenValue::Str("a\\qb".into()));
    }

    #[test]
    fn unterminated_string_is_invalid() {
        assert_eq!(first("\"abc").kind, TokenKind::Invalid);
        let tokens = lex("\"abc\nx");
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].kind, TokenKind::Newline);
    }

    #[test]
    fn char_literals() {
        assert_eq!(first("'a'").value, TokenValue::Char('a'));
        assert_eq!(first(r"'\n'").value, TokenValue::Char('\n'));
        assert_eq!(first("''").kind, TokenKind::Invalid);
        assert_eq!(first("'ab'").kind, TokenKind::Invalid);
        assert_eq!(first("'a").kind, TokenKind::Invalid);
    }
}
