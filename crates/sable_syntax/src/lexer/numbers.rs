//! Numeric literal scanning.
//!
//! The radix-digit reader here is shared with `\u`/`\U` escape decoding in string literals.

use super::{Lexer, Token, TokenKind, TokenValue};
use crate::source::Position;

/// Result of reading a run of digits.
pub(super) struct DigitRun {
    /// Accumulated value, `None` when it overflowed `u64`.
    pub value: Option<u64>,
    /// Number of digits consumed.
    pub count: usize,
}

impl<'a> Lexer<'a> {
    /// Scan an integer or float literal whose first digit was already consumed.
    ///
    /// A leading `0` followed by `b`/`B`, `x`/`X` or an octal digit switches radix. A decimal literal followed by
    /// `.` becomes a float.
    pub(super) fn scan_number(&mut self, start: usize, start_pos: Position, first: char) -> Token {
        if first == '0' {
            match self.peek() {
                Some('b' | 'B') => {
                    self.advance();
                    return self.radix_literal(start, start_pos, 2);
                }
                Some('x' | 'X') => {
                    self.advance();
                    return self.radix_literal(start, start_pos, 16);
                }
                Some('0'..='7') => return self.radix_literal(start, start_pos, 8),
                _ => {}
            }
        }

        let first_digit = u64::from(first.to_digit(10).unwrap_or(0));
        let run = self.read_digits(10, usize::MAX, first_digit);

        // `1..2` keeps the dots for the parser; `1.5` and `1.` are floats.
        if self.peek() == Some('.') && self.peek_next() != Some('.') {
            return self.scan_float(start, start_pos);
        }

        match run.value {
            Some(v) => self.make(TokenKind::Int, TokenValue::Int(v), start, start_pos),
            None => self.invalid(start, start_pos),
        }
    }

    /// Read up to `max` digits of `radix`, folding them onto `initial`.
    pub(super) fn read_digits(&mut self, radix: u32, max: usize, initial: u64) -> DigitRun {
        let mut value = Some(initial);
        let mut count = 0;
        while count < max {
            let Some(d) = self.peek().and_then(|c| c.to_digit(radix)) else {
                break;
            };
            self.advance();
            count += 1;
            value = value
                .and_then(|v| v.checked_mul(u64::from(radix)))
                .and_then(|v| v.checked_add(u64::from(d)));
        }
        DigitRun { value, count }
    }

    fn radix_literal(&mut self, start: usize, start_pos: Position, radix: u32) -> Token {
        let run = self.read_digits(radix, usize::MAX, 0);
        match run.value {
            Some(v) if run.count > 0 => self.make(TokenKind::Int, TokenValue::Int(v), start, start_pos),
            _ => self.invalid(start, start_pos),
        }
    }

    /// Consume `.digits[f|F]` after an integer part and produce one float token for the whole run.
    fn scan_float(&mut self, start: usize, start_pos: Position) -> Token {
        self.advance();
        self.read_digits(10, usize::MAX, 0);
        let text = &self.source[start..self.state.offset];
        let parsed = text.parse::<f64>();
        let single = self.match_char('f') || self.match_char('F');
        match parsed {
            Ok(value) => self.make(TokenKind::Float, TokenValue::Float { value, single }, start, start_pos),
            Err(_) => self.invalid(start, start_pos),
        }
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
    fn decimal_and_radix_integers() {
        assert_eq!(first("42").value, TokenValue::Int(42));
        assert_eq!(first("0").value, TokenValue::Int(0));
        assert_eq!(first("0b1011").value, TokenValue::Int(11));
        assert_eq!(first("0XfF").value, TokenValue::Int(255));
        assert_eq!(first("017").value, TokenValue::Int(15));
    }

    #[test]
    fn radix_prefix_without_digits_is_invalid() {
        let t = first("0x");
        assert_eq!(t.kind, TokenKind::Invalid);
        assert_eq!(t.len, 2);
    }

    #[test]
    fn overflow_is_invalid() {
        assert_eq!(first("18446744073709551615").value, TokenValue::Int(u64::MAX));
        let t = first("18446744073709551616");
        assert_eq!(t.kind, TokenKind::Invalid);
        assert_eq!(t.len, 20);
    }

    #[test]
    fn float_covers_whole_run() {
        let t = first("3.25f;");
        assert_eq!(t.kind, TokenKind::Float);
        assert_eq!(
            t.value,
            TokenValue::Float {
                value: 3.25,
                single: true
            }
        );
        assert_eq!(t.len, 5);

        let t = first("2.5");
        assert_eq!(
            t.value,
            TokenValue::Float {
                value: 2.5,
                single: false
            }
        );
    }

    #[test]
    fn double_dot_is_not_a_float() {
        let tokens = lex("1..2");
        assert_eq!(tokens[0].value, TokenValue::Int(1));
        assert_eq!(tokens[1].kind, TokenKind::Punctuation(sable_core::lang::punctuation::PunctuationId::Dot));
    }
}
