#![no_main]

use libfuzzer_sys::fuzz_target;
use sable_syntax::{highlight, lexer, parse_str};

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 never reaches the front end
    if let Ok(s) = std::str::from_utf8(data) {
        let tokens = lexer::lex(s);
        assert!(tokens.last().is_some_and(|t| t.is_eof()));

        let result = parse_str(s);
        let _ = highlight(&result.nodes);
    }
});
