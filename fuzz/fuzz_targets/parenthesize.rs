#![no_main]

use cand::token_helpers::content_range;
use cand::{lexer, parenthesizer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            let _ = parenthesizer::parenthesize(&tokens, content_range(&tokens));
        }
    }
});
