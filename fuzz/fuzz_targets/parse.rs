#![no_main]

use cand::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the lexer
        if let Ok(tokens) = lexer::lex(s) {
            // If lexing succeeds, fuzz statement splitting and the parser
            if let Ok(program) = parser::parse_program(&tokens) {
                if let Err(violation) = program.ast.check_invariants(program.root) {
                    panic!("{violation}");
                }
            }
        }
    }
});
