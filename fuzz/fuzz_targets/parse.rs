#![no_main]

use describe_syntax::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        match lexer::lex(s) {
            Ok(tokens) => {
                if let Err(errors) = parser::parse(&tokens) {
                    assert!(errors.iter().all(|e| e.span.end <= s.len()));
                }
            }
            Err(errors) => assert!(!errors.is_empty()),
        }
    }
});
