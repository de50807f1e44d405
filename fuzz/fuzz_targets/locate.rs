#![no_main]

use libfuzzer_sys::fuzz_target;
use phpunit_runner::cursor::Cursor;
use phpunit_runner::locator;
use phpunit_syntax::lexer::Lexer;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the scanner
        let _ = Lexer::new(s).tokenize_lossy();

        // Then the locator, with the cursor derived from the input length
        let offset = Cursor::Offset(s.len() / 2).to_offset(s);
        let _ = locator::locate(s, offset);
    }
});
