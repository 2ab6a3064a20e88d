#![no_main]

use libfuzzer_sys::fuzz_target;
use reqlgen::{ConvertConfig, DslVars, Mode, emit_statement};
use reqlgen_syntax::parse_line;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Any line that parses must emit or skip, in both modes, without panicking
        if let Ok(statement) = parse_line(s) {
            let config = ConvertConfig::new();
            let vars = DslVars::for_file(&config);
            let _ = emit_statement(&statement, Mode::Dsl, &vars, &config);
            let _ = emit_statement(&statement, Mode::Plain, &vars, &config);
        }
    }
});
