#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_chunked::{ChunkLine, DecoderLimits};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(parsed) = ChunkLine::parse(line, &DecoderLimits::unlimited()) {
        for extension in &parsed.extensions {
            assert!(!extension.name.contains(';'));
            assert!(!extension.name.contains('='));
        }
    }
});
