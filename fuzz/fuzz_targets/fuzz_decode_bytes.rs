#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_chunked::{ChunkDecoder, DecoderLimits};

#[derive(Arbitrary, Debug)]
struct FuzzLimits {
    max_chunk_line_size: u16,
    max_extensions: u8,
    max_body_size: u32,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzLimits| {
    let limits = DecoderLimits {
        max_chunk_line_size: input.max_chunk_line_size as usize,
        max_extensions: input.max_extensions as usize,
        // 巨大なチャンクサイズで確保しすぎないよう 1MB に抑える
        max_body_size: (input.max_body_size as usize) % (1024 * 1024),
    };

    let mut decoder = ChunkDecoder::with_limits(limits);
    if let Ok(outcome) = decoder.decode_bytes(&input.data) {
        if let Some(body) = outcome.complete() {
            assert!(body.len() <= input.data.len());
        }
    }
});
