#![no_main]

use std::io::Read;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_chunked::{ChunkDecoder, ChunkExtension};

#[derive(Arbitrary, Debug)]
struct FuzzChunk {
    data: Vec<u8>,
    extensions: Vec<(String, Option<String>)>,
}

#[derive(Arbitrary, Debug)]
struct FuzzChunked {
    chunks: Vec<FuzzChunk>,
    split_hint: u8,
}

/// 1 回の read で最大 `step` バイトしか返さない入力元
struct SplitReader<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for SplitReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.step).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

fn normalize_chunks(chunks: Vec<FuzzChunk>) -> Vec<(Vec<u8>, Vec<ChunkExtension>)> {
    chunks
        .into_iter()
        .filter(|chunk| !chunk.data.is_empty())
        .take(64)
        .map(|chunk| {
            let extensions = chunk
                .extensions
                .into_iter()
                .filter(|(name, value)| {
                    is_token(name) && value.as_deref().is_none_or(|v| v.is_empty() || is_token(v))
                })
                .take(8)
                .map(|(name, value)| ChunkExtension { name, value })
                .collect();
            (chunk.data, extensions)
        })
        .collect()
}

fn encode(chunks: &[(Vec<u8>, Vec<ChunkExtension>)]) -> Vec<u8> {
    let mut buf = Vec::new();
    for (data, extensions) in chunks {
        buf.extend_from_slice(format!("{:x}", data.len()).as_bytes());
        for extension in extensions {
            buf.push(b';');
            buf.extend_from_slice(extension.name.as_bytes());
            if let Some(value) = &extension.value {
                buf.push(b'=');
                buf.extend_from_slice(value.as_bytes());
            }
        }
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(data);
        buf.extend_from_slice(b"\r\n");
    }
    buf.extend_from_slice(b"0\r\n\r\n");
    buf
}

fuzz_target!(|input: FuzzChunked| {
    let chunks = normalize_chunks(input.chunks);
    let expected: Vec<u8> = chunks.iter().flat_map(|(data, _)| data.clone()).collect();
    let step = (input.split_hint as usize % 32) + 1;
    let encoded = encode(&chunks);

    let mut seen = Vec::new();
    let mut decoder = ChunkDecoder::new().on_extension(|extension, _| {
        seen.push(extension.clone());
        true
    });
    let mut source = SplitReader {
        data: &encoded,
        step,
    };
    let decoded = decoder
        .decode(&mut source)
        .expect("valid encoding must decode")
        .complete()
        .expect("no hook rejects");
    drop(decoder);

    assert_eq!(decoded.content_length, expected.len() as u64);
    assert_eq!(decoded.consumed, encoded.len() as u64);
    assert_eq!(decoded.into_bytes(), expected);

    let expected_extensions: Vec<ChunkExtension> = chunks
        .into_iter()
        .flat_map(|(_, extensions)| extensions)
        .collect();
    assert_eq!(seen, expected_extensions);
});
