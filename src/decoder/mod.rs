//! chunked デコーダーモジュール
//!
//! 入力元 ([`std::io::Read`]) を前方向に読み進める同期デコーダーを提供。
//!
//! ## 状態遷移
//!
//! ```text
//! ChunkSize ──(size > 0)──▶ ChunkData ──▶ ChunkDataLf ──▶ ChunkSize
//!     │
//!     └──(size == 0)──▶ LastChunkCrlf ──▶ Complete
//! ```
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_chunked::{ChunkDecoder, DecodeOutcome};
//! use std::io::Cursor;
//!
//! let mut decoder = ChunkDecoder::new()
//!     .on_extension(|extension, _data| extension.name != "reject-me")
//!     .on_chunk(|data| !data.is_empty());
//!
//! let mut source = Cursor::new(&b"5;chunk-signature=abc\r\nhello\r\n0\r\n\r\n"[..]);
//! match decoder.decode(&mut source).unwrap() {
//!     DecodeOutcome::Complete(decoded) => {
//!         assert_eq!(decoded.content_length, 5);
//!         assert_eq!(decoded.into_bytes(), b"hello");
//!     }
//!     DecodeOutcome::Rejected(rejection) => panic!("rejected: {rejection}"),
//! }
//! ```

mod chunk_line;
mod chunked;
mod phase;
mod reader;

// 公開 API
pub use chunk_line::{ChunkExtension, ChunkLine};
pub use chunked::{ChunkDecoder, DecodeOutcome, Decoded, Rejection};
