//! # shiguredo_chunked
//!
//! HTTP chunked 転送コーディングのデコーダー
//!
//! ## 特徴
//!
//! - **ストリーミング**: `std::io::Read` から 1 バイトずつサイズ行を読み、チャンクを結合する
//! - **チャンク拡張**: `;name=value` 形式の拡張をパースし、コールバックに渡す
//! - **検証フック**: 拡張ごと、チャンクごとのコールバックで処理を中止できる
//! - **制限**: サイズ行長、拡張数、ボディサイズを制限できる
//!
//! エンコード、ヘッダーやトレーラーフィールドの解釈は扱わない。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_chunked::ChunkDecoder;
//!
//! let data = b"6;chunk-signature=foobar;joelio;anotherone\r\nHello \r\n\
//!              5;chunk-signature=whatsup;watson;yetanotherone=hello\r\nWorld\r\n\
//!              0\r\n\r\n";
//!
//! let mut decoder = ChunkDecoder::new()
//!     .on_extension(|extension, _data| {
//!         // 署名の検証など
//!         extension.name != "chunk-signature" || extension.value.is_some()
//!     });
//!
//! let body = decoder.decode_bytes(data).unwrap().complete().unwrap();
//! assert_eq!(body, b"Hello World");
//! ```

mod decoder;
mod error;
mod limits;

pub use decoder::{ChunkDecoder, ChunkExtension, ChunkLine, DecodeOutcome, Decoded, Rejection};
pub use error::Error;
pub use limits::DecoderLimits;
