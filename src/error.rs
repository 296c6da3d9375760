use std::fmt;

/// chunked デコードエラー
#[derive(Debug)]
pub enum Error {
    /// 入力元の I/O エラー
    Io(std::io::Error),
    /// 入力バイト列が空
    EmptyInput,
    /// 不正なデータ
    InvalidData(String),
    /// チャンクサイズが 16 進数として解釈できない
    InvalidChunkSize(String),
    /// 入力が途中で終わった (引数はデコード中だった箇所)
    UnexpectedEof(&'static str),
    /// チャンクサイズ行が長すぎる
    ChunkLineTooLong { size: usize, limit: usize },
    /// チャンク拡張の数が多すぎる
    TooManyExtensions { count: usize, limit: usize },
    /// ボディサイズ超過
    ///
    /// `remaining` は上限までに残っているバイト数
    BodyTooLarge { chunk_size: u64, remaining: u64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::EmptyInput => write!(f, "empty input"),
            Error::InvalidData(msg) => write!(f, "invalid data: {}", msg),
            Error::InvalidChunkSize(token) => write!(f, "invalid chunk size: {:?}", token),
            Error::UnexpectedEof(phase) => {
                write!(f, "unexpected end of stream while reading {}", phase)
            }
            Error::ChunkLineTooLong { size, limit } => {
                write!(f, "chunk line too long: {} > {}", size, limit)
            }
            Error::TooManyExtensions { count, limit } => {
                write!(f, "too many chunk extensions: {} > {}", count, limit)
            }
            Error::BodyTooLarge {
                chunk_size,
                remaining,
            } => write!(
                f,
                "body too large: chunk size {} exceeds remaining body limit {}",
                chunk_size, remaining
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
