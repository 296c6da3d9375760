//! デコード状態の定義

/// デコード状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecodePhase {
    /// チャンクサイズ行待ち
    ChunkSize,
    /// チャンクデータ待ち
    ChunkData { size: usize },
    /// チャンクデータ後の LF 待ち
    ChunkDataLf,
    /// 終端チャンク後の 2 バイト待ち
    LastChunkCrlf,
    /// 完了
    Complete,
}

impl DecodePhase {
    /// エラーメッセージ用の名前
    pub(crate) fn describe(self) -> &'static str {
        match self {
            DecodePhase::ChunkSize => "chunk size line",
            DecodePhase::ChunkData { .. } => "chunk data",
            DecodePhase::ChunkDataLf => "line terminator after chunk data",
            DecodePhase::LastChunkCrlf => "final CRLF",
            DecodePhase::Complete => "end of message",
        }
    }
}
