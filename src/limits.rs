/// デコーダーの制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderLimits {
    /// 最大チャンクサイズ行長 (デフォルト: 4KB)
    ///
    /// チャンク拡張 (例: `chunk-signature=<64 桁の 16 進数>`) を含むため、
    /// サイズだけの行よりも大きめに取っている。
    /// チャンクデータ後の改行までに読み捨てるバイト数にも適用する。
    pub max_chunk_line_size: usize,
    /// 1 行あたりの最大チャンク拡張数 (デフォルト: 64)
    pub max_extensions: usize,
    /// 最大ボディサイズ (デフォルト: 10MB)
    ///
    /// 宣言されたチャンクサイズでバッファを確保する前に検査する。
    pub max_body_size: usize,
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_chunk_line_size: 4 * 1024,   // 4KB
            max_extensions: 64,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl DecoderLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_chunk_line_size: usize::MAX,
            max_extensions: usize::MAX,
            max_body_size: usize::MAX,
        }
    }
}
