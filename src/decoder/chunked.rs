//! chunked デコーダーの定義

use std::fmt;
use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::error::Error;
use crate::limits::DecoderLimits;

use super::chunk_line::{ChunkExtension, ChunkLine};
use super::phase::DecodePhase;
use super::reader::SourceReader;

type ExtensionHook<'a> = Box<dyn FnMut(&ChunkExtension, &[u8]) -> bool + 'a>;
type ChunkHook<'a> = Box<dyn FnMut(&[u8]) -> bool + 'a>;
type LogSink<'a> = Box<dyn FnMut(&str) + 'a>;

/// デコード結果
#[derive(Debug)]
pub enum DecodeOutcome<T> {
    /// 終端チャンクまでデコードできた
    Complete(T),
    /// コールバックが処理を拒否した
    ///
    /// デコード済みのデータは破棄される。
    Rejected(Rejection),
}

impl<T> DecodeOutcome<T> {
    /// 完了したか確認
    pub fn is_complete(&self) -> bool {
        matches!(self, DecodeOutcome::Complete(_))
    }

    /// 完了していれば結果を取り出す
    pub fn complete(self) -> Option<T> {
        match self {
            DecodeOutcome::Complete(value) => Some(value),
            DecodeOutcome::Rejected(_) => None,
        }
    }

    /// 拒否されていれば理由を取り出す
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            DecodeOutcome::Complete(_) => None,
            DecodeOutcome::Rejected(rejection) => Some(rejection),
        }
    }

    /// 完了時の結果を変換する。拒否はそのまま引き継ぐ
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DecodeOutcome<U> {
        match self {
            DecodeOutcome::Complete(value) => DecodeOutcome::Complete(f(value)),
            DecodeOutcome::Rejected(rejection) => DecodeOutcome::Rejected(rejection),
        }
    }
}

/// どのコールバックが拒否したか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// チャンク拡張コールバックが拒否した
    Extension { name: String, chunk_index: usize },
    /// チャンクコールバックが拒否した
    Chunk { chunk_index: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Extension { name, chunk_index } => {
                write!(f, "chunk extension {:?} rejected at chunk {}", name, chunk_index)
            }
            Rejection::Chunk { chunk_index } => write!(f, "chunk {} rejected", chunk_index),
        }
    }
}

/// デコード済みのボディ
#[derive(Debug)]
pub struct Decoded {
    /// デコードしたボディの長さ (全チャンクサイズの合計)
    pub content_length: u64,
    /// 終端チャンクを除いたチャンク数
    pub chunk_count: usize,
    /// 入力元から読み取ったバイト数
    pub consumed: u64,
    /// デコードしたボディ (先頭に位置付け済み)
    pub body: Cursor<Vec<u8>>,
}

impl Decoded {
    /// ボディをバイト列として取り出す
    pub fn into_bytes(self) -> Vec<u8> {
        self.body.into_inner()
    }
}

/// デバッグログの出力先
struct DebugLog<'a> {
    enabled: bool,
    sink: Option<LogSink<'a>>,
}

impl DebugLog<'_> {
    /// 有効な場合のみメッセージを組み立てて出力する
    fn emit(&mut self, message: impl FnOnce() -> String) {
        if !self.enabled {
            return;
        }
        let message = message();
        match self.sink.as_mut() {
            Some(sink) => sink(&message),
            None => log::debug!(target: "shiguredo_chunked", "{}", message),
        }
    }
}

/// chunked 転送コーディングのデコーダー
///
/// 入力元 ([`Read`]) から 1 メッセージ分を読み取り、チャンクを結合したボディを返す。
///
/// ```rust
/// use shiguredo_chunked::{ChunkDecoder, DecodeOutcome};
///
/// let mut decoder = ChunkDecoder::new();
/// let outcome = decoder.decode_bytes(b"5\r\nhello\r\n0\r\n\r\n").unwrap();
/// assert!(matches!(outcome, DecodeOutcome::Complete(ref body) if body == b"hello"));
/// ```
pub struct ChunkDecoder<'a> {
    limits: DecoderLimits,
    on_extension: Option<ExtensionHook<'a>>,
    on_chunk: Option<ChunkHook<'a>>,
    log: DebugLog<'a>,
}

impl Default for ChunkDecoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChunkDecoder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkDecoder")
            .field("limits", &self.limits)
            .field("on_extension", &self.on_extension.is_some())
            .field("on_chunk", &self.on_chunk.is_some())
            .field("debug", &self.log.enabled)
            .finish()
    }
}

impl<'a> ChunkDecoder<'a> {
    /// 新しいデコーダーを作成
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default())
    }

    /// 制限付きでデコーダーを作成
    pub fn with_limits(limits: DecoderLimits) -> Self {
        Self {
            limits,
            on_extension: None,
            on_chunk: None,
            log: DebugLog {
                enabled: false,
                sink: None,
            },
        }
    }

    /// 制限設定を取得
    pub fn limits(&self) -> &DecoderLimits {
        &self.limits
    }

    /// チャンク拡張ごとに呼ばれるコールバックを設定
    ///
    /// 拡張とチャンクデータを受け取り、`false` を返すとデコードを中止する。
    /// 同じチャンクの [`on_chunk`](Self::on_chunk) より先に、宣言順に呼ばれる。
    pub fn on_extension<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&ChunkExtension, &[u8]) -> bool + 'a,
    {
        self.on_extension = Some(Box::new(hook));
        self
    }

    /// チャンクごとに呼ばれるコールバックを設定
    ///
    /// チャンクデータを受け取り、`false` を返すとデコードを中止する。
    pub fn on_chunk<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&[u8]) -> bool + 'a,
    {
        self.on_chunk = Some(Box::new(hook));
        self
    }

    /// デバッグログを有効化
    pub fn debug(mut self, enabled: bool) -> Self {
        self.log.enabled = enabled;
        self
    }

    /// デバッグログの有効/無効を切り替える
    pub fn set_debug(&mut self, enabled: bool) {
        self.log.enabled = enabled;
    }

    /// デバッグログの出力先を設定
    ///
    /// 未設定の場合は `log::debug!` に出力する。
    pub fn log_sink<F>(mut self, sink: F) -> Self
    where
        F: FnMut(&str) + 'a,
    {
        self.log.sink = Some(Box::new(sink));
        self
    }

    /// バイト列をデコード
    ///
    /// 空の入力は [`Error::EmptyInput`] になる。
    pub fn decode_bytes(&mut self, data: &[u8]) -> Result<DecodeOutcome<Vec<u8>>, Error> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut source = Cursor::new(data);
        Ok(self.decode(&mut source)?.map(Decoded::into_bytes))
    }

    /// 入力元を先頭に戻してからデコード
    pub fn decode_from_start<R: Read + Seek + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<DecodeOutcome<Decoded>, Error> {
        source.seek(SeekFrom::Start(0))?;
        self.decode(source)
    }

    /// 入力元の現在位置から終端チャンクまでをデコード
    ///
    /// 終端チャンク `0` の行の後は、値に関係なくちょうど 2 バイト (CRLF) を読み捨てる。
    /// それ以降のデータは入力元に残る。
    pub fn decode<R: Read + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<DecodeOutcome<Decoded>, Error> {
        let mut reader = SourceReader::new(source);
        let mut body = Vec::new();
        let mut content_length: u64 = 0;
        let mut chunk_count = 0;
        let mut extensions = Vec::new();
        let mut phase = DecodePhase::ChunkSize;

        loop {
            match phase {
                DecodePhase::ChunkSize => {
                    self.log.emit(|| "reading chunk size line".to_string());
                    let raw = reader.read_line(phase, self.limits.max_chunk_line_size)?;
                    let line = String::from_utf8(raw).map_err(|e| {
                        Error::InvalidData(format!("invalid UTF-8 in chunk size line: {e}"))
                    })?;
                    self.log
                        .emit(|| format!("| chunk size line: {:?}", line.trim()));

                    let line = ChunkLine::parse(&line, &self.limits)?;
                    for extension in &line.extensions {
                        self.log.emit(|| {
                            format!(
                                "| extension {}: {}",
                                extension.name,
                                extension.value.as_deref().unwrap_or("null")
                            )
                        });
                    }

                    if line.is_last() {
                        self.log.emit(|| "end of message detected".to_string());
                        phase = DecodePhase::LastChunkCrlf;
                        continue;
                    }

                    // content_length は常に上限以下
                    let remaining =
                        (self.limits.max_body_size as u64).saturating_sub(content_length);
                    let too_large = Error::BodyTooLarge {
                        chunk_size: line.size,
                        remaining,
                    };
                    if line.size > remaining {
                        return Err(too_large);
                    }
                    let size = usize::try_from(line.size).map_err(|_| too_large)?;

                    self.log
                        .emit(|| format!("reading chunk data of length {}", size));
                    extensions = line.extensions;
                    phase = DecodePhase::ChunkData { size };
                }
                DecodePhase::ChunkData { size } => {
                    let mut segment = vec![0u8; size];
                    let log = &mut self.log;
                    reader.fill(&mut segment, phase, |n, filled| {
                        log.emit(|| format!("| read {} bytes ({}/{})", n, filled, size));
                    })?;

                    if let Some(hook) = self.on_extension.as_mut() {
                        for extension in &extensions {
                            if !hook(extension, &segment) {
                                self.log.emit(|| {
                                    format!(
                                        "*** failed to process extension {}, exiting",
                                        extension.name
                                    )
                                });
                                return Ok(DecodeOutcome::Rejected(Rejection::Extension {
                                    name: extension.name.clone(),
                                    chunk_index: chunk_count,
                                }));
                            }
                        }
                    }

                    if let Some(hook) = self.on_chunk.as_mut() {
                        if !hook(&segment) {
                            self.log.emit(|| "*** failed to process chunk".to_string());
                            return Ok(DecodeOutcome::Rejected(Rejection::Chunk {
                                chunk_index: chunk_count,
                            }));
                        }
                    }

                    body.extend_from_slice(&segment);
                    content_length += size as u64;
                    chunk_count += 1;
                    self.log
                        .emit(|| format!("| content length is now {}", content_length));
                    phase = DecodePhase::ChunkDataLf;
                }
                DecodePhase::ChunkDataLf => {
                    reader.skip_line(phase, self.limits.max_chunk_line_size)?;
                    phase = DecodePhase::ChunkSize;
                }
                DecodePhase::LastChunkCrlf => {
                    reader.skip_exact(phase, 2)?;
                    phase = DecodePhase::Complete;
                }
                DecodePhase::Complete => break,
            }
        }

        Ok(DecodeOutcome::Complete(Decoded {
            content_length,
            chunk_count,
            consumed: reader.consumed(),
            body: Cursor::new(body),
        }))
    }
}
