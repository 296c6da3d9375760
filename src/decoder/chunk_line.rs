//! チャンクサイズ行の定義
//!
//! ```text
//! chunk-line = chunk-size *( ";" chunk-ext-name [ "=" chunk-ext-val ] ) LF
//! ```

use crate::error::Error;
use crate::limits::DecoderLimits;

/// チャンク拡張
///
/// `=` を含まないトークンは値なし (`None`) になる。
/// `key=a=b` のように `=` が複数ある場合は最初の `=` で分割し、値は `a=b` になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkExtension {
    /// 拡張名
    pub name: String,
    /// 拡張値
    pub value: Option<String>,
}

impl ChunkExtension {
    /// 値ありの拡張を作成
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// 値なしの拡張を作成
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// `;` で区切られた 1 トークンをパース
    ///
    /// 最初の `=` で 1 度だけ分割する。空白の除去や空の名前の検査はしない。
    pub fn parse(token: &str) -> Self {
        match token.split_once('=') {
            Some((name, value)) => Self::new(name, value),
            None => Self::flag(token),
        }
    }
}

/// パース済みのチャンクサイズ行
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChunkLine {
    /// 宣言されたチャンクサイズ
    pub size: u64,
    /// 宣言順のチャンク拡張
    pub extensions: Vec<ChunkExtension>,
}

impl ChunkLine {
    /// チャンクサイズ行をパース
    ///
    /// 行末の LF を含んでいてもよい。行全体の前後の空白 (CR を含む) とサイズの前後の空白は取り除くが、
    /// 拡張トークンはそのまま [`ChunkExtension::parse`] に渡す。
    /// `6;` や `6;;a` の空トークンは名前が空の値なし拡張になる。
    pub fn parse(line: &str, limits: &DecoderLimits) -> Result<Self, Error> {
        let line = line.trim();
        let mut tokens = line.split(';');
        let size = parse_chunk_size(tokens.next().unwrap_or_default().trim())?;

        let mut extensions = Vec::new();
        for token in tokens {
            if extensions.len() >= limits.max_extensions {
                return Err(Error::TooManyExtensions {
                    count: extensions.len() + 1,
                    limit: limits.max_extensions,
                });
            }
            extensions.push(ChunkExtension::parse(token));
        }

        Ok(Self { size, extensions })
    }

    /// 終端チャンクか確認
    pub fn is_last(&self) -> bool {
        self.size == 0
    }
}

/// チャンクサイズ (16 進数) をパース
///
/// 空文字列は 0 として扱う。`0x` / `0X` 接頭辞は受け付けるが、符号は受け付けない。
fn parse_chunk_size(token: &str) -> Result<u64, Error> {
    if token.is_empty() {
        return Ok(0);
    }
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidChunkSize(token.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| Error::InvalidChunkSize(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<ChunkLine, Error> {
        ChunkLine::parse(line, &DecoderLimits::default())
    }

    #[test]
    fn size_only() {
        let line = parse("1F\r\n").unwrap();
        assert_eq!(line.size, 0x1f);
        assert!(line.extensions.is_empty());
        assert!(!line.is_last());
    }

    #[test]
    fn lowercase_and_leading_zeros() {
        assert_eq!(parse("00ff").unwrap().size, 255);
    }

    #[test]
    fn empty_is_last_chunk() {
        assert!(parse("").unwrap().is_last());
        assert!(parse("\r\n").unwrap().is_last());
        assert!(parse(";foo=bar").unwrap().is_last());
    }

    #[test]
    fn signature_extensions() {
        let line = parse("6;chunk-signature=foobar;joelio;anotherone\r\n").unwrap();
        assert_eq!(line.size, 6);
        assert_eq!(
            line.extensions,
            vec![
                ChunkExtension::new("chunk-signature", "foobar"),
                ChunkExtension::flag("joelio"),
                ChunkExtension::flag("anotherone"),
            ]
        );
    }

    #[test]
    fn value_with_equals_is_kept_whole() {
        let line = parse("a;key=a=b").unwrap();
        assert_eq!(line.extensions, vec![ChunkExtension::new("key", "a=b")]);
    }

    #[test]
    fn empty_value() {
        let line = parse("1;key=").unwrap();
        assert_eq!(line.extensions, vec![ChunkExtension::new("key", "")]);
    }

    #[test]
    fn duplicate_names_are_kept_in_order() {
        let line = parse("1;a=1;a=2").unwrap();
        assert_eq!(
            line.extensions,
            vec![ChunkExtension::new("a", "1"), ChunkExtension::new("a", "2")]
        );
    }

    #[test]
    fn empty_tokens_are_nameless_flags() {
        let line = parse("1;;x;").unwrap();
        assert_eq!(
            line.extensions,
            vec![ChunkExtension::flag(""), ChunkExtension::flag("x"), ChunkExtension::flag("")]
        );
    }

    #[test]
    fn whitespace_inside_tokens_is_kept() {
        let line = parse(" 5 ;a = b \r\n").unwrap();
        assert_eq!(line.size, 5);
        assert_eq!(line.extensions, vec![ChunkExtension::new("a ", " b")]);
    }

    #[test]
    fn empty_name() {
        let line = parse("6;=x").unwrap();
        assert_eq!(line.extensions, vec![ChunkExtension::new("", "x")]);
    }

    #[test]
    fn hex_prefix() {
        assert_eq!(parse("0x10").unwrap().size, 16);
        assert_eq!(parse("0XfF;a").unwrap().size, 255);
        assert!(parse("0x0").unwrap().is_last());
    }

    #[test]
    fn invalid_size_error() {
        assert!(matches!(parse("xyz"), Err(Error::InvalidChunkSize(_))));
        assert!(matches!(parse("+5"), Err(Error::InvalidChunkSize(_))));
        assert!(matches!(parse("0x"), Err(Error::InvalidChunkSize(_))));
        assert!(matches!(parse("0x+1"), Err(Error::InvalidChunkSize(_))));
        assert!(matches!(parse("-1"), Err(Error::InvalidChunkSize(_))));
    }

    #[test]
    fn size_overflow_error() {
        assert!(parse("ffffffffffffffff").is_ok());
        assert!(matches!(
            parse("10000000000000000"),
            Err(Error::InvalidChunkSize(_))
        ));
    }

    #[test]
    fn too_many_extensions() {
        let limits = DecoderLimits {
            max_extensions: 2,
            ..DecoderLimits::default()
        };
        assert!(ChunkLine::parse("1;a;b", &limits).is_ok());
        assert!(matches!(
            ChunkLine::parse("1;a;b;c", &limits),
            Err(Error::TooManyExtensions { count: 3, limit: 2 })
        ));
    }
}
