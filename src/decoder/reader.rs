//! 入力元からの読み取り
//!
//! `std::io::Read` が 0 を返した場合は入力の終わりとみなし、
//! デコード途中であれば `Error::UnexpectedEof` にする。

use std::io::{ErrorKind, Read};

use crate::error::Error;

use super::phase::DecodePhase;

/// 入力元を前方向にだけ読み進めるリーダー
pub(crate) struct SourceReader<'s, R: ?Sized> {
    inner: &'s mut R,
    consumed: u64,
}

impl<'s, R: Read + ?Sized> SourceReader<'s, R> {
    pub fn new(inner: &'s mut R) -> Self {
        Self { inner, consumed: 0 }
    }

    /// これまでに読み取ったバイト数
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// 1 回だけ read する (Interrupted は再試行)
    pub fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        loop {
            match self.inner.read(buf) {
                Ok(n) => {
                    self.consumed += n as u64;
                    return Ok(n);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// 1 バイト読む
    pub fn read_byte(&mut self, phase: DecodePhase) -> Result<u8, Error> {
        let mut byte = [0u8; 1];
        if self.read_some(&mut byte)? == 0 {
            return Err(Error::UnexpectedEof(phase.describe()));
        }
        Ok(byte[0])
    }

    /// LF までを 1 バイトずつ読み、LF を除いた行を返す
    ///
    /// LF 直前の CR は行に残る。
    pub fn read_line(&mut self, phase: DecodePhase, limit: usize) -> Result<Vec<u8>, Error> {
        let mut line = Vec::new();
        loop {
            let byte = self.read_byte(phase)?;
            if byte == b'\n' {
                return Ok(line);
            }
            if line.len() >= limit {
                return Err(Error::ChunkLineTooLong {
                    size: line.len() + 1,
                    limit,
                });
            }
            line.push(byte);
        }
    }

    /// LF までを読み捨て、捨てたバイト数 (LF を除く) を返す
    pub fn skip_line(&mut self, phase: DecodePhase, limit: usize) -> Result<usize, Error> {
        let mut skipped = 0;
        loop {
            if self.read_byte(phase)? == b'\n' {
                return Ok(skipped);
            }
            if skipped >= limit {
                return Err(Error::ChunkLineTooLong {
                    size: skipped + 1,
                    limit,
                });
            }
            skipped += 1;
        }
    }

    /// ちょうど `n` バイトを値に関係なく読み捨てる
    pub fn skip_exact(&mut self, phase: DecodePhase, n: usize) -> Result<(), Error> {
        for _ in 0..n {
            self.read_byte(phase)?;
        }
        Ok(())
    }

    /// `buf` が埋まるまで読む
    ///
    /// 部分的な read は繰り返し、read ごとに `on_read(読んだバイト数, 累計)` を呼ぶ。
    pub fn fill(
        &mut self,
        buf: &mut [u8],
        phase: DecodePhase,
        mut on_read: impl FnMut(usize, usize),
    ) -> Result<(), Error> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read_some(&mut buf[filled..])?;
            if n == 0 {
                return Err(Error::UnexpectedEof(phase.describe()));
            }
            filled += n;
            on_read(n, filled);
        }
        Ok(())
    }
}
