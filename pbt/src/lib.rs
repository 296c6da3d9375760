//! PBT テスト共通ユーティリティ

use std::io::Read;

use proptest::prelude::*;

// ========================================
// トークン生成
// ========================================

/// チャンク拡張名に使う文字
pub fn token_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('.'),
    ]
}

/// 1 文字以上のトークン
pub fn token_string(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(token_char(), 1..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// 拡張値: 空文字列や `=` を含みうる
pub fn extension_value() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![4 => token_char(), 1 => Just('=')], 0..=32)
        .prop_map(|chars| chars.into_iter().collect())
}

// ========================================
// 入力元
// ========================================

/// 1 回の read で最大 `step` バイトしか返さない入力元
#[derive(Debug)]
pub struct SplitReader<'a> {
    pub data: &'a [u8],
    pub step: usize,
}

impl<'a> SplitReader<'a> {
    pub fn new(data: &'a [u8], step: usize) -> Self {
        Self { data, step }
    }
}

impl Read for SplitReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.step).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}
