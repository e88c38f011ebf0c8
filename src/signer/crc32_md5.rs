// CRC32 + MD5による本番用署名バックエンド

use super::SignerBackend;
use async_trait::async_trait;
use md5::{Digest, Md5};

/// CRC32チェックサムとMD5ダイジェストの組み合わせ
///
/// 高速側はIEEE CRC32の10進文字列、低速側はMD5の16進文字列を返す。
#[derive(Debug, Default, Clone)]
pub struct Crc32Md5Signer;

impl Crc32Md5Signer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignerBackend for Crc32Md5Signer {
    async fn fast_checksum(&self, data: &str) -> String {
        crc32fast::hash(data.as_bytes()).to_string()
    }

    async fn slow_digest(&self, data: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(data.as_bytes());
        hex::encode(hasher.finalize())
    }
}
