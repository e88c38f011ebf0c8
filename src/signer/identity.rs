// テスト用の恒等署名バックエンド

use super::SignerBackend;
use async_trait::async_trait;

/// 入力をそのまま返すバックエンド（テスト・ベンチマーク用）
///
/// 出力が入力から目視で予測できるため、ステージの合成規則を
/// 正確に検証するテストで使用する。
#[derive(Debug, Default, Clone)]
pub struct IdentitySigner;

impl IdentitySigner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignerBackend for IdentitySigner {
    async fn fast_checksum(&self, data: &str) -> String {
        data.to_string()
    }

    async fn slow_digest(&self, data: &str) -> String {
        data.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identity_passes_input_through() {
        let signer = IdentitySigner::new();

        assert_eq!(signer.fast_checksum("abc").await, "abc");
        assert_eq!(signer.slow_digest("abc").await, "abc");
    }
}
