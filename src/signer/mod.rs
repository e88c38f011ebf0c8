// ハッシュプリミティブのバックエンド抽象化

use async_trait::async_trait;
use mockall::automock;

pub mod crc32_md5;
pub mod identity;

pub use crc32_md5::Crc32Md5Signer;
pub use identity::IdentitySigner;

/// 署名バックエンドのトレイト
///
/// 2つの独立したハッシュプリミティブを提供する。
/// どちらも入力に対して決定的な純粋関数であること。
#[automock]
#[async_trait]
pub trait SignerBackend: Send + Sync {
    /// 高速チェックサム - 同期なしで並列呼び出し可能
    async fn fast_checksum(&self, data: &str) -> String;

    /// 低速ダイジェスト - 必ず直列化ゲート越しに呼び出すこと
    ///
    /// プロセス全体で同時実行は1呼び出しまで。直列化は呼び出し側
    /// （SingleHashステージのDigestGate）が保証する。
    async fn slow_digest(&self, data: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_signer_backend() {
        let mut signer = MockSignerBackend::new();
        signer
            .expect_fast_checksum()
            .returning(|data| format!("fast:{data}"));
        signer
            .expect_slow_digest()
            .returning(|data| format!("slow:{data}"));

        assert_eq!(signer.fast_checksum("1").await, "fast:1");
        assert_eq!(signer.slow_digest("1").await, "slow:1");
    }
}
