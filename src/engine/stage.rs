// ステージ契約と低速ダイジェストの直列化ゲート

use crate::core::{PipelineError, PipelineItem, PipelineResult};
use crate::signer::SignerBackend;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// パイプラインの1ステージ
///
/// 入力チャンネルを完全に消費してから終了すること。出力は入力の
/// 消費中から送信してよい。戻り値と同時に出力Senderがドロップされ、
/// それが下流への終端シグナルになる。
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// ステージ名（ログ・エラーメッセージ用）
    fn name(&self) -> &'static str;

    /// 入力を消費し、出力へ送信する
    async fn run(
        &self,
        input: mpsc::UnboundedReceiver<PipelineItem>,
        output: mpsc::UnboundedSender<PipelineItem>,
    ) -> PipelineResult<()>;
}

impl std::fmt::Debug for dyn PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineStage")
            .field("name", &self.name())
            .finish()
    }
}

/// 低速ダイジェストの直列化ゲート
///
/// プロセス全体で同時に1呼び出しだけを許可する単一パーミットの
/// セマフォ。1回のパイプライン実行中、SingleHashの全ワーカーで
/// 共有される。
#[derive(Debug, Clone)]
pub struct DigestGate {
    permit: Arc<Semaphore>,
}

impl DigestGate {
    pub fn new() -> Self {
        Self {
            permit: Arc::new(Semaphore::new(1)),
        }
    }

    /// パーミット取得下でslow_digestを呼び出す
    ///
    /// パーミットは呼び出しの直前に取得し、直後に解放する。
    pub async fn serialized_digest<S: SignerBackend>(
        &self,
        signer: &S,
        data: &str,
    ) -> PipelineResult<String> {
        let _permit = self
            .permit
            .acquire()
            .await
            .map_err(|e| PipelineError::internal(anyhow::anyhow!("Semaphore error: {e}")))?;
        Ok(signer.slow_digest(data).await)
    }
}

impl Default for DigestGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{sleep, Duration};

    /// 同時実行数を計測する検証用バックエンド
    #[derive(Default)]
    struct ProbeSigner {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl SignerBackend for ProbeSigner {
        async fn fast_checksum(&self, data: &str) -> String {
            data.to_string()
        }

        async fn slow_digest(&self, data: &str) -> String {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            // 重なりを観測しやすくするために少し待つ
            sleep(Duration::from_millis(10)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            data.to_string()
        }
    }

    #[tokio::test]
    async fn test_gate_serializes_slow_digest() {
        let signer = Arc::new(ProbeSigner::default());
        let gate = DigestGate::new();

        let mut handles = Vec::new();
        for i in 0..8 {
            let signer = Arc::clone(&signer);
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                gate.serialized_digest(signer.as_ref(), &i.to_string())
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // ゲート越しの呼び出しは常に最大1並列
        assert_eq!(signer.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gate_returns_digest_result() {
        let signer = ProbeSigner::default();
        let gate = DigestGate::new();

        let digest = gate.serialized_digest(&signer, "42").await.unwrap();
        assert_eq!(digest, "42");
    }
}
