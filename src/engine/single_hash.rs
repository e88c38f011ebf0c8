// SingleHashステージ - アイテムごとの2部構成ハッシュ

use super::stage::{DigestGate, PipelineStage};
use crate::core::{PipelineError, PipelineItem, PipelineResult};
use crate::signer::SignerBackend;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// SingleHashのデフォルト区切り文字
pub const DEFAULT_PAIR_SEPARATOR: &str = "~";

/// 数値アイテムごとに `fast(s) ~ fast(slow(s))` を計算するステージ
///
/// 入力アイテムはそれぞれ独立したワーカータスクで並列処理される。
/// 出力順序は入力順序と一致しない（下流はソートで復元する）。
pub struct SingleHashStage<S> {
    signer: Arc<S>,
    gate: DigestGate,
    limiter: Arc<Semaphore>,
    separator: String,
}

impl<S> SingleHashStage<S>
where
    S: SignerBackend + 'static,
{
    pub fn new(signer: Arc<S>, max_concurrent_tasks: usize) -> Self {
        Self {
            signer,
            gate: DigestGate::new(),
            limiter: Arc::new(Semaphore::new(max_concurrent_tasks.max(1))),
            separator: DEFAULT_PAIR_SEPARATOR.to_string(),
        }
    }

    /// 区切り文字を変更する
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

#[async_trait]
impl<S> PipelineStage for SingleHashStage<S>
where
    S: SignerBackend + 'static,
{
    fn name(&self) -> &'static str {
        "single_hash"
    }

    async fn run(
        &self,
        mut input: mpsc::UnboundedReceiver<PipelineItem>,
        output: mpsc::UnboundedSender<PipelineItem>,
    ) -> PipelineResult<()> {
        let mut handles = Vec::new();

        while let Some(item) = input.recv().await {
            let value = item.into_number()?;

            let signer = Arc::clone(&self.signer);
            let gate = self.gate.clone();
            let limiter = Arc::clone(&self.limiter);
            let separator = self.separator.clone();
            let output = output.clone();

            // アイテムごとに1ワーカー
            handles.push(tokio::spawn(async move {
                let _permit = limiter
                    .acquire_owned()
                    .await
                    .map_err(|e| PipelineError::internal(anyhow::anyhow!("Semaphore error: {e}")))?;

                let data = value.to_string();

                // 左右を並行計算。右側のslow_digestだけゲートで直列化
                let left_fut = signer.fast_checksum(&data);
                let right_fut = async {
                    let digest = gate.serialized_digest(signer.as_ref(), &data).await?;
                    Ok::<String, PipelineError>(signer.fast_checksum(&digest).await)
                };
                let (left, right) = tokio::join!(left_fut, right_fut);
                let right = right?;

                output
                    .send(PipelineItem::Text(format!("{left}{separator}{right}")))
                    .map_err(|_| PipelineError::channel_closed("single_hash"))?;

                Ok::<(), PipelineError>(())
            }));
        }

        // 入力枯渇後、全ワーカーの完了を待つ
        for handle in handles {
            handle.await??;
        }

        Ok(())
    }
}
