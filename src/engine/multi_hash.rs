// MultiHashステージ - アイテムごとの固定幅ファンアウトハッシュ

use super::stage::PipelineStage;
use crate::core::{PipelineError, PipelineItem, PipelineResult};
use crate::signer::SignerBackend;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// MultiHashのデフォルトファンアウト幅
pub const DEFAULT_FAN_OUT_WIDTH: usize = 6;

/// 文字列アイテムごとにN個の添字付きチェックサムを並列計算し、
/// 添字昇順（完了順ではない）で連結するステージ
pub struct MultiHashStage<S> {
    signer: Arc<S>,
    fan_out_width: usize,
    limiter: Arc<Semaphore>,
}

impl<S> std::fmt::Debug for MultiHashStage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiHashStage")
            .field("fan_out_width", &self.fan_out_width)
            .finish_non_exhaustive()
    }
}

impl<S> MultiHashStage<S>
where
    S: SignerBackend + 'static,
{
    pub fn new(
        signer: Arc<S>,
        fan_out_width: usize,
        max_concurrent_tasks: usize,
    ) -> PipelineResult<Self> {
        if fan_out_width == 0 {
            return Err(PipelineError::configuration(
                "ファンアウト幅は1以上である必要があります",
            ));
        }

        Ok(Self {
            signer,
            fan_out_width,
            limiter: Arc::new(Semaphore::new(max_concurrent_tasks.max(1))),
        })
    }
}

#[async_trait]
impl<S> PipelineStage for MultiHashStage<S>
where
    S: SignerBackend + 'static,
{
    fn name(&self) -> &'static str {
        "multi_hash"
    }

    async fn run(
        &self,
        mut input: mpsc::UnboundedReceiver<PipelineItem>,
        output: mpsc::UnboundedSender<PipelineItem>,
    ) -> PipelineResult<()> {
        let mut handles = Vec::new();

        while let Some(item) = input.recv().await {
            let text = item.into_text()?;

            let signer = Arc::clone(&self.signer);
            let limiter = Arc::clone(&self.limiter);
            let width = self.fan_out_width;
            let output = output.clone();

            handles.push(tokio::spawn(async move {
                let _permit = limiter
                    .acquire_owned()
                    .await
                    .map_err(|e| PipelineError::internal(anyhow::anyhow!("Semaphore error: {e}")))?;

                // 添字ごとのサブタスクを生成
                let mut sub_handles = Vec::with_capacity(width);
                for index in 0..width {
                    let signer = Arc::clone(&signer);
                    let data = format!("{index}{text}");
                    sub_handles.push(tokio::spawn(
                        async move { signer.fast_checksum(&data).await },
                    ));
                }

                // 完了順ではなく生成（添字）順にawaitして連結する
                let mut combined = String::new();
                for sub_handle in sub_handles {
                    combined.push_str(&sub_handle.await?);
                }

                output
                    .send(PipelineItem::Text(combined))
                    .map_err(|_| PipelineError::channel_closed("multi_hash"))?;

                Ok::<(), PipelineError>(())
            }));
        }

        for handle in handles {
            handle.await??;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::IdentitySigner;
    use tokio::time::{sleep, Duration};

    async fn run_stage<S>(
        stage: MultiHashStage<S>,
        items: Vec<PipelineItem>,
    ) -> PipelineResult<Vec<String>>
    where
        S: SignerBackend + 'static,
    {
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();

        for item in items {
            in_tx.send(item).unwrap();
        }
        drop(in_tx);

        stage.run(in_rx, out_tx).await?;

        let mut results = Vec::new();
        while let Some(item) = out_rx.recv().await {
            results.push(item.into_text()?);
        }
        Ok(results)
    }

    #[tokio::test]
    async fn test_multi_hash_identity_stub_width_two() {
        let stage = MultiHashStage::new(Arc::new(IdentitySigner::new()), 2, 4).unwrap();

        let results = run_stage(stage, vec![PipelineItem::Text("0~0".to_string())])
            .await
            .unwrap();

        // 恒等スタブでは "0" + "0~0" と "1" + "0~0" の連結
        assert_eq!(results, vec!["00~010~0".to_string()]);
    }

    /// 添字が小さいほど遅く完了するバックエンド
    ///
    /// 完了順連結なら出力が逆順になるため、添字順保証の検証に使う。
    #[derive(Default)]
    struct ReverseDelaySigner;

    #[async_trait]
    impl SignerBackend for ReverseDelaySigner {
        async fn fast_checksum(&self, data: &str) -> String {
            let index = data
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .unwrap_or(0) as u64;
            sleep(Duration::from_millis((9 - index.min(9)) * 10)).await;
            data.to_string()
        }

        async fn slow_digest(&self, data: &str) -> String {
            data.to_string()
        }
    }

    #[tokio::test]
    async fn test_multi_hash_concatenates_in_index_order() {
        let stage = MultiHashStage::new(Arc::new(ReverseDelaySigner), 4, 4).unwrap();

        let results = run_stage(stage, vec![PipelineItem::Text("x".to_string())])
            .await
            .unwrap();

        // 添字0が最後に完了しても連結は 0,1,2,3 の順
        assert_eq!(results, vec!["0x1x2x3x".to_string()]);
    }

    #[tokio::test]
    async fn test_multi_hash_zero_width_is_configuration_error() {
        let error = MultiHashStage::new(Arc::new(IdentitySigner::new()), 0, 4).unwrap_err();
        assert!(error.to_string().contains("設定エラー"));
    }

    #[tokio::test]
    async fn test_multi_hash_rejects_number_item() {
        let stage = MultiHashStage::new(Arc::new(IdentitySigner::new()), 2, 4).unwrap();

        let error = run_stage(stage, vec![PipelineItem::Number(1)])
            .await
            .unwrap_err();
        assert!(error.to_string().contains("型不一致エラー"));
    }

    #[tokio::test]
    async fn test_multi_hash_processes_multiple_items() {
        let stage = MultiHashStage::new(Arc::new(IdentitySigner::new()), 3, 4).unwrap();

        let mut results = run_stage(
            stage,
            vec![
                PipelineItem::Text("a".to_string()),
                PipelineItem::Text("b".to_string()),
            ],
        )
        .await
        .unwrap();

        results.sort();
        assert_eq!(results, vec!["0a1a2a".to_string(), "0b1b2b".to_string()]);
    }
}
