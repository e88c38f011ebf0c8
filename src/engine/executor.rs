// Executor - ステージ配線とオーケストレーション
// チャンネルで受け渡しし、全タスクの終了まで呼び出し元をブロックする

use super::stage::PipelineStage;
use crate::core::{PipelineError, PipelineItem, PipelineResult, ProgressReporter};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// ステージ列を配線して実行するエグゼキュータ
pub struct PipelineExecutor<R> {
    reporter: Arc<R>,
}

impl<R> PipelineExecutor<R>
where
    R: ProgressReporter + 'static,
{
    pub fn new(reporter: Arc<R>) -> Self {
        Self { reporter }
    }

    /// ステージ列を実行し、最終ステージの全出力を返す
    ///
    /// ハンドオフごとに1本のunboundedチャンネルを張り、各ステージを
    /// 独立タスクとして起動する。全タスクが完全に終了するまで戻らない。
    /// いずれかのステージ／ワーカーが失敗した場合はErrを返し、部分的な
    /// 結果は決して返さない。
    pub async fn execute(
        &self,
        stages: Vec<Box<dyn PipelineStage>>,
        source: Vec<PipelineItem>,
    ) -> PipelineResult<Vec<PipelineItem>> {
        let start_time = Instant::now();
        let stage_names: Vec<&'static str> = stages.iter().map(|stage| stage.name()).collect();

        self.reporter
            .report_started(stages.len(), source.len())
            .await;

        // Producer起動 - ソースアイテムを先頭チャンネルへ配信
        let (source_tx, mut rx) = mpsc::unbounded_channel();
        let producer_handle = tokio::spawn(async move {
            for item in source {
                if source_tx.send(item).is_err() {
                    // 下流が先に終了した場合は正常終了
                    break;
                }
            }
        });

        // 各ステージを独立タスクとして起動
        let mut stage_handles = Vec::new();
        for stage in stages {
            let (tx, next_rx) = mpsc::unbounded_channel();
            let input = std::mem::replace(&mut rx, next_rx);
            stage_handles.push(tokio::spawn(async move { stage.run(input, tx).await }));
        }

        // 最終ステージの出力チャンネルが閉じるまで回収
        let mut outputs = Vec::new();
        while let Some(item) = rx.recv().await {
            outputs.push(item);
        }

        producer_handle.await?;

        // 全ステージの完了を待ち、最初の根本原因エラーを集約する
        let mut first_error: Option<PipelineError> = None;
        for (handle, name) in stage_handles.into_iter().zip(stage_names) {
            match handle.await {
                Ok(Ok(())) => self.reporter.report_stage_finished(name).await,
                Ok(Err(error)) => remember_error(&mut first_error, error),
                Err(join_error) => {
                    remember_error(&mut first_error, PipelineError::task(join_error))
                }
            }
        }

        if let Some(error) = first_error {
            return Err(error);
        }

        self.reporter
            .report_completed(outputs.len(), start_time.elapsed().as_millis() as u64)
            .await;

        Ok(outputs)
    }

    /// 最終出力がちょうど1つの文字列であることを要求する便利メソッド
    pub async fn execute_to_string(
        &self,
        stages: Vec<Box<dyn PipelineStage>>,
        source: Vec<PipelineItem>,
    ) -> PipelineResult<String> {
        let mut outputs = self.execute(stages, source).await?;

        if outputs.len() != 1 {
            return Err(PipelineError::configuration(format!(
                "最終ステージは1アイテムを出力するべきですが{}アイテムでした",
                outputs.len()
            )));
        }

        outputs.remove(0).into_text()
    }
}

/// 二次的なチャンネルエラーより根本原因を優先して記録する
///
/// 失敗したステージが入力を閉じると、上流は送信失敗（ChannelClosed）
/// で連鎖的に失敗する。呼び出し元に見せるのは根本原因の方。
fn remember_error(slot: &mut Option<PipelineError>, error: PipelineError) {
    let replace = match slot {
        None => true,
        Some(PipelineError::ChannelClosed { .. }) => {
            !matches!(error, PipelineError::ChannelClosed { .. })
        }
        Some(_) => false,
    };

    if replace {
        *slot = Some(error);
    }
}
