// コアレイヤーのトレイト定義
// 設定と進捗報告の抽象化

use async_trait::async_trait;
use mockall::automock;

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// MultiHashステージのファンアウト幅を取得
    fn fan_out_width(&self) -> usize;

    /// ステージごとの最大同時実行ワーカー数を取得
    fn max_concurrent_tasks(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// 進捗報告を抽象化するトレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// パイプライン開始を報告
    async fn report_started(&self, stage_count: usize, source_items: usize);

    /// 1ステージの完了を報告
    async fn report_stage_finished(&self, stage_name: &str);

    /// パイプライン完了を報告
    async fn report_completed(&self, final_items: usize, duration_ms: u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pipeline_config() {
        let mut config = MockPipelineConfig::new();
        config.expect_fan_out_width().return_const(6usize);
        config.expect_max_concurrent_tasks().return_const(4usize);
        config.expect_enable_progress_reporting().return_const(true);

        assert_eq!(config.fan_out_width(), 6);
        assert_eq!(config.max_concurrent_tasks(), 4);
        assert!(config.enable_progress_reporting());
    }

    #[tokio::test]
    async fn test_mock_progress_reporter() {
        let mut reporter = MockProgressReporter::new();
        reporter
            .expect_report_started()
            .times(1)
            .return_const(());
        reporter
            .expect_report_stage_finished()
            .times(1)
            .return_const(());
        reporter
            .expect_report_completed()
            .times(1)
            .return_const(());

        reporter.report_started(3, 2).await;
        reporter.report_stage_finished("combine").await;
        reporter.report_completed(17, 5).await;
    }
}
