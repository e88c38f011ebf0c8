// 進捗監視の具象実装

use crate::core::ProgressReporter;
use async_trait::async_trait;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, stage_count: usize, source_items: usize) {
        if !self.quiet {
            println!("🚀 Starting pipeline: {stage_count} stages, {source_items} source items...");
        }
    }

    async fn report_stage_finished(&self, stage_name: &str) {
        if !self.quiet {
            println!("📊 Stage finished: {stage_name}");
        }
    }

    async fn report_completed(&self, final_items: usize, duration_ms: u64) {
        if !self.quiet {
            println!("✅ Completed! Final items: {final_items}, took {duration_ms}ms");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _stage_count: usize, _source_items: usize) {}

    async fn report_stage_finished(&self, _stage_name: &str) {}

    async fn report_completed(&self, _final_items: usize, _duration_ms: u64) {}
}
