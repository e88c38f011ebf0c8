pub mod core;
pub mod engine;
pub mod services;
pub mod signer;

use crate::core::{PipelineConfig, PipelineResult, PipelineSummary, ProgressReporter};
use engine::sign_numbers_with;
use signer::{Crc32Md5Signer, SignerBackend};
use std::sync::Arc;
use std::time::Instant;

pub use engine::{sign_numbers, PipelineExecutor, PipelineStage};
pub use services::{ConsoleProgressReporter, DefaultPipelineConfig, NoOpProgressReporter};

// DIコンテナの役割を果たすジェネリックなApp構造体
// バックエンド・設定・レポーターを直接所有する設計
pub struct SignerApp<S, C, R>
where
    S: SignerBackend,
    C: PipelineConfig,
    R: ProgressReporter,
{
    signer: Arc<S>,
    config: C,
    reporter: Arc<R>,
}

impl SignerApp<Crc32Md5Signer, DefaultPipelineConfig, ConsoleProgressReporter> {
    /// デフォルト構成のAppを作成
    pub fn new() -> Self {
        Self {
            signer: Arc::new(Crc32Md5Signer::new()),
            config: DefaultPipelineConfig::default(),
            reporter: Arc::new(ConsoleProgressReporter::new()),
        }
    }
}

impl Default for SignerApp<Crc32Md5Signer, DefaultPipelineConfig, ConsoleProgressReporter> {
    fn default() -> Self {
        Self::new()
    }
}

impl SignerApp<Crc32Md5Signer, DefaultPipelineConfig, NoOpProgressReporter> {
    /// 静音版のAppを作成（バックグラウンド処理・テスト用）
    pub fn quiet() -> Self {
        Self {
            signer: Arc::new(Crc32Md5Signer::new()),
            config: DefaultPipelineConfig::default(),
            reporter: Arc::new(NoOpProgressReporter::new()),
        }
    }
}

impl<S, C, R> SignerApp<S, C, R>
where
    S: SignerBackend + 'static,
    C: PipelineConfig,
    R: ProgressReporter + 'static,
{
    /// 依存関係を注入してAppを作成（コンストラクタインジェクション）
    pub fn with_parts(signer: S, config: C, reporter: R) -> Self {
        Self {
            signer: Arc::new(signer),
            config,
            reporter: Arc::new(reporter),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 数値列に署名して最終文字列を返す
    pub async fn run(&self, inputs: &[i64]) -> PipelineResult<String> {
        sign_numbers_with(
            inputs,
            Arc::clone(&self.signer),
            &self.config,
            Arc::clone(&self.reporter),
        )
        .await
    }

    /// 署名と実行サマリーを返す
    pub async fn run_with_summary(
        &self,
        inputs: &[i64],
    ) -> PipelineResult<(String, PipelineSummary)> {
        let start_time = Instant::now();
        let signature = self.run(inputs).await?;

        let summary = PipelineSummary {
            stage_count: 3,
            source_items: inputs.len(),
            output_length: signature.len(),
            total_processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok((signature, summary))
    }
}
