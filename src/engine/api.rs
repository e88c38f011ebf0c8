// 高レベル公開API
// 正準の3ステージ構成を簡単に実行するための便利な関数

use super::{CombineStage, MultiHashStage, PipelineExecutor, PipelineStage, SingleHashStage};
use crate::core::{PipelineConfig, PipelineItem, PipelineResult, ProgressReporter};
use crate::services::NoOpProgressReporter;
use crate::signer::{Crc32Md5Signer, SignerBackend};
use crate::DefaultPipelineConfig;
use std::sync::Arc;

/// 正準のステージ列を構築する: SingleHash → MultiHash → CombineResults
pub fn build_signer_stages<S, C>(
    signer: Arc<S>,
    config: &C,
) -> PipelineResult<Vec<Box<dyn PipelineStage>>>
where
    S: SignerBackend + 'static,
    C: PipelineConfig,
{
    let max_concurrent = config.max_concurrent_tasks();

    Ok(vec![
        Box::new(SingleHashStage::new(Arc::clone(&signer), max_concurrent)),
        Box::new(MultiHashStage::new(
            signer,
            config.fan_out_width(),
            max_concurrent,
        )?),
        Box::new(CombineStage::new()),
    ])
}

/// 任意のバックエンド・設定・レポーターで数値列に署名する
pub async fn sign_numbers_with<S, C, R>(
    inputs: &[i64],
    signer: Arc<S>,
    config: &C,
    reporter: Arc<R>,
) -> PipelineResult<String>
where
    S: SignerBackend + 'static,
    C: PipelineConfig,
    R: ProgressReporter + 'static,
{
    let stages = build_signer_stages(signer, config)?;
    let source: Vec<PipelineItem> = inputs.iter().copied().map(PipelineItem::Number).collect();

    PipelineExecutor::new(reporter)
        .execute_to_string(stages, source)
        .await
}

/// デフォルト構成で数値列に署名する
///
/// CRC32+MD5バックエンド、デフォルト設定、進捗報告なし。
pub async fn sign_numbers(inputs: &[i64]) -> PipelineResult<String> {
    sign_numbers_with(
        inputs,
        Arc::new(Crc32Md5Signer::new()),
        &DefaultPipelineConfig::default(),
        Arc::new(NoOpProgressReporter::new()),
    )
    .await
}
