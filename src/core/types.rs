// パイプラインを流れるデータ型定義

use crate::core::error::{PipelineError, PipelineResult};

/// ステージ間を流れるアイテム
///
/// ソースは数値、中間結果と最終結果は文字列。
/// ステージ境界では値コピーで受け渡し、参照共有はしない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineItem {
    Number(i64),
    Text(String),
}

impl PipelineItem {
    /// バリアント名を取得（エラーメッセージ用）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Text(_) => "Text",
        }
    }

    /// 数値として取り出す。型が違えば致命的な設定エラー
    pub fn into_number(self) -> PipelineResult<i64> {
        match self {
            Self::Number(value) => Ok(value),
            other => Err(PipelineError::type_mismatch("Number", other.kind())),
        }
    }

    /// 文字列として取り出す。型が違えば致命的な設定エラー
    pub fn into_text(self) -> PipelineResult<String> {
        match self {
            Self::Text(value) => Ok(value),
            other => Err(PipelineError::type_mismatch("Text", other.kind())),
        }
    }
}

impl From<i64> for PipelineItem {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for PipelineItem {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// パイプライン実行全体のサマリー
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineSummary {
    pub stage_count: usize,
    pub source_items: usize,
    pub output_length: usize,
    pub total_processing_time_ms: u64,
}
