// CombineResultsステージ - 集約と決定化

use super::stage::PipelineStage;
use crate::core::{PipelineError, PipelineItem, PipelineResult};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// CombineResultsのデフォルト区切り文字
pub const DEFAULT_COMBINE_SEPARATOR: &str = "_";

/// 入力を全件収集し、辞書順ソートして1つの文字列に結合するステージ
///
/// 上流の並列処理で乱れた到着順序をここで決定的な結果に畳み込む。
/// 出力は受信した文字列の多重集合だけに依存する。
pub struct CombineStage {
    separator: String,
}

impl CombineStage {
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_COMBINE_SEPARATOR.to_string(),
        }
    }

    /// 区切り文字を変更する
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for CombineStage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PipelineStage for CombineStage {
    fn name(&self) -> &'static str {
        "combine_results"
    }

    async fn run(
        &self,
        mut input: mpsc::UnboundedReceiver<PipelineItem>,
        output: mpsc::UnboundedSender<PipelineItem>,
    ) -> PipelineResult<()> {
        // ストリーミングではなく全件収集してから出力する
        let mut collected = Vec::new();
        while let Some(item) = input.recv().await {
            collected.push(item.into_text()?);
        }

        // バイト単位の辞書順ソート
        collected.sort();

        output
            .send(PipelineItem::Text(collected.join(&self.separator)))
            .map_err(|_| PipelineError::channel_closed("combine_results"))?;

        Ok(())
    }
}
