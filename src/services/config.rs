// 設定管理の具象実装

use crate::core::PipelineConfig;
use crate::engine::DEFAULT_FAN_OUT_WIDTH;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    fan_out_width: usize,
    max_concurrent: usize,
    enable_progress: bool,
}

impl DefaultPipelineConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            fan_out_width: DEFAULT_FAN_OUT_WIDTH,
            max_concurrent: cpu_count.max(1) * 2,
            enable_progress: true,
        }
    }

    pub fn with_fan_out_width(mut self, fan_out_width: usize) -> Self {
        self.fan_out_width = fan_out_width;
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn fan_out_width(&self) -> usize {
        self.fan_out_width
    }

    fn max_concurrent_tasks(&self) -> usize {
        self.max_concurrent
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_config() {
        let config = DefaultPipelineConfig::default();

        assert_eq!(config.fan_out_width(), 6);
        assert!(config.max_concurrent_tasks() > 0);
        assert!(config.enable_progress_reporting());
    }

    #[test]
    fn test_pipeline_config_builder() {
        let config = DefaultPipelineConfig::new(4)
            .with_fan_out_width(2)
            .with_max_concurrent(8)
            .with_progress_reporting(false);

        assert_eq!(config.fan_out_width(), 2);
        assert_eq!(config.max_concurrent_tasks(), 8);
        assert!(!config.enable_progress_reporting());
    }

    #[test]
    fn test_config_default_concurrency_scales_with_cpus() {
        let config = DefaultPipelineConfig::new(3);
        assert_eq!(config.max_concurrent_tasks(), 6);

        // cpu_count=0でも最低限の並列度は確保される
        let config = DefaultPipelineConfig::new(0);
        assert_eq!(config.max_concurrent_tasks(), 2);
    }
}
