// サービス層 - コアトレイトの具象実装を提供

pub mod config;
pub mod monitoring;

pub use config::DefaultPipelineConfig;
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter};
