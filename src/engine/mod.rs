// エンジン層 - ステージ実装とオーケストレーション
// コア層の抽象化を組み合わせてパイプラインを実行する

pub mod api;
pub mod combine;
pub mod executor;
pub mod multi_hash;
pub mod single_hash;
pub mod stage;

// 公開API - 主要な型と関数
pub use api::{build_signer_stages, sign_numbers, sign_numbers_with};
pub use combine::{CombineStage, DEFAULT_COMBINE_SEPARATOR};
pub use executor::PipelineExecutor;
pub use multi_hash::{MultiHashStage, DEFAULT_FAN_OUT_WIDTH};
pub use single_hash::{SingleHashStage, DEFAULT_PAIR_SEPARATOR};
pub use stage::{DigestGate, PipelineStage};
