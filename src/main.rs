use anyhow::Result;
use clap::Parser;

// 署名パイプラインAPIをインポート
use data_signer::{
    core::PipelineConfig, signer::crc32_md5::Crc32Md5Signer, ConsoleProgressReporter,
    DefaultPipelineConfig, SignerApp,
};

#[derive(Parser)]
#[command(name = "data_signer")]
#[command(about = "A concurrent data-signing pipeline")]
#[command(version)]
struct Cli {
    /// Sign the integers 0..count
    #[arg(short, long, default_value = "10")]
    count: i64,

    /// Fan-out width for the multi-hash stage
    #[arg(long, default_value = "6")]
    fan_out: usize,

    /// Maximum concurrent workers per stage
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. 設定構築
    let mut config = DefaultPipelineConfig::default()
        .with_fan_out_width(cli.fan_out)
        .with_progress_reporting(!cli.quiet);
    if let Some(max_concurrent) = cli.max_concurrent {
        config = config.with_max_concurrent(max_concurrent);
    }

    let reporter = if config.enable_progress_reporting() {
        ConsoleProgressReporter::new()
    } else {
        ConsoleProgressReporter::quiet()
    };

    if !cli.quiet {
        println!("🚀 データ署名パイプライン");
        println!("⚙️  設定:");
        println!("   - 入力: 0..{}", cli.count);
        println!("   - ファンアウト幅: {}", config.fan_out_width());
        println!("   - 最大並列数: {}", config.max_concurrent_tasks());
    }

    // 2. パイプライン実行
    let app = SignerApp::with_parts(Crc32Md5Signer::new(), config, reporter);
    let inputs: Vec<i64> = (0..cli.count).collect();

    match app.run_with_summary(&inputs).await {
        Ok((signature, summary)) => {
            if cli.quiet {
                println!("{signature}");
            } else {
                println!("\n✅ 処理完了!");
                println!("📊 処理結果:");
                println!("   - ソースアイテム数: {}", summary.source_items);
                println!("   - 出力長: {}文字", summary.output_length);
                println!("   - 総処理時間: {}ms", summary.total_processing_time_ms);
                println!("🔏 署名: {signature}");
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        Err(error) => {
            eprintln!("❌ エラー: {error}");
            std::process::exit(1);
        }
    }

    Ok(())
}
