//! 波次配貨與儲位試算工具
//!
//! 用法:
//!   wave <wave_set.csv> <boh.csv> [-r|--report <dir>] [--wave-set <label>] [--sequential]

mod cli;
mod logging;

use anyhow::Context;
use std::process::ExitCode;
use wave_calc::WavePlanner;
use wave_core::WaveError;
use wave_report::{ReportWriter, WaveLoader, WaveSummary};

use crate::cli::{CliArgs, Command};

fn main() -> ExitCode {
    logging::init();

    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<ExitCode> {
    let config = args.to_config();

    let levels = WaveLoader::load_inventory_from_path(&args.boh)
        .with_context(|| format!("無法載入庫存檔 {}", args.boh.display()))?;
    let orders = WaveLoader::load_orders_from_path(&args.wave_set)
        .with_context(|| format!("無法載入訂單檔 {}", args.wave_set.display()))?;

    let planner = WavePlanner::new(config);
    let allocation = planner.plan(&orders, levels);

    print!("{}", WaveSummary::new(&allocation));

    let Some(report_dir) = &planner.config().report_dir else {
        return Ok(ExitCode::SUCCESS);
    };

    let writer = match ReportWriter::create(report_dir, planner.config().wave_set_label.clone()) {
        Ok(writer) => writer,
        Err(WaveError::DestinationExists(dir)) => {
            println!("WARNING: cannot generate reports because {dir} already exists");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("無法建立報表目錄 {}", report_dir.display()))
        }
    };

    writer
        .write(&allocation)
        .with_context(|| format!("報表輸出失敗 {}", writer.root().display()))?;
    tracing::info!("報表已輸出至 {}", writer.root().display());

    Ok(ExitCode::SUCCESS)
}
