//! 命令列參數

use std::path::PathBuf;
use wave_core::WaveConfig;

pub const USAGE: &str =
    "usage: wave <wave_set.csv> <boh.csv> [-r|--report <dir>] [--wave-set <label>] [--sequential]";

/// 命令列參數
#[derive(Debug, PartialEq, Eq)]
pub struct CliArgs {
    /// 波次訂單檔
    pub wave_set: PathBuf,

    /// 庫存檔
    pub boh: PathBuf,

    /// 報表輸出目錄
    pub report: Option<PathBuf>,

    /// 報表 WAVE_SET 欄位值（預設 ECOM）
    pub wave_set_label: Option<String>,

    /// 停用並行計算
    pub sequential: bool,
}

/// 解析結果
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(CliArgs),
    Help,
}

impl CliArgs {
    /// 轉換為配貨配置
    pub fn to_config(&self) -> WaveConfig {
        let mut config = WaveConfig::new().with_parallel(!self.sequential);
        if let Some(label) = &self.wave_set_label {
            config = config.with_wave_set_label(label.clone());
        }
        match &self.report {
            Some(dir) => config.with_report_dir(dir.clone()),
            None => config,
        }
    }
}

/// 解析參數（不含程式名稱）
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut positional = Vec::new();
    let mut report = None;
    let mut wave_set_label = None;
    let mut sequential = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-r" | "--report" => {
                let dir = args
                    .next()
                    .ok_or_else(|| format!("{arg} requires a directory argument"))?;
                report = Some(PathBuf::from(dir));
            }
            "--wave-set" => {
                let label = args
                    .next()
                    .ok_or_else(|| format!("{arg} requires a label argument"))?;
                wave_set_label = Some(label);
            }
            "--sequential" => sequential = true,
            other => {
                if let Some(dir) = other.strip_prefix("--report=") {
                    report = Some(PathBuf::from(dir));
                } else if let Some(label) = other.strip_prefix("--wave-set=") {
                    wave_set_label = Some(label.to_string());
                } else if other.starts_with('-') && other.len() > 1 {
                    return Err(format!("unknown option: {other}"));
                } else {
                    positional.push(PathBuf::from(other));
                }
            }
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(wave_set), Some(boh), None) => Ok(Command::Run(CliArgs {
            wave_set,
            boh,
            report,
            wave_set_label,
            sequential,
        })),
        (_, _, Some(extra)) => Err(format!("unexpected argument: {}", extra.display())),
        _ => Err("missing required arguments: wave_set boh".to_string()),
    }
}
