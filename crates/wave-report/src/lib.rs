//! # Wave Report
//!
//! 輸入載入、控制台摘要與 CSV 報表輸出

pub mod loader;
pub mod summary;
pub mod writer;

// Re-export 主要類型
pub use loader::WaveLoader;
pub use summary::WaveSummary;
pub use writer::ReportWriter;

use wave_core::WaveError;

pub(crate) fn csv_error(err: csv::Error) -> WaveError {
    WaveError::Csv(err.to_string())
}
