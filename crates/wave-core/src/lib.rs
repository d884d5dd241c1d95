//! # Wave Core
//!
//! 波次配貨的核心資料模型與類型定義

pub mod config;
pub mod inventory;
pub mod order;
pub mod tier;

// Re-export 主要類型
pub use config::WaveConfig;
pub use inventory::InventoryLevel;
pub use order::{Order, OrderLine};
pub use tier::Tier;

/// 波次配貨錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum WaveError {
    #[error("報表目的地已存在: {0}")]
    DestinationExists(String),

    #[error("檔案存取錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 格式錯誤: {0}")]
    Csv(String),

    #[error("缺少欄位 (行 {row}): {field}")]
    MissingField { row: usize, field: String },

    #[error("數量格式錯誤 (行 {row}, 欄位 {field}): {value}")]
    InvalidQuantity {
        row: usize,
        field: String,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, WaveError>;
