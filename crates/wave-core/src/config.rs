//! 波次配貨配置

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::tier::Tier;

/// 波次配貨參數配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveConfig {
    /// 要評估的層級（預設全部四個）
    pub tiers: Vec<Tier>,

    /// 是否以多執行緒並行計算層級與儲位試算
    ///
    /// 每個工作單元持有自己的庫存副本，結果與循序計算完全一致。
    pub parallel: bool,

    /// 報表中 WAVE_SET 欄位的值
    pub wave_set_label: String,

    /// 報表輸出目錄（None 表示不輸出）
    pub report_dir: Option<PathBuf>,
}

impl WaveConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            tiers: Tier::ALL.to_vec(),
            parallel: true,
            wave_set_label: "ECOM".to_string(),
            report_dir: None,
        }
    }

    /// 建構器模式：設置層級（重複的層級只保留第一次出現）
    pub fn with_tiers(mut self, tiers: Vec<Tier>) -> Self {
        self.tiers.clear();
        for tier in tiers {
            if !self.tiers.contains(&tier) {
                self.tiers.push(tier);
            }
        }
        self
    }

    /// 建構器模式：設置是否並行
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 建構器模式：設置 WAVE_SET 標籤
    pub fn with_wave_set_label(mut self, label: String) -> Self {
        self.wave_set_label = label;
        self
    }

    /// 建構器模式：設置報表目錄
    pub fn with_report_dir(mut self, dir: PathBuf) -> Self {
        self.report_dir = Some(dir);
        self
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self::new()
    }
}
