//! # Wave Calculation Engine
//!
//! 波次配貨計算引擎：兩階段承諾與缺儲位物料的貪婪試算

pub mod commitment;
pub mod planner;
pub mod slotting;

// Re-export 主要類型
pub use commitment::{CommitmentEngine, CommitmentOutcome, MissingSkuHistogram};
pub use planner::WavePlanner;
pub use slotting::{SlotCandidate, SlotCandidateSearch};

use wave_core::{InventoryLevel, Order, Tier};

/// 單一層級的配貨結果
#[derive(Debug, Clone)]
pub struct TierAllocation {
    pub tier: Tier,

    /// 可立即出貨的訂單
    pub ready: Vec<Order>,

    /// 需補貨才能出貨的訂單
    pub replen: Vec<Order>,

    /// 因缺儲位而無法出貨的訂單
    pub blocked: Vec<Order>,

    /// 缺儲位物料的累計需求
    pub histogram: MissingSkuHistogram,

    /// 依排名累加的儲位試算結果
    pub slot_candidates: Vec<SlotCandidate>,

    /// 兩階段承諾後的庫存
    pub final_inventory: InventoryLevel,
}

impl TierAllocation {
    /// 可出貨（含補貨）的訂單
    pub fn shippable(&self) -> impl Iterator<Item = &Order> {
        self.ready.iter().chain(self.replen.iter())
    }
}

/// 整個波次的配貨結果
#[derive(Debug, Clone)]
pub struct WaveAllocation {
    /// 各層級結果（依配置的層級順序）
    pub tiers: Vec<TierAllocation>,
}

impl WaveAllocation {
    /// 取得指定層級的結果
    pub fn tier(&self, tier: Tier) -> Option<&TierAllocation> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    /// 各層級中最多的儲位試算筆數
    pub fn max_slot_candidates(&self) -> usize {
        self.tiers
            .iter()
            .map(|t| t.slot_candidates.len())
            .max()
            .unwrap_or(0)
    }
}
