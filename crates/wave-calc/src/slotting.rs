//! 缺儲位物料的貪婪儲位試算

use rayon::prelude::*;
use wave_core::{InventoryLevel, Order};

use crate::commitment::MissingSkuHistogram;

/// 儲位試算結果
#[derive(Debug, Clone)]
pub struct SlotCandidate {
    /// 新增儲位的物料（依排名累加）
    pub skus: Vec<String>,

    /// 因此可出貨的缺儲位訂單
    pub unlocked_orders: Vec<Order>,

    /// 試算後的庫存
    pub resulting_inventory: InventoryLevel,
}

/// 儲位試算器
pub struct SlotCandidateSearch;

impl SlotCandidateSearch {
    /// 依排名逐一累加物料，對每個前綴試算可解鎖的訂單
    ///
    /// 每次試算都從 `base` 的全新副本開始，試算之間不共享庫存狀態，
    /// 因此 `parallel` 只影響執行方式，不影響結果。
    pub fn search(
        blocked: &[Order],
        histogram: &MissingSkuHistogram,
        base: &InventoryLevel,
        parallel: bool,
    ) -> Vec<SlotCandidate> {
        let ranking = histogram.ranked();
        tracing::debug!("缺儲位物料排名: {:?}", ranking);

        if parallel {
            (1..=ranking.len())
                .into_par_iter()
                .map(|k| Self::simulate(&ranking[..k], blocked, base))
                .collect()
        } else {
            (1..=ranking.len())
                .map(|k| Self::simulate(&ranking[..k], blocked, base))
                .collect()
        }
    }

    /// 單一前綴試算
    fn simulate(candidates: &[String], blocked: &[Order], base: &InventoryLevel) -> SlotCandidate {
        let mut trial = base.clone();
        for sku in candidates {
            trial.assign_slot(sku);
        }

        let unlocked_orders: Vec<Order> = blocked
            .iter()
            .filter(|order| order.commit(&mut trial, true))
            .cloned()
            .collect();

        tracing::debug!(
            "新增 {} 個儲位：解鎖 {} 筆訂單",
            candidates.len(),
            unlocked_orders.len()
        );

        SlotCandidate {
            skus: candidates.to_vec(),
            unlocked_orders,
            resulting_inventory: trial,
        }
    }
}
