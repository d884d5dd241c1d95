//! 波次配貨主流程

use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use wave_core::{InventoryLevel, Order, Tier, WaveConfig};

use crate::commitment::CommitmentEngine;
use crate::slotting::SlotCandidateSearch;
use crate::{TierAllocation, WaveAllocation};

/// 波次配貨計劃器
pub struct WavePlanner {
    config: WaveConfig,
}

impl WavePlanner {
    /// 創建新的計劃器
    pub fn new(config: WaveConfig) -> Self {
        Self { config }
    }

    /// 主計算入口
    ///
    /// 同一批訂單對每個配置的層級各自執行一次，層級之間互不影響。
    /// 沒有提供庫存的層級視為空庫存；重複的層級只計算第一次。
    pub fn plan(
        &self,
        orders: &[Order],
        mut levels: BTreeMap<Tier, InventoryLevel>,
    ) -> WaveAllocation {
        tracing::info!(
            "開始波次配貨：訂單 {} 筆，層級 {} 個",
            orders.len(),
            self.config.tiers.len()
        );
        let start_time = std::time::Instant::now();

        let mut sorted_orders = orders.to_vec();
        sorted_orders.sort_by(|a, b| a.ship_id.cmp(&b.ship_id));

        let mut seen = BTreeSet::new();
        let work: Vec<(Tier, InventoryLevel)> = self
            .config
            .tiers
            .iter()
            .filter(|&&tier| seen.insert(tier))
            .map(|&tier| (tier, levels.remove(&tier).unwrap_or_default()))
            .collect();

        let tiers: Vec<TierAllocation> = if self.config.parallel {
            work.into_par_iter()
                .map(|(tier, level)| self.plan_tier(tier, &sorted_orders, level))
                .collect()
        } else {
            work.into_iter()
                .map(|(tier, level)| self.plan_tier(tier, &sorted_orders, level))
                .collect()
        };

        tracing::info!("波次配貨完成，耗時 {:?}", start_time.elapsed());

        WaveAllocation { tiers }
    }

    /// 單一層級計算：兩階段承諾後進行儲位試算
    pub fn plan_tier(&self, tier: Tier, orders: &[Order], mut level: InventoryLevel) -> TierAllocation {
        let outcome = CommitmentEngine::run(orders, &mut level);
        let slot_candidates = SlotCandidateSearch::search(
            &outcome.blocked,
            &outcome.histogram,
            &level,
            self.config.parallel,
        );

        tracing::info!(
            "層級 {}：可出貨 {} 筆，補貨 {} 筆，缺儲位 {} 筆，缺儲位物料 {} 項",
            tier,
            outcome.ready.len(),
            outcome.replen.len(),
            outcome.blocked.len(),
            outcome.histogram.len()
        );

        TierAllocation {
            tier,
            ready: outcome.ready,
            replen: outcome.replen,
            blocked: outcome.blocked,
            histogram: outcome.histogram,
            slot_candidates,
            final_inventory: level,
        }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &WaveConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_levels() -> BTreeMap<Tier, InventoryLevel> {
        let mut levels = BTreeMap::new();
        levels.insert(
            Tier::L1,
            InventoryLevel::new().with_sku("A", Decimal::from(10)),
        );
        levels.insert(
            Tier::L3,
            InventoryLevel::new()
                .with_sku("A", Decimal::from(20))
                .with_sku("B", Decimal::from(1)),
        );
        levels
    }

    fn sample_orders() -> Vec<Order> {
        vec![
            Order::new("S3".to_string()).with_item("B", Decimal::from(1)),
            Order::new("S1".to_string()).with_item("A", Decimal::from(4)),
            Order::new("S2".to_string()).with_item("A", Decimal::from(8)),
        ]
    }

    #[test]
    fn test_tiers_are_isolated() {
        let planner = WavePlanner::new(WaveConfig::new().with_parallel(false));
        let result = planner.plan(&sample_orders(), sample_levels());

        assert_eq!(result.tiers.len(), 4);

        let l1 = result.tier(Tier::L1).unwrap();
        assert_eq!(l1.ready.len(), 1);
        assert_eq!(l1.replen.len(), 1);
        assert_eq!(l1.blocked.len(), 1);
        assert_eq!(l1.final_inventory.get("A"), Some(Decimal::from(-2)));

        let l3 = result.tier(Tier::L3).unwrap();
        assert_eq!(l3.ready.len(), 3);
        assert!(l3.slot_candidates.is_empty());
        assert_eq!(l3.final_inventory.get("A"), Some(Decimal::from(8)));

        // 未提供庫存的層級：所有訂單皆缺儲位
        let l6 = result.tier(Tier::L6).unwrap();
        assert_eq!(l6.blocked.len(), 3);
        assert_eq!(l6.slot_candidates.len(), 2);
        assert_eq!(result.max_slot_candidates(), 2);
    }

    #[test]
    fn test_orders_processed_by_ship_id() {
        let planner = WavePlanner::new(WaveConfig::new().with_tiers(vec![Tier::L1]));
        let result = planner.plan(&sample_orders(), sample_levels());

        let l1 = &result.tiers[0];
        assert_eq!(l1.ready[0].ship_id, "S1");
        assert_eq!(l1.replen[0].ship_id, "S2");
        assert_eq!(l1.slot_candidates[0].skus, vec!["B".to_string()]);
        assert_eq!(l1.slot_candidates[0].unlocked_orders[0].ship_id, "S3");
    }

    #[test]
    fn test_duplicate_tier_is_planned_once() {
        let mut config = WaveConfig::new().with_parallel(false);
        config.tiers = vec![Tier::L1, Tier::L3, Tier::L1];
        let result = WavePlanner::new(config).plan(&sample_orders(), sample_levels());

        let tiers: Vec<Tier> = result.tiers.iter().map(|t| t.tier).collect();
        assert_eq!(tiers, vec![Tier::L1, Tier::L3]);

        // 第一次出現的層級拿到完整庫存
        let l1 = &result.tiers[0];
        assert_eq!(l1.ready.len(), 1);
        assert_eq!(l1.replen.len(), 1);
        assert_eq!(l1.final_inventory.get("A"), Some(Decimal::from(-2)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let orders = sample_orders();
        let sequential = WavePlanner::new(WaveConfig::new().with_parallel(false))
            .plan(&orders, sample_levels());
        let parallel = WavePlanner::new(WaveConfig::new().with_parallel(true))
            .plan(&orders, sample_levels());

        for (s, p) in sequential.tiers.iter().zip(parallel.tiers.iter()) {
            assert_eq!(s.tier, p.tier);
            assert_eq!(s.ready, p.ready);
            assert_eq!(s.replen, p.replen);
            assert_eq!(s.blocked, p.blocked);
            assert_eq!(s.final_inventory, p.final_inventory);
            let s_skus: Vec<_> = s.slot_candidates.iter().map(|c| &c.skus).collect();
            let p_skus: Vec<_> = p.slot_candidates.iter().map(|c| &c.skus).collect();
            assert_eq!(s_skus, p_skus);
        }
    }
}
