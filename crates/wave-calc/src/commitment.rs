//! 兩階段訂單承諾

use rust_decimal::Decimal;
use std::collections::HashMap;
use wave_core::{InventoryLevel, Order};

/// 缺儲位物料需求統計
///
/// 保留首次記錄順序，排名同分時以此順序決勝。
#[derive(Debug, Clone, Default)]
pub struct MissingSkuHistogram {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl MissingSkuHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加物料需求量，超出 Decimal 範圍時停在上限
    pub fn record(&mut self, sku: &str, quantity: Decimal) {
        match self.index.get(sku) {
            Some(&pos) => {
                let total = &mut self.entries[pos].1;
                *total = total.saturating_add(quantity);
            }
            None => {
                self.index.insert(sku.to_string(), self.entries.len());
                self.entries.push((sku.to_string(), quantity));
            }
        }
    }

    pub fn get(&self, sku: &str) -> Option<Decimal> {
        self.index.get(sku).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 依累計需求量由大到小排名（穩定排序）
    pub fn ranked(&self) -> Vec<String> {
        let mut ordered: Vec<&(String, Decimal)> = self.entries.iter().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        ordered.into_iter().map(|(sku, _)| sku.clone()).collect()
    }
}

/// 單一層級的承諾結果
#[derive(Debug, Clone, Default)]
pub struct CommitmentOutcome {
    pub ready: Vec<Order>,
    pub replen: Vec<Order>,
    pub blocked: Vec<Order>,
    pub histogram: MissingSkuHistogram,
}

/// 承諾引擎
pub struct CommitmentEngine;

impl CommitmentEngine {
    /// 對單一層級執行兩階段承諾
    ///
    /// 訂單需已依出貨單號排序，排序決定庫存不足時的先後。
    /// 第一階段不允許補貨，失敗的訂單進入第二階段允許補貨重試；
    /// 第二階段仍失敗者為缺儲位訂單，只有完全沒有儲位的物料計入統計。
    pub fn run(orders: &[Order], level: &mut InventoryLevel) -> CommitmentOutcome {
        let mut outcome = CommitmentOutcome::default();
        let mut retry = Vec::new();

        // 第一階段：現有庫存
        for order in orders {
            if order.commit(level, false) {
                outcome.ready.push(order.clone());
            } else {
                retry.push(order);
            }
        }
        tracing::debug!(
            "第一階段：可出貨 {} 筆，待重試 {} 筆",
            outcome.ready.len(),
            retry.len()
        );

        // 第二階段：允許補貨
        for order in retry {
            if order.commit(level, true) {
                outcome.replen.push(order.clone());
                continue;
            }

            for line in level.missing_lines(&order.lines) {
                outcome.histogram.record(&line.sku, line.quantity);
            }
            outcome.blocked.push(order.clone());
        }
        tracing::debug!(
            "第二階段：補貨 {} 筆，缺儲位 {} 筆，缺儲位物料 {} 項",
            outcome.replen.len(),
            outcome.blocked.len(),
            outcome.histogram.len()
        );

        outcome
    }
}
