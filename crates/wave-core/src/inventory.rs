//! 層級庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::order::OrderLine;

/// 單一層級的現有庫存（BOH）
///
/// 物料不存在於映射中代表該層級沒有儲位；數量為 0 代表有儲位但無庫存。
/// 允許補貨時數量可以為負值（表示欠量），不視為錯誤。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLevel {
    quantities: BTreeMap<String, Decimal>,
}

impl InventoryLevel {
    /// 創建空的層級庫存
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入物料庫存
    pub fn with_sku(mut self, sku: impl Into<String>, quantity: Decimal) -> Self {
        self.insert(sku, quantity);
        self
    }

    /// 設定物料庫存（已存在則覆蓋）
    pub fn insert(&mut self, sku: impl Into<String>, quantity: Decimal) {
        self.quantities.insert(sku.into(), quantity);
    }

    /// 查詢物料現有數量，沒有儲位時返回 None
    pub fn get(&self, sku: &str) -> Option<Decimal> {
        self.quantities.get(sku).copied()
    }

    /// 物料在此層級是否有儲位
    pub fn contains(&self, sku: &str) -> bool {
        self.quantities.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// 依物料代碼順序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.quantities.iter().map(|(sku, qty)| (sku.as_str(), *qty))
    }

    /// 所有物料數量合計
    pub fn total(&self) -> Decimal {
        self.quantities
            .values()
            .fold(Decimal::ZERO, |acc, qty| acc.saturating_add(*qty))
    }

    /// 為物料配置空儲位：數量強制設為 0
    pub fn assign_slot(&mut self, sku: &str) {
        self.quantities.insert(sku.to_string(), Decimal::ZERO);
    }

    /// 檢查所有明細是否可扣減
    ///
    /// 以下任一情況即不可行：
    /// - 物料沒有儲位
    /// - 不允許補貨且現有數量不足
    /// - 扣減後超出 Decimal 可表示範圍
    pub fn can_apply(&self, lines: &[OrderLine], allow_replenishment: bool) -> bool {
        lines.iter().all(|line| match self.quantities.get(&line.sku) {
            None => false,
            Some(available) => {
                (allow_replenishment || *available >= line.quantity)
                    && available.checked_sub(line.quantity).is_some()
            }
        })
    }

    /// 原子性扣減
    ///
    /// 先檢查全部明細，全部可行時才逐筆扣減並返回 true；
    /// 任一明細不可行則庫存完全不變並返回 false。
    /// 明細中的物料代碼需互不重複（`Order` 載入時已合併）。
    pub fn try_apply(&mut self, lines: &[OrderLine], allow_replenishment: bool) -> bool {
        if !self.can_apply(lines, allow_replenishment) {
            return false;
        }

        for line in lines {
            if let Some(available) = self.quantities.get_mut(&line.sku) {
                *available = available.saturating_sub(line.quantity);
            }
        }
        true
    }

    /// 篩選出在此層級完全沒有儲位的明細
    pub fn missing_lines<'a>(
        &'a self,
        lines: &'a [OrderLine],
    ) -> impl Iterator<Item = &'a OrderLine> + 'a {
        lines.iter().filter(move |line| !self.contains(&line.sku))
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for InventoryLevel {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self {
            quantities: iter
                .into_iter()
                .map(|(sku, qty)| (sku.into(), qty))
                .collect(),
        }
    }
}
