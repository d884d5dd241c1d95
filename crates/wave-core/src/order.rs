//! 出貨訂單模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inventory::InventoryLevel;

/// 訂單明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// 物料代碼（PRTNUM）
    pub sku: String,

    /// 訂購數量
    pub quantity: Decimal,
}

impl OrderLine {
    pub fn new(sku: String, quantity: Decimal) -> Self {
        Self { sku, quantity }
    }
}

/// 出貨訂單
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// 出貨單號（SHIP_ID）
    pub ship_id: String,

    /// 明細（依首次出現順序，物料不重複）
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// 創建新的空訂單
    pub fn new(ship_id: String) -> Self {
        Self {
            ship_id,
            lines: Vec::new(),
        }
    }

    /// 建構器模式：加入明細
    pub fn with_item(mut self, sku: impl Into<String>, quantity: Decimal) -> Self {
        self.add_item(sku, quantity);
        self
    }

    /// 加入明細，同一物料重複出現時數量累加（超出範圍時停在上下限）
    pub fn add_item(&mut self, sku: impl Into<String>, quantity: Decimal) {
        let sku = sku.into();
        match self.lines.iter_mut().find(|line| line.sku == sku) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(OrderLine::new(sku, quantity)),
        }
    }

    /// 查詢物料訂購數量
    pub fn quantity_of(&self, sku: &str) -> Option<Decimal> {
        self.lines
            .iter()
            .find(|line| line.sku == sku)
            .map(|line| line.quantity)
    }

    /// 訂單總數量
    pub fn total_quantity(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.quantity))
    }

    /// 嘗試對庫存承諾整張訂單
    ///
    /// 全部明細可行才扣減，否則庫存不變。見 [`InventoryLevel::try_apply`]。
    pub fn commit(&self, inventory: &mut InventoryLevel, allow_replenishment: bool) -> bool {
        inventory.try_apply(&self.lines, allow_replenishment)
    }
}
