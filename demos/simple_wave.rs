//! 簡單波次配貨示例

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use wave_calc::WavePlanner;
use wave_core::{InventoryLevel, Order, Tier, WaveConfig};
use wave_report::WaveSummary;

fn main() {
    println!("=== 簡單波次配貨示例 ===\n");

    // 創建訂單
    let orders = vec![
        Order::new("SHIP-001".to_string())
            .with_item("BIKE-001", Decimal::from(2))
            .with_item("HELMET-001", Decimal::from(2)),
        Order::new("SHIP-002".to_string()).with_item("BIKE-001", Decimal::from(5)),
        Order::new("SHIP-003".to_string())
            .with_item("LOCK-001", Decimal::from(1))
            .with_item("BELL-001", Decimal::from(1)),
        Order::new("SHIP-004".to_string()).with_item("LOCK-001", Decimal::from(3)),
    ];

    // 創建各層級庫存（層級 6 沒有任何儲位）
    let mut levels = BTreeMap::new();
    levels.insert(
        Tier::L1,
        InventoryLevel::new()
            .with_sku("BIKE-001", Decimal::from(4))
            .with_sku("HELMET-001", Decimal::from(10)),
    );
    levels.insert(
        Tier::L3,
        InventoryLevel::new()
            .with_sku("BIKE-001", Decimal::from(10))
            .with_sku("HELMET-001", Decimal::from(10))
            .with_sku("LOCK-001", Decimal::from(2)),
    );
    levels.insert(
        Tier::L4,
        InventoryLevel::new()
            .with_sku("BIKE-001", Decimal::from(10))
            .with_sku("HELMET-001", Decimal::ZERO)
            .with_sku("LOCK-001", Decimal::from(5))
            .with_sku("BELL-001", Decimal::from(5)),
    );

    let allocation = WavePlanner::new(WaveConfig::default()).plan(&orders, levels);

    print!("{}", WaveSummary::new(&allocation));

    println!("\n儲位試算明細:");
    for tier in &allocation.tiers {
        for candidate in &tier.slot_candidates {
            println!(
                "  - 層級 {}: 新增 {:?} → 解鎖 {} 筆",
                tier.tier,
                candidate.skus,
                candidate.unlocked_orders.len()
            );
        }
    }
}
