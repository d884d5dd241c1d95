//! CSV 輸入載入
//!
//! 訂單檔表頭: SHIP_ID,PRTNUM,WAVE_SET,ORDQTY
//!
//! 庫存檔表頭: PRTNUM,Available Qty 1,Available Qty 3,Available Qty 4,Available Qty 6,
//! LEVEL 1 LOCATION,LEVEL 3 LOCATION,LEVEL 4 LOCATION,LEVEL 6 LOCATION

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use wave_core::{InventoryLevel, Order, Result, Tier, WaveError};

use crate::csv_error;

const SHIP_ID_COL: usize = 0;
const PRTNUM_COL: usize = 1;
const ORDQTY_COL: usize = 3;

const QTY_COL_OFFSET: usize = 1;
const LOCATION_COL_OFFSET: usize = 5;

/// 輸入載入器
pub struct WaveLoader;

impl WaveLoader {
    /// 從檔案載入訂單
    pub fn load_orders_from_path(path: &Path) -> Result<Vec<Order>> {
        Self::load_orders(File::open(path)?)
    }

    /// 載入訂單
    ///
    /// 同一出貨單號的明細合併為一張訂單，同一物料數量累加，
    /// 結果依出貨單號遞增排序。
    pub fn load_orders<R: Read>(reader: R) -> Result<Vec<Order>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut orders: Vec<Order> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (row_idx, result) in reader.records().enumerate() {
            let record = result.map_err(csv_error)?;
            let row = row_idx + 1;

            // 跳過完全空白的行
            if record.iter().all(str::is_empty) {
                continue;
            }

            let ship_id = field(&record, SHIP_ID_COL, row, "SHIP_ID")?;
            let sku = field(&record, PRTNUM_COL, row, "PRTNUM")?;
            let quantity = parse_quantity(&record, ORDQTY_COL, row, "ORDQTY")?;

            let pos = *index.entry(ship_id.to_string()).or_insert_with(|| {
                orders.push(Order::new(ship_id.to_string()));
                orders.len() - 1
            });

            // 累加後超出 Decimal 範圍
            if let Some(existing) = orders[pos].quantity_of(sku) {
                if existing.checked_add(quantity).is_none() {
                    return Err(WaveError::InvalidQuantity {
                        row,
                        field: "ORDQTY".to_string(),
                        value: format!("{existing} + {quantity}"),
                    });
                }
            }
            orders[pos].add_item(sku, quantity);
        }

        orders.sort_by(|a, b| a.ship_id.cmp(&b.ship_id));
        tracing::info!("載入訂單 {} 筆", orders.len());

        Ok(orders)
    }

    /// 從檔案載入各層級庫存
    pub fn load_inventory_from_path(path: &Path) -> Result<BTreeMap<Tier, InventoryLevel>> {
        Self::load_inventory(File::open(path)?)
    }

    /// 載入各層級庫存
    ///
    /// 物料只有在該層級的儲位欄非空時才加入該層級，
    /// 否則視為沒有儲位（不是數量 0）。
    pub fn load_inventory<R: Read>(reader: R) -> Result<BTreeMap<Tier, InventoryLevel>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut levels: BTreeMap<Tier, InventoryLevel> = Tier::ALL
            .into_iter()
            .map(|tier| (tier, InventoryLevel::new()))
            .collect();

        for (row_idx, result) in reader.records().enumerate() {
            let record = result.map_err(csv_error)?;
            let row = row_idx + 1;

            if record.iter().all(str::is_empty) {
                continue;
            }

            let sku = field(&record, 0, row, "PRTNUM")?;

            for tier in Tier::ALL {
                let location = record
                    .get(LOCATION_COL_OFFSET + tier.column())
                    .unwrap_or_default();
                if location.is_empty() {
                    continue;
                }

                let qty = parse_quantity(
                    &record,
                    QTY_COL_OFFSET + tier.column(),
                    row,
                    &format!("Available Qty {}", tier.label()),
                )?;
                if let Some(level) = levels.get_mut(&tier) {
                    level.insert(sku, qty);
                }
            }
        }

        for (tier, level) in &levels {
            tracing::info!("載入層級 {} 庫存 {} 項", tier, level.len());
        }

        Ok(levels)
    }
}

fn field<'r>(record: &'r StringRecord, col: usize, row: usize, name: &str) -> Result<&'r str> {
    record.get(col).ok_or_else(|| WaveError::MissingField {
        row,
        field: name.to_string(),
    })
}

fn parse_quantity(record: &StringRecord, col: usize, row: usize, name: &str) -> Result<Decimal> {
    let value = field(record, col, row, name)?;
    Decimal::from_str(value).map_err(|_| WaveError::InvalidQuantity {
        row,
        field: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERS_CSV: &str = "\
SHIP_ID,PRTNUM,WAVE_SET,ORDQTY
S2,A,ECOM,8
S1,A,ECOM,4
S3,B,ECOM,1
S1,C,ECOM,3
S1,C,ECOM,4
";

    const BOH_CSV: &str = "\
PRTNUM,Available Qty 1,Available Qty 3,Available Qty 4,Available Qty 6,LEVEL 1 LOCATION,LEVEL 3 LOCATION,LEVEL 4 LOCATION,LEVEL 6 LOCATION
A,10,5,0,x,L1-01,L3-01,L4-01,
B,0,2,,,,L3-02,,
";

    #[test]
    fn test_orders_grouped_summed_and_sorted() {
        let orders = WaveLoader::load_orders(ORDERS_CSV.as_bytes()).unwrap();

        let ids: Vec<&str> = orders.iter().map(|o| o.ship_id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);

        let s1 = &orders[0];
        assert_eq!(s1.lines.len(), 2);
        assert_eq!(s1.quantity_of("A"), Some(Decimal::from(4)));
        assert_eq!(s1.quantity_of("C"), Some(Decimal::from(7)));
    }

    #[test]
    fn test_inventory_respects_location_flag() {
        let levels = WaveLoader::load_inventory(BOH_CSV.as_bytes()).unwrap();

        assert_eq!(levels.len(), 4);
        let l1 = &levels[&Tier::L1];
        assert_eq!(l1.get("A"), Some(Decimal::from(10)));
        assert!(!l1.contains("B"));

        let l3 = &levels[&Tier::L3];
        assert_eq!(l3.get("A"), Some(Decimal::from(5)));
        assert_eq!(l3.get("B"), Some(Decimal::from(2)));

        // 有儲位但數量為 0
        assert_eq!(levels[&Tier::L4].get("A"), Some(Decimal::ZERO));

        // 沒有儲位時不解析數量欄
        assert!(levels[&Tier::L6].is_empty());
    }

    #[test]
    fn test_invalid_quantity_reports_row() {
        let csv = "SHIP_ID,PRTNUM,WAVE_SET,ORDQTY\nS1,A,ECOM,4\nS2,B,ECOM,abc\n";
        let err = WaveLoader::load_orders(csv.as_bytes()).unwrap_err();

        match err {
            WaveError::InvalidQuantity { row, field, value } => {
                assert_eq!(row, 2);
                assert_eq!(field, "ORDQTY");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_summed_quantity_out_of_range_is_rejected() {
        let csv = format!(
            "SHIP_ID,PRTNUM,WAVE_SET,ORDQTY\nS1,Z,ECOM,{max}\nS2,Z,ECOM,{max}\nS1,Z,ECOM,{max}\n",
            max = Decimal::MAX
        );
        let err = WaveLoader::load_orders(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            WaveError::InvalidQuantity { row: 3, ref field, .. } if field == "ORDQTY"
        ));
    }

    #[test]
    fn test_missing_column_reports_field() {
        let csv = "SHIP_ID,PRTNUM,WAVE_SET,ORDQTY\nS1,A\n";
        let err = WaveLoader::load_orders(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, WaveError::MissingField { row: 1, ref field } if field == "ORDQTY"));
    }
}
