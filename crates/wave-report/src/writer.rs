//! CSV 報表輸出
//!
//! 目錄結構：
//!
//! ```text
//! <root>/level_<L>/<L>_ready_orders.csv
//! <root>/level_<L>/<L>_ready_replen_orders.csv
//! <root>/level_<L>/boh.csv
//! <root>/level_<L>/slot_<k>/<L>_slot_<k>_orders.csv
//! <root>/level_<L>/slot_<k>/skus.csv
//! <root>/level_<L>/slot_<k>/boh.csv
//! ```

use csv::Writer;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use wave_calc::{SlotCandidate, TierAllocation, WaveAllocation};
use wave_core::{InventoryLevel, Order, Result, WaveError};

use crate::csv_error;

const ORDER_HEADER: [&str; 4] = ["SHIP_ID", "PRTNUM", "WAVE_SET", "ORDQTY"];
const BOH_HEADER: [&str; 2] = ["PRTNUM", "Qty"];
const SKU_HEADER: [&str; 1] = ["PRTNUM"];

/// 報表輸出器
#[derive(Debug)]
pub struct ReportWriter {
    root: PathBuf,
    wave_set_label: String,
}

impl ReportWriter {
    /// 檢查報表目的地是否可用（不可已存在）
    pub fn ensure_available(root: &Path) -> Result<()> {
        if root.exists() {
            return Err(WaveError::DestinationExists(root.display().to_string()));
        }
        Ok(())
    }

    /// 建立報表根目錄
    ///
    /// 目的地已存在時返回 [`WaveError::DestinationExists`]，且不寫入任何檔案。
    pub fn create(root: impl Into<PathBuf>, wave_set_label: String) -> Result<Self> {
        let root = root.into();
        Self::ensure_available(&root)?;

        if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir(&root).map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => WaveError::DestinationExists(root.display().to_string()),
            _ => WaveError::Io(err),
        })?;

        tracing::info!("建立報表目錄: {}", root.display());
        Ok(Self {
            root,
            wave_set_label,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 輸出全部層級報表
    pub fn write(&self, allocation: &WaveAllocation) -> Result<()> {
        for tier in &allocation.tiers {
            self.write_tier(tier)?;
        }
        Ok(())
    }

    fn write_tier(&self, allocation: &TierAllocation) -> Result<()> {
        let level = allocation.tier.label();
        let base_dir = self.root.join(format!("level_{level}"));
        fs::create_dir(&base_dir)?;

        if !allocation.ready.is_empty() {
            self.write_orders(
                &base_dir.join(format!("{level}_ready_orders.csv")),
                allocation.ready.iter(),
            )?;
        }

        if allocation.shippable().next().is_some() {
            self.write_orders(
                &base_dir.join(format!("{level}_ready_replen_orders.csv")),
                allocation.shippable(),
            )?;
        }

        if !allocation.replen.is_empty() {
            write_inventory(&base_dir.join("boh.csv"), &allocation.final_inventory)?;
        }

        for candidate in &allocation.slot_candidates {
            self.write_slot(&base_dir, level, allocation, candidate)?;
        }

        tracing::debug!("層級 {} 報表輸出完成", level);
        Ok(())
    }

    fn write_slot(
        &self,
        base_dir: &Path,
        level: u8,
        allocation: &TierAllocation,
        candidate: &SlotCandidate,
    ) -> Result<()> {
        let slot_count = candidate.skus.len();
        let slot_dir = base_dir.join(format!("slot_{slot_count}"));
        fs::create_dir(&slot_dir)?;

        self.write_orders(
            &slot_dir.join(format!("{level}_slot_{slot_count}_orders.csv")),
            allocation.shippable().chain(candidate.unlocked_orders.iter()),
        )?;
        write_skus(&slot_dir.join("skus.csv"), &candidate.skus)?;
        write_inventory(&slot_dir.join("boh.csv"), &candidate.resulting_inventory)
    }

    fn write_orders<'a>(
        &self,
        path: &Path,
        orders: impl IntoIterator<Item = &'a Order>,
    ) -> Result<()> {
        let mut writer = Writer::from_path(path).map_err(csv_error)?;
        writer.write_record(ORDER_HEADER).map_err(csv_error)?;
        for order in orders {
            for line in &order.lines {
                writer
                    .write_record([
                        order.ship_id.as_str(),
                        line.sku.as_str(),
                        self.wave_set_label.as_str(),
                        line.quantity.to_string().as_str(),
                    ])
                    .map_err(csv_error)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_inventory(path: &Path, inventory: &InventoryLevel) -> Result<()> {
    let mut writer = Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(BOH_HEADER).map_err(csv_error)?;
    for (sku, qty) in inventory.iter() {
        writer
            .write_record([sku, qty.to_string().as_str()])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_skus(path: &Path, skus: &[String]) -> Result<()> {
    let mut writer = Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(SKU_HEADER).map_err(csv_error)?;
    for sku in skus {
        writer.write_record([sku.as_str()]).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;
    use wave_calc::WavePlanner;
    use wave_core::{Tier, WaveConfig};

    fn sample_allocation() -> WaveAllocation {
        let orders = vec![
            Order::new("S1".to_string()).with_item("A", Decimal::from(4)),
            Order::new("S2".to_string()).with_item("A", Decimal::from(8)),
            Order::new("S3".to_string()).with_item("B", Decimal::from(1)),
        ];
        let mut levels = BTreeMap::new();
        levels.insert(Tier::L1, InventoryLevel::new().with_sku("A", Decimal::from(10)));

        WavePlanner::new(WaveConfig::new().with_tiers(vec![Tier::L1]))
            .plan(&orders, levels)
    }

    #[test]
    fn test_report_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("report");

        let writer = ReportWriter::create(&root, "ECOM".to_string()).unwrap();
        writer.write(&sample_allocation()).unwrap();

        let level_dir = root.join("level_1");
        let ready = fs::read_to_string(level_dir.join("1_ready_orders.csv")).unwrap();
        assert_eq!(ready, "SHIP_ID,PRTNUM,WAVE_SET,ORDQTY\nS1,A,ECOM,4\n");

        let ready_replen = fs::read_to_string(level_dir.join("1_ready_replen_orders.csv")).unwrap();
        assert_eq!(
            ready_replen,
            "SHIP_ID,PRTNUM,WAVE_SET,ORDQTY\nS1,A,ECOM,4\nS2,A,ECOM,8\n"
        );

        let boh = fs::read_to_string(level_dir.join("boh.csv")).unwrap();
        assert_eq!(boh, "PRTNUM,Qty\nA,-2\n");

        let slot_dir = level_dir.join("slot_1");
        let slot_orders = fs::read_to_string(slot_dir.join("1_slot_1_orders.csv")).unwrap();
        assert!(slot_orders.ends_with("S3,B,ECOM,1\n"));
        assert_eq!(
            fs::read_to_string(slot_dir.join("skus.csv")).unwrap(),
            "PRTNUM\nB\n"
        );
        assert_eq!(
            fs::read_to_string(slot_dir.join("boh.csv")).unwrap(),
            "PRTNUM,Qty\nA,-2\nB,-1\n"
        );
    }

    #[test]
    fn test_existing_destination_is_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("report");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("keep.txt"), "original").unwrap();

        let err = ReportWriter::create(&root, "ECOM".to_string()).unwrap_err();
        assert!(matches!(err, WaveError::DestinationExists(_)));

        let entries: Vec<_> = fs::read_dir(&root).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(fs::read_to_string(root.join("keep.txt")).unwrap(), "original");
    }

    #[test]
    fn test_empty_tier_writes_only_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nested").join("report");
        let allocation = WavePlanner::new(WaveConfig::new().with_tiers(vec![Tier::L6]))
            .plan(&[], BTreeMap::new());

        let writer = ReportWriter::create(&root, "ECOM".to_string()).unwrap();
        writer.write(&allocation).unwrap();

        let level_dir = root.join("level_6");
        assert!(level_dir.is_dir());
        assert_eq!(fs::read_dir(&level_dir).unwrap().count(), 0);
    }
}
