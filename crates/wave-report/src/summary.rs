//! 控制台摘要

use std::fmt;
use wave_calc::WaveAllocation;

const LABEL_WIDTH: usize = 12;
const CELL_WIDTH: usize = 10;
const MISSING_CELL: &str = "-";

/// 波次配貨摘要表
///
/// 第一欄左對齊寬 12，其餘各層級欄右對齊寬 10；
/// 層級沒有第 k 筆儲位試算時該格顯示 `-`。
pub struct WaveSummary<'a> {
    allocation: &'a WaveAllocation,
}

impl<'a> WaveSummary<'a> {
    pub fn new(allocation: &'a WaveAllocation) -> Self {
        Self { allocation }
    }

    fn row<I, S>(f: &mut fmt::Formatter<'_>, label: &str, cells: I) -> fmt::Result
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        write!(f, "{:<width$}", label, width = LABEL_WIDTH)?;
        for cell in cells {
            write!(f, "{:>width$}", cell.to_string(), width = CELL_WIDTH)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for WaveSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiers = &self.allocation.tiers;

        Self::row(f, "Level", tiers.iter().map(|t| t.tier.label()))?;
        Self::row(f, "=====", tiers.iter().map(|_| "="))?;
        Self::row(f, "Ship now", tiers.iter().map(|t| t.ready.len()))?;
        Self::row(f, "With replen", tiers.iter().map(|t| t.replen.len()))?;
        writeln!(f)?;
        Self::row(f, "Missing SKUs", tiers.iter().map(|t| t.slot_candidates.len()))?;
        writeln!(f)?;

        for k in 0..self.allocation.max_slot_candidates() {
            let cells = tiers.iter().map(|t| {
                t.slot_candidates
                    .get(k)
                    .map(|c| c.unlocked_orders.len().to_string())
                    .unwrap_or_else(|| MISSING_CELL.to_string())
            });
            Self::row(f, &format!("+{} SKU", k + 1), cells)?;
        }

        Ok(())
    }
}
