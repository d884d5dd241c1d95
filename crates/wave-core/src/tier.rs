//! 儲位層級（Tier）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 儲位/補貨層級
///
/// 同一批波次訂單會分別對四個層級獨立評估，層級之間不共享任何庫存狀態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    L1,
    L3,
    L4,
    L6,
}

impl Tier {
    /// 全部層級（依報表欄位順序）
    pub const ALL: [Tier; 4] = [Tier::L1, Tier::L3, Tier::L4, Tier::L6];

    /// 層級標籤（1, 3, 4, 6）
    pub fn label(self) -> u8 {
        match self {
            Tier::L1 => 1,
            Tier::L3 => 3,
            Tier::L4 => 4,
            Tier::L6 => 6,
        }
    }

    /// 在庫存輸入檔中的欄位序號（0..4）
    pub fn column(self) -> usize {
        match self {
            Tier::L1 => 0,
            Tier::L3 => 1,
            Tier::L4 => 2,
            Tier::L6 => 3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Tier::L1, 1, 0)]
    #[case(Tier::L3, 3, 1)]
    #[case(Tier::L4, 4, 2)]
    #[case(Tier::L6, 6, 3)]
    fn test_tier_label_and_column(#[case] tier: Tier, #[case] label: u8, #[case] column: usize) {
        assert_eq!(tier.label(), label);
        assert_eq!(tier.column(), column);
        assert_eq!(tier.to_string(), label.to_string());
    }

    #[test]
    fn test_all_follows_column_order() {
        let columns: Vec<usize> = Tier::ALL.iter().map(|t| t.column()).collect();
        assert_eq!(columns, vec![0, 1, 2, 3]);
        assert!(Tier::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
