//! 資料快照

use serde::{Deserialize, Serialize};

use crate::catalog::ProductCatalog;
use crate::material_ledger::MaterialLedger;
use crate::order_ledger::OrderLedger;

/// 某一時刻的完整業務資料
///
/// 每次異動都由目前快照計算出下一份完整快照，再整份替換。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSnapshot {
    pub orders: OrderLedger,
    pub products: ProductCatalog,
    pub materials: MaterialLedger,
}

impl ShopSnapshot {
    /// 創建新的快照
    pub fn new(orders: OrderLedger, products: ProductCatalog, materials: MaterialLedger) -> Self {
        Self {
            orders,
            products,
            materials,
        }
    }
}
