//! 原料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 原料（木材、五金、塗料等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// 原料ID
    pub id: String,

    /// 名稱（配方以名稱片段對應）
    pub name: String,

    /// 計量單位（m²、un、L）
    #[serde(default)]
    pub unit: String,

    /// 單位成本
    #[serde(default)]
    pub cost_per_unit: Decimal,

    /// 現有庫存（允許為負，用以暴露資料問題）
    pub stock: Decimal,

    /// 最低庫存
    #[serde(default)]
    pub min_stock: Decimal,
}

/// 庫存警戒等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockLevel {
    /// 正常
    Ok,
    /// 偏低：不高於最低庫存
    Low,
    /// 危急：低於最低庫存的一半
    Critical,
}

impl Material {
    /// 創建新的原料
    pub fn new(id: impl Into<String>, name: impl Into<String>, stock: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: String::new(),
            cost_per_unit: Decimal::ZERO,
            stock,
            min_stock: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置單位
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// 建構器模式：設置單位成本
    pub fn with_cost_per_unit(mut self, cost: Decimal) -> Self {
        self.cost_per_unit = cost;
        self
    }

    /// 建構器模式：設置最低庫存
    pub fn with_min_stock(mut self, min_stock: Decimal) -> Self {
        self.min_stock = min_stock;
        self
    }

    /// 名稱是否包含指定片段（去除首尾空白、不分大小寫）
    ///
    /// 空白片段包含於任何名稱中，因此對應帳本中的第一個原料。
    pub fn matches_fragment(&self, fragment: &str) -> bool {
        let needle = fragment.trim().to_lowercase();
        self.name.to_lowercase().contains(&needle)
    }

    /// 計算庫存警戒等級
    pub fn stock_level(&self) -> StockLevel {
        let half_minimum = self.min_stock / Decimal::TWO;
        if self.stock < half_minimum {
            StockLevel::Critical
        } else if self.stock <= self.min_stock {
            StockLevel::Low
        } else {
            StockLevel::Ok
        }
    }

    /// 補足到最低庫存所需的數量
    pub fn replenishment_needed(&self) -> Decimal {
        if self.stock < self.min_stock {
            self.min_stock.saturating_sub(self.stock)
        } else {
            Decimal::ZERO
        }
    }

    /// 現有庫存的總價值
    pub fn stock_value(&self) -> Decimal {
        self.stock.saturating_mul(self.cost_per_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_material() {
        let material = Material::new("8", "Madeira Carvalho", Decimal::from(50))
            .with_unit("m²")
            .with_cost_per_unit(Decimal::from(120))
            .with_min_stock(Decimal::from(10));

        assert_eq!(material.id, "8");
        assert_eq!(material.stock, Decimal::from(50));
        assert_eq!(material.stock_value(), Decimal::from(6000));
        assert_eq!(material.stock_level(), StockLevel::Ok);
    }

    #[rstest]
    #[case("Oak", true)]
    #[case("  oak ", true)]
    #[case("PANEL", true)]
    #[case("k Pa", true)]
    #[case("Pine", false)]
    #[case("", true)]
    #[case("   ", true)]
    fn test_matches_fragment(#[case] fragment: &str, #[case] expected: bool) {
        let material = Material::new("M1", "Oak Panel", Decimal::from(50));
        assert_eq!(material.matches_fragment(fragment), expected);
    }

    #[rstest]
    #[case(50, 20, StockLevel::Ok)]
    #[case(20, 20, StockLevel::Low)]
    #[case(10, 20, StockLevel::Low)]
    #[case(9, 20, StockLevel::Critical)]
    #[case(-3, 0, StockLevel::Critical)]
    fn test_stock_level(#[case] stock: i64, #[case] min_stock: i64, #[case] expected: StockLevel) {
        let material = Material::new("M1", "Verniz Premium", Decimal::from(stock))
            .with_min_stock(Decimal::from(min_stock));
        assert_eq!(material.stock_level(), expected);
    }

    #[test]
    fn test_replenishment_needed() {
        let material = Material::new("2", "Parafuso Phillips 3.5x40", Decimal::from(12))
            .with_min_stock(Decimal::from(50));
        assert_eq!(material.replenishment_needed(), Decimal::from(38));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"id":"1","name":"Chapa de MDF 18mm","unit":"m²","costPerUnit":85.0,"stock":150,"minStock":20}"#;
        let material: Material = serde_json::from_str(json).unwrap();

        assert_eq!(material.cost_per_unit, Decimal::from(85));
        assert_eq!(material.min_stock, Decimal::from(20));
    }
}
