//! 產品模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recipe::RecipeLine;
use crate::{Result, ShopError};

/// 成品（家具）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// 產品ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 庫存單位編碼
    #[serde(default)]
    pub sku: String,

    /// 配方（每單位產品的原料用量）
    #[serde(default)]
    pub materials: Vec<RecipeLine>,

    /// 成本
    #[serde(default)]
    pub cost: Decimal,

    /// 成品庫存
    pub stock: Decimal,

    /// 圖片網址
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// 創建新的產品
    pub fn new(id: impl Into<String>, name: impl Into<String>, stock: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: String::new(),
            materials: Vec::new(),
            cost: Decimal::ZERO,
            stock,
            image: String::new(),
        }
    }

    /// 建構器模式：設置 SKU
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// 建構器模式：設置配方
    pub fn with_recipe(mut self, recipe: Vec<RecipeLine>) -> Self {
        self.materials = recipe;
        self
    }

    /// 建構器模式：設置成本
    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.cost = cost;
        self
    }

    /// 建構器模式：設置圖片
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// 調整庫存，結果最小為 0
    pub fn adjust_stock_clamped(&mut self, delta: Decimal) -> Result<Decimal> {
        let stock = self.checked_stock(delta)?;
        self.stock = stock.max(Decimal::ZERO);
        Ok(self.stock)
    }

    /// 調整庫存，不截斷；溢位時庫存不變
    pub fn adjust_stock_unclamped(&mut self, delta: Decimal) -> Result<Decimal> {
        self.stock = self.checked_stock(delta)?;
        Ok(self.stock)
    }

    fn checked_stock(&self, delta: Decimal) -> Result<Decimal> {
        self.stock.checked_add(delta).ok_or_else(|| {
            ShopError::Overflow(format!("產品 {} 庫存 {} + {}", self.id, self.stock, delta))
        })
    }

    /// 是否有配方
    pub fn has_recipe(&self) -> bool {
        !self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product() {
        let product = Product::new("1", "Mesa de Jantar Rústica", Decimal::from(12))
            .with_sku("MDR-001")
            .with_cost(Decimal::new(45075, 2))
            .with_recipe(vec![
                RecipeLine::fragment("Madeira Carvalho", Decimal::from(2)),
                RecipeLine::fragment("Parafusos", Decimal::from(30)),
            ]);

        assert_eq!(product.sku, "MDR-001");
        assert_eq!(product.materials.len(), 2);
        assert!(product.has_recipe());
    }

    #[test]
    fn test_adjust_stock_clamped() {
        let mut product = Product::new("2", "Cadeira de Escritório", Decimal::from(5));

        assert_eq!(product.adjust_stock_clamped(Decimal::from(-3)).unwrap(), Decimal::from(2));
        assert_eq!(product.adjust_stock_clamped(Decimal::from(-10)).unwrap(), Decimal::ZERO);
        assert_eq!(product.adjust_stock_clamped(Decimal::from(4)).unwrap(), Decimal::from(4));
    }

    #[test]
    fn test_adjust_stock_overflow_keeps_stock() {
        let mut product = Product::new("2", "Cadeira de Escritório", Decimal::from(5));

        assert!(matches!(product.adjust_stock_unclamped(Decimal::MAX), Err(ShopError::Overflow(_))));
        assert!(matches!(product.adjust_stock_clamped(Decimal::MAX), Err(ShopError::Overflow(_))));
        assert_eq!(product.stock, Decimal::from(5));

        assert_eq!(product.adjust_stock_unclamped(Decimal::from(-7)).unwrap(), Decimal::from(-2));
    }

    #[test]
    fn test_deserialize_legacy_product() {
        let json = r#"{
            "id": "3", "name": "Estante Modular", "sku": "EST-003",
            "materials": ["Chapa de MDF 18mm: 5", "Suportes: 16"],
            "cost": 320.00, "stock": 8, "image": "https://picsum.photos/400/400?random=3"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.stock, Decimal::from(8));
        assert_eq!(
            product.materials[1],
            RecipeLine::fragment("Suportes", Decimal::from(16))
        );
    }
}
