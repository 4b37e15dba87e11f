//! 產品目錄

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::{Result, ShopError};

/// 產品目錄：產品ID → 產品（含配方）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 查詢產品
    pub fn get(&self, id: &str) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ShopError::ProductNotFound(id.to_string()))
    }

    /// 是否存在指定產品
    pub fn contains(&self, id: &str) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// 新增或取代產品；回傳 true 表示新增
    pub fn upsert(&mut self, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product;
                false
            }
            None => {
                self.products.push(product);
                true
            }
        }
    }

    /// 刪除產品（既有訂單的明細不受影響）
    pub fn delete(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    /// 手動調整庫存，結果最小為 0；回傳調整後庫存
    pub fn adjust_stock(&mut self, id: &str, delta: Decimal) -> Result<Decimal> {
        self.get_mut(id)?.adjust_stock_clamped(delta)
    }

    /// 訂單保留/釋放庫存：不截斷（允許超賣），使建立與刪除互為逆運算
    pub fn apply_reservation(&mut self, id: &str, delta: Decimal) -> Result<Decimal> {
        self.get_mut(id)?.adjust_stock_unclamped(delta)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ShopError::ProductNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// 可變迭代（配方綁定使用）
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Product> {
        self.products.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for ProductCatalog {
    fn from(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ProductCatalog {
        ProductCatalog::from(vec![
            Product::new("1", "Mesa de Jantar Rústica", Decimal::from(12)),
            Product::new("4", "Bancada de Cozinha", Decimal::from(5)),
        ])
    }

    #[test]
    fn test_adjust_stock_is_clamped() {
        let mut catalog = catalog();

        assert_eq!(catalog.adjust_stock("4", Decimal::from(-8)).unwrap(), Decimal::ZERO);
        assert_eq!(catalog.adjust_stock("4", Decimal::from(3)).unwrap(), Decimal::from(3));
        assert!(matches!(
            catalog.adjust_stock("9", Decimal::ONE),
            Err(ShopError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_reservation_is_not_clamped() {
        let mut catalog = catalog();

        assert_eq!(catalog.apply_reservation("4", Decimal::from(-8)).unwrap(), Decimal::from(-3));
        assert_eq!(catalog.apply_reservation("4", Decimal::from(8)).unwrap(), Decimal::from(5));
    }

    #[test]
    fn test_upsert_and_delete() {
        let mut catalog = catalog();

        assert!(!catalog.upsert(Product::new("1", "Mesa Rústica", Decimal::from(2))));
        assert_eq!(catalog.get("1").unwrap().name, "Mesa Rústica");
        assert!(catalog.upsert(Product::new("7", "Banco", Decimal::ZERO)));
        assert_eq!(catalog.len(), 3);

        assert!(catalog.delete("7").is_some());
        assert!(catalog.get("7").is_err());
    }
}
