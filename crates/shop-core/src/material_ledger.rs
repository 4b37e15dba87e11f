//! 原料帳本

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::material::{Material, StockLevel};
use crate::{Result, ShopError};

/// 原料帳本：原料ID → 原料，保持加入順序（名稱片段比對取第一個符合者）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialLedger {
    materials: Vec<Material>,
}

impl MaterialLedger {
    /// 創建空帳本
    pub fn new() -> Self {
        Self::default()
    }

    /// 查詢原料
    pub fn get(&self, id: &str) -> Result<&Material> {
        self.materials
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ShopError::MaterialNotFound(id.to_string()))
    }

    /// 是否存在指定原料
    pub fn contains(&self, id: &str) -> bool {
        self.materials.iter().any(|m| m.id == id)
    }

    /// 新增或取代原料；回傳 true 表示新增
    pub fn upsert(&mut self, material: Material) -> bool {
        match self.materials.iter_mut().find(|m| m.id == material.id) {
            Some(existing) => {
                *existing = material;
                false
            }
            None => {
                self.materials.push(material);
                true
            }
        }
    }

    /// 刪除原料
    pub fn delete(&mut self, id: &str) -> Option<Material> {
        let index = self.materials.iter().position(|m| m.id == id)?;
        Some(self.materials.remove(index))
    }

    /// 調整庫存（不做下限截斷，庫存可為負）；回傳調整後庫存
    pub fn adjust_stock(&mut self, id: &str, delta: Decimal) -> Result<Decimal> {
        let material = self
            .materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ShopError::MaterialNotFound(id.to_string()))?;

        material.stock = material.stock.checked_add(delta).ok_or_else(|| {
            ShopError::Overflow(format!("原料 {} 庫存 {} + {}", material.id, material.stock, delta))
        })?;
        if material.stock < Decimal::ZERO {
            tracing::warn!("原料 {} ({}) 庫存為負: {}", material.id, material.name, material.stock);
        }
        Ok(material.stock)
    }

    /// 以名稱片段查找第一個符合的原料
    pub fn find_by_fragment(&self, fragment: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.matches_fragment(fragment))
    }

    /// 庫存偏低或危急的原料
    pub fn below_minimum(&self) -> Vec<&Material> {
        self.materials
            .iter()
            .filter(|m| m.stock_level() != StockLevel::Ok)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl From<Vec<Material>> for MaterialLedger {
    fn from(materials: Vec<Material>) -> Self {
        Self { materials }
    }
}
