//! 訂單帳本

use serde::{Deserialize, Serialize};

use crate::order::{Order, OrderStatus};
use crate::{Result, ShopError};

/// 訂單帳本：最新的訂單在最前面
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    /// 創建空帳本
    pub fn new() -> Self {
        Self::default()
    }

    /// 查詢訂單
    pub fn get(&self, id: &str) -> Result<&Order> {
        self.orders
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| ShopError::OrderNotFound(id.to_string()))
    }

    /// 是否存在指定訂單
    pub fn contains(&self, id: &str) -> bool {
        self.orders.iter().any(|o| o.id == id)
    }

    /// 在最前面加入新訂單；ID 重複時失敗
    pub fn insert_front(&mut self, order: Order) -> Result<()> {
        if self.contains(&order.id) {
            return Err(ShopError::DuplicateId(order.id));
        }
        self.orders.insert(0, order);
        Ok(())
    }

    /// 移除訂單
    pub fn remove(&mut self, id: &str) -> Result<Order> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| ShopError::OrderNotFound(id.to_string()))?;
        Ok(self.orders.remove(index))
    }

    /// 設置訂單狀態；回傳原狀態
    pub fn set_status(&mut self, id: &str, status: OrderStatus) -> Result<OrderStatus> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ShopError::OrderNotFound(id.to_string()))?;
        Ok(std::mem::replace(&mut order.status, status))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Order> {
        self.orders.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl From<Vec<Order>> for OrderLedger {
    fn from(orders: Vec<Order>) -> Self {
        Self { orders }
    }
}
