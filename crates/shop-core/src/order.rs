//! 訂單模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, ShopError};

/// 訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    /// 待交付（初始狀態）
    #[default]
    #[serde(rename = "PENDENTE")]
    Pendente,
    /// 逾期（由截止日期推導，可逆）
    #[serde(rename = "ATRASADO")]
    Atrasado,
    /// 已完成（已交付，原料已消耗）
    #[serde(rename = "CONCLUÍDO")]
    Concluido,
    /// 已取消
    #[serde(rename = "CANCELADO")]
    Cancelado,
}

impl OrderStatus {
    /// 是否為已完成
    pub fn is_completed(self) -> bool {
        self == OrderStatus::Concluido
    }

    /// 是否為終止狀態（不參與逾期推導）
    pub fn is_closed(self) -> bool {
        matches!(self, OrderStatus::Concluido | OrderStatus::Cancelado)
    }

    /// 是否仍在進行中（收入計為預計）
    pub fn is_open(self) -> bool {
        !self.is_closed()
    }

    /// 對外顯示的狀態字串
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pendente => "PENDENTE",
            OrderStatus::Atrasado => "ATRASADO",
            OrderStatus::Concluido => "CONCLUÍDO",
            OrderStatus::Cancelado => "CANCELADO",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 銷售通路
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderOrigin {
    /// 實體店面
    #[default]
    #[serde(rename = "FISICO")]
    Fisico,
    /// 線上
    #[serde(rename = "ONLINE")]
    Online,
}

/// 訂單明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// 產品ID（產品刪除後可能懸空）
    pub product_id: String,

    /// 下單時的產品名稱
    #[serde(default)]
    pub product_name: String,

    /// 數量
    pub quantity: Decimal,

    /// 單價
    #[serde(default)]
    pub unit_price: Decimal,

    /// 小計（數量 × 單價）
    #[serde(default)]
    pub total: Decimal,
}

impl OrderItem {
    /// 創建新的訂單明細，小計自動計算
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            unit_price,
            total: quantity.saturating_mul(unit_price),
        }
    }
}

/// 訂單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// 訂單ID（唯一且穩定）
    pub id: String,

    /// 客戶
    pub client: String,

    /// 明細
    pub items: Vec<OrderItem>,

    /// 交付截止日期
    pub deadline: NaiveDate,

    /// 建立日期（未提供時於建立訂單當天補上）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    /// 狀態
    #[serde(default)]
    pub status: OrderStatus,

    /// 銷售通路
    #[serde(default)]
    pub origin: OrderOrigin,

    /// 運費
    #[serde(default)]
    pub shipping_cost: Decimal,

    /// 總金額（明細小計 + 運費，由呼叫端維護）
    #[serde(default)]
    pub total_value: Decimal,
}

impl Order {
    /// 創建新的訂單（狀態為待交付），總金額由明細計算
    pub fn new(
        id: impl Into<String>,
        client: impl Into<String>,
        items: Vec<OrderItem>,
        deadline: NaiveDate,
    ) -> Self {
        let mut order = Self {
            id: id.into(),
            client: client.into(),
            items,
            deadline,
            created_at: None,
            status: OrderStatus::Pendente,
            origin: OrderOrigin::Fisico,
            shipping_cost: Decimal::ZERO,
            total_value: Decimal::ZERO,
        };
        order.total_value = order.expected_total();
        order
    }

    /// 建構器模式：設置建立日期
    pub fn with_created_at(mut self, created_at: NaiveDate) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// 建構器模式：設置銷售通路
    pub fn with_origin(mut self, origin: OrderOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// 建構器模式：設置運費並重算總金額
    pub fn with_shipping_cost(mut self, shipping_cost: Decimal) -> Self {
        self.shipping_cost = shipping_cost;
        self.total_value = self.expected_total();
        self
    }

    /// 明細小計總和
    pub fn items_subtotal(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.total))
    }

    /// 預期總金額（明細小計 + 運費）
    pub fn expected_total(&self) -> Decimal {
        self.items_subtotal().saturating_add(self.shipping_cost)
    }

    /// 截止日期是否早於今天
    pub fn is_past_deadline(&self, today: NaiveDate) -> bool {
        self.deadline < today
    }

    /// 檢查訂單資料
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(ShopError::InvalidOrder(format!("訂單 {} 沒有明細", self.id)));
        }

        for item in &self.items {
            if item.quantity <= Decimal::ZERO {
                return Err(ShopError::InvalidOrder(format!(
                    "訂單 {} 的產品 {} 數量必須大於 0",
                    self.id, item.product_id
                )));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(ShopError::InvalidOrder(format!(
                    "訂單 {} 的產品 {} 單價不可為負",
                    self.id, item.product_id
                )));
            }
            if item.quantity.checked_mul(item.unit_price).is_none() {
                return Err(ShopError::Overflow(format!(
                    "訂單 {} 的產品 {} 小計",
                    self.id, item.product_id
                )));
            }
        }

        if self.shipping_cost < Decimal::ZERO {
            return Err(ShopError::InvalidOrder(format!("訂單 {} 運費不可為負", self.id)));
        }

        Ok(())
    }
}
