//! # Shop Reconciliation Engine
//!
//! 訂單驅動的庫存對帳引擎：
//! - 建立/刪除訂單時保留與釋放成品庫存
//! - 訂單完成/撤回完成時消耗與歸還原料庫存
//! - 依截止日期推導逾期狀態

pub mod consumption;
pub mod costing;
pub mod dashboard;
pub mod lateness;
pub mod reconciler;
pub mod reservation;
pub mod resolution;

// Re-export 主要類型
pub use consumption::{ConsumptionCalculator, MaterialMovement};
pub use costing::{CostCalculator, CostEstimate, CostLine};
pub use dashboard::{DashboardCalculator, DashboardSummary, ReplenishmentLine, TimeRange};
pub use lateness::{derive_status, LatenessSweep};
pub use reconciler::Reconciler;
pub use reservation::{ReservationCalculator, ReservationDirection};
pub use resolution::RecipeResolver;

use rust_decimal::Decimal;
use serde::Serialize;
use shop_core::{OrderStatus, ShopSnapshot};

/// 庫存異動種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockEffectKind {
    /// 建立訂單時保留成品
    Reserve,
    /// 刪除未完成訂單時釋放成品
    Release,
    /// 訂單完成時消耗原料
    Consume,
    /// 撤回完成時歸還原料
    Restore,
}

/// 異動對象
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum StockTarget {
    Product(String),
    Material(String),
}

/// 已套用的單筆庫存異動（稽核記錄）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEffect {
    pub order_id: String,
    pub target: StockTarget,
    pub kind: StockEffectKind,
    pub delta: Decimal,
    /// 異動後庫存
    pub stock_after: Decimal,
}

/// 對帳警告（被略過的懸空參照等）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileWarning {
    pub order_id: Option<String>,
    pub reference: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ReconcileWarning {
    pub fn new(
        order_id: Option<String>,
        reference: String,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            order_id,
            reference,
            message,
            severity,
        }
    }

    pub fn info(order_id: Option<String>, reference: String, message: String) -> Self {
        Self::new(order_id, reference, message, WarningSeverity::Info)
    }

    pub fn warning(order_id: Option<String>, reference: String, message: String) -> Self {
        Self::new(order_id, reference, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Info,
    Warning,
}

/// 一次異動的結果：下一份快照與其附帶的記錄
#[derive(Debug, Clone)]
pub struct Transition {
    /// 下一份完整快照
    pub next: ShopSnapshot,

    /// 已套用的庫存異動
    pub effects: Vec<StockEffect>,

    /// 狀態變更
    pub status_changes: Vec<StatusChange>,

    /// 警告信息
    pub warnings: Vec<ReconcileWarning>,
}

impl Transition {
    /// 以下一份快照創建空結果
    pub fn new(next: ShopSnapshot) -> Self {
        Self {
            next,
            effects: Vec::new(),
            status_changes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// 指定對象的異動總量
    pub fn net_delta(&self, target: &StockTarget) -> Decimal {
        self.effects
            .iter()
            .filter(|e| &e.target == target)
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.delta))
    }
}

/// 訂單狀態變更記錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub order_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl StatusChange {
    pub fn new(order_id: impl Into<String>, from: OrderStatus, to: OrderStatus) -> Self {
        Self {
            order_id: order_id.into(),
            from,
            to,
        }
    }
}
