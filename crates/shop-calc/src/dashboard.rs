//! 儀表板指標

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shop_core::{MaterialLedger, Order, OrderOrigin, OrderStatus, ShopSnapshot, StockLevel};

/// 時間範圍（依訂單建立日期篩選）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "TUDO")]
    All,
    #[serde(rename = "HOJE")]
    Today,
    #[serde(rename = "7 DIAS")]
    Last7Days,
    #[serde(rename = "30 DIAS")]
    Last30Days,
    #[serde(rename = "1 ANO")]
    Last365Days,
}

impl TimeRange {
    /// 範圍起始日（含）；全部範圍回傳 None
    pub fn start_date(self, today: NaiveDate) -> Option<NaiveDate> {
        let days = match self {
            TimeRange::All => return None,
            TimeRange::Today => 0,
            TimeRange::Last7Days => 6,
            TimeRange::Last30Days => 29,
            TimeRange::Last365Days => 364,
        };
        Some(today - Duration::days(days))
    }

    /// 訂單是否落在範圍內（沒有建立日期的訂單只出現在全部範圍）
    pub fn includes(self, order: &Order, today: NaiveDate) -> bool {
        match self.start_date(today) {
            None => true,
            Some(start) => order
                .created_at
                .map(|created| created >= start && created <= today)
                .unwrap_or(false),
        }
    }
}

/// 各狀態訂單數
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub late: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// 單一通路統計（不含已取消訂單）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub orders: usize,
    pub revenue: Decimal,
}

/// 儀表板摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub range: TimeRange,
    pub order_count: usize,
    pub status_counts: StatusCounts,
    /// 已完成訂單的收入
    pub realized_revenue: Decimal,
    /// 進行中（待交付 + 逾期）訂單的預計收入
    pub forecast_revenue: Decimal,
    pub physical: ChannelStats,
    pub online: ChannelStats,
    pub low_stock_materials: usize,
    pub critical_materials: usize,
    /// 原料庫存總價值
    pub inventory_value: Decimal,
}

/// 補貨建議
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplenishmentLine {
    pub material_id: String,
    pub material_name: String,
    pub unit: String,
    pub level: StockLevel,
    pub stock: Decimal,
    pub min_stock: Decimal,
    /// 補足到最低庫存的數量
    pub shortfall: Decimal,
    pub estimated_cost: Decimal,
}

/// 儀表板計算器
pub struct DashboardCalculator;

impl DashboardCalculator {
    /// 計算指定時間範圍的摘要
    pub fn summarize(snapshot: &ShopSnapshot, range: TimeRange, today: NaiveDate) -> DashboardSummary {
        let mut summary = DashboardSummary {
            range,
            order_count: 0,
            status_counts: StatusCounts::default(),
            realized_revenue: Decimal::ZERO,
            forecast_revenue: Decimal::ZERO,
            physical: ChannelStats::default(),
            online: ChannelStats::default(),
            low_stock_materials: 0,
            critical_materials: 0,
            inventory_value: Decimal::ZERO,
        };

        for order in snapshot.orders.iter().filter(|o| range.includes(o, today)) {
            summary.order_count += 1;

            match order.status {
                OrderStatus::Pendente => summary.status_counts.pending += 1,
                OrderStatus::Atrasado => summary.status_counts.late += 1,
                OrderStatus::Concluido => summary.status_counts.completed += 1,
                OrderStatus::Cancelado => summary.status_counts.cancelled += 1,
            }

            if order.status == OrderStatus::Cancelado {
                continue;
            }

            if order.status.is_completed() {
                summary.realized_revenue = summary.realized_revenue.saturating_add(order.total_value);
            } else {
                summary.forecast_revenue = summary.forecast_revenue.saturating_add(order.total_value);
            }

            let channel = match order.origin {
                OrderOrigin::Fisico => &mut summary.physical,
                OrderOrigin::Online => &mut summary.online,
            };
            channel.orders += 1;
            channel.revenue = channel.revenue.saturating_add(order.total_value);
        }

        for material in snapshot.materials.iter() {
            summary.inventory_value = summary.inventory_value.saturating_add(material.stock_value());
            match material.stock_level() {
                StockLevel::Ok => {}
                StockLevel::Low => summary.low_stock_materials += 1,
                StockLevel::Critical => summary.critical_materials += 1,
            }
        }

        tracing::debug!(
            "儀表板 {:?}：訂單 {} 筆，已實現 {}，預計 {}",
            range,
            summary.order_count,
            summary.realized_revenue,
            summary.forecast_revenue
        );

        summary
    }

    /// 庫存偏低或危急原料的補貨清單（依帳本順序）
    pub fn replenishment(materials: &MaterialLedger) -> Vec<ReplenishmentLine> {
        materials
            .below_minimum()
            .into_iter()
            .map(|material| {
                let shortfall = material.replenishment_needed();
                ReplenishmentLine {
                    material_id: material.id.clone(),
                    material_name: material.name.clone(),
                    unit: material.unit.clone(),
                    level: material.stock_level(),
                    stock: material.stock,
                    min_stock: material.min_stock,
                    shortfall,
                    estimated_cost: shortfall.saturating_mul(material.cost_per_unit),
                }
            })
            .collect()
    }
}
