//! 逾期狀態推導

use chrono::NaiveDate;
use shop_core::{Order, OrderLedger, OrderStatus};

use crate::StatusChange;

/// 推導訂單在指定日期應有的狀態
///
/// 已完成與已取消的訂單不變；其餘訂單截止日期早於今天為逾期，
/// 否則逾期狀態恢復為待交付。截止日期等於今天不算逾期。
pub fn derive_status(order: &Order, today: NaiveDate) -> OrderStatus {
    if order.status.is_closed() {
        return order.status;
    }

    if order.is_past_deadline(today) {
        OrderStatus::Atrasado
    } else if order.status == OrderStatus::Atrasado {
        OrderStatus::Pendente
    } else {
        order.status
    }
}

/// 逾期掃描
pub struct LatenessSweep;

impl LatenessSweep {
    /// 對所有訂單套用逾期推導；只改變狀態，不觸發任何庫存異動
    pub fn apply(orders: &mut OrderLedger, today: NaiveDate) -> Vec<StatusChange> {
        let mut changes = Vec::new();

        for order in orders.iter_mut() {
            let derived = derive_status(order, today);
            if derived != order.status {
                tracing::debug!("訂單 {} 狀態推導: {} → {}", order.id, order.status, derived);
                changes.push(StatusChange::new(order.id.clone(), order.status, derived));
                order.status = derived;
            }
        }

        if !changes.is_empty() {
            tracing::info!("逾期掃描 ({})：{} 筆訂單狀態變更", today, changes.len());
        }

        changes
    }
}
