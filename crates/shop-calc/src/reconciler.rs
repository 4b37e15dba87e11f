//! 訂單生命週期對帳器
//!
//! 每個操作讀取目前快照，計算出下一份完整快照與異動記錄；
//! 操作失敗時不產生任何部分結果，呼叫端的快照保持不變。

use chrono::NaiveDate;
use shop_core::{EngineConfig, Order, OrderStatus, ShopSnapshot};

use crate::consumption::{ConsumptionCalculator, MaterialMovement};
use crate::lateness::{derive_status, LatenessSweep};
use crate::reservation::{ReservationCalculator, ReservationDirection};
use crate::{ReconcileWarning, StatusChange, Transition};

/// 對帳器
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: EngineConfig,
}

impl Reconciler {
    /// 創建新的對帳器
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 建立訂單
    ///
    /// 1. 檢查訂單資料
    /// 2. 依明細扣減成品庫存（保留）
    /// 3. 以待交付為起點推導逾期狀態
    /// 4. 放在訂單帳本最前面
    pub fn create_order(
        &self,
        snapshot: &ShopSnapshot,
        order: Order,
        today: NaiveDate,
    ) -> shop_core::Result<Transition> {
        order.validate()?;
        if snapshot.orders.contains(&order.id) {
            return Err(shop_core::ShopError::DuplicateId(order.id));
        }

        tracing::info!(
            "建立訂單 {}：客戶 {}，明細 {} 筆",
            order.id,
            order.client,
            order.items.len()
        );

        let mut order = order;
        let mut transition = Transition::new(snapshot.clone());

        if order.status != OrderStatus::Pendente {
            tracing::debug!("新訂單 {} 狀態 {} 重設為待交付", order.id, order.status);
            transition.warnings.push(ReconcileWarning::info(
                Some(order.id.clone()),
                order.status.to_string(),
                "新訂單一律以待交付開始".to_string(),
            ));
            order.status = OrderStatus::Pendente;
        }
        if order.created_at.is_none() {
            order.created_at = Some(today);
        }

        let reservation = ReservationCalculator::apply(
            &order,
            &mut transition.next.products,
            ReservationDirection::Reserve,
            self.config.match_policy,
        )?;
        transition.effects.extend(reservation.effects);
        transition.warnings.extend(reservation.warnings);

        let derived = derive_status(&order, today);
        if derived != order.status {
            transition
                .status_changes
                .push(StatusChange::new(order.id.clone(), order.status, derived));
            order.status = derived;
        }

        transition.next.orders.insert_front(order)?;
        Ok(transition)
    }

    /// 刪除訂單
    ///
    /// 未完成的訂單歸還保留的成品庫存；已完成訂單的成品已出貨，不歸還。
    /// 原料庫存在刪除時一律不變。
    pub fn delete_order(&self, snapshot: &ShopSnapshot, order_id: &str) -> shop_core::Result<Transition> {
        let mut transition = Transition::new(snapshot.clone());
        let order = transition.next.orders.remove(order_id)?;

        tracing::info!("刪除訂單 {}（狀態 {}）", order.id, order.status);

        if !order.status.is_completed() {
            let release = ReservationCalculator::apply(
                &order,
                &mut transition.next.products,
                ReservationDirection::Release,
                self.config.match_policy,
            )?;
            transition.effects.extend(release.effects);
            transition.warnings.extend(release.warnings);
        }

        Ok(transition)
    }

    /// 變更訂單狀態
    ///
    /// - 非完成 → 完成：依配方消耗原料
    /// - 完成 → 非完成：依配方歸還原料
    /// - 其他變更：無庫存異動
    ///
    /// 狀態欄位在異動套用後一律更新。
    pub fn change_status(
        &self,
        snapshot: &ShopSnapshot,
        order_id: &str,
        new_status: OrderStatus,
    ) -> shop_core::Result<Transition> {
        let order = snapshot.orders.get(order_id)?;
        let old_status = order.status;

        tracing::info!("訂單 {} 狀態變更: {} → {}", order_id, old_status, new_status);

        let mut transition = Transition::new(snapshot.clone());

        let movement = match (old_status.is_completed(), new_status.is_completed()) {
            (false, true) => Some(MaterialMovement::Consume),
            (true, false) => Some(MaterialMovement::Restore),
            _ => None,
        };

        if let Some(movement) = movement {
            let outcome = ConsumptionCalculator::apply(
                order,
                &snapshot.products,
                &mut transition.next.materials,
                movement,
                self.config.match_policy,
            )?;
            tracing::debug!("訂單 {} {:?}：原料異動 {} 筆", order_id, movement, outcome.effects.len());
            transition.effects.extend(outcome.effects);
            transition.warnings.extend(outcome.warnings);
        }

        transition.next.orders.set_status(order_id, new_status)?;
        if old_status != new_status {
            transition
                .status_changes
                .push(StatusChange::new(order_id, old_status, new_status));
        }

        Ok(transition)
    }

    /// 重新推導所有訂單的逾期狀態（不觸發庫存異動）
    pub fn refresh_late_statuses(&self, snapshot: &ShopSnapshot, today: NaiveDate) -> Transition {
        let mut transition = Transition::new(snapshot.clone());
        transition.status_changes = LatenessSweep::apply(&mut transition.next.orders, today);
        transition
    }
}
