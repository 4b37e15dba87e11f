//! 成品庫存保留與釋放

use rust_decimal::Decimal;
use shop_core::{MatchPolicy, Order, ProductCatalog, ShopError};

use crate::{ReconcileWarning, StockEffect, StockEffectKind, StockTarget};

/// 保留方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationDirection {
    /// 建立訂單：扣減成品庫存
    Reserve,
    /// 刪除未完成訂單：加回成品庫存
    Release,
}

impl ReservationDirection {
    fn signed(self, quantity: Decimal) -> Decimal {
        match self {
            ReservationDirection::Reserve => -quantity,
            ReservationDirection::Release => quantity,
        }
    }

    fn kind(self) -> StockEffectKind {
        match self {
            ReservationDirection::Reserve => StockEffectKind::Reserve,
            ReservationDirection::Release => StockEffectKind::Release,
        }
    }
}

/// 保留結果
#[derive(Debug, Clone, Default)]
pub struct ReservationOutcome {
    pub effects: Vec<StockEffect>,
    pub warnings: Vec<ReconcileWarning>,
}

/// 成品保留計算器
pub struct ReservationCalculator;

impl ReservationCalculator {
    /// 依訂單明細調整成品庫存
    ///
    /// 不檢查可用量（允許超賣）；找不到產品時依策略略過或失敗。
    pub fn apply(
        order: &Order,
        products: &mut ProductCatalog,
        direction: ReservationDirection,
        policy: MatchPolicy,
    ) -> shop_core::Result<ReservationOutcome> {
        let mut outcome = ReservationOutcome::default();

        for item in &order.items {
            let delta = direction.signed(item.quantity);

            match products.apply_reservation(&item.product_id, delta) {
                Ok(stock_after) => {
                    tracing::debug!(
                        "訂單 {} {:?} 產品 {}: {} → 庫存 {}",
                        order.id,
                        direction,
                        item.product_id,
                        delta,
                        stock_after
                    );
                    outcome.effects.push(StockEffect {
                        order_id: order.id.clone(),
                        target: StockTarget::Product(item.product_id.clone()),
                        kind: direction.kind(),
                        delta,
                        stock_after,
                    });
                }
                Err(ShopError::ProductNotFound(product_id)) if policy == MatchPolicy::WarnAndSkip => {
                    tracing::warn!("訂單 {} 參照的產品 {} 不存在，略過", order.id, product_id);
                    outcome.warnings.push(ReconcileWarning::warning(
                        Some(order.id.clone()),
                        product_id,
                        "產品不存在，成品庫存未調整".to_string(),
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shop_core::{OrderItem, Product};

    fn catalog() -> ProductCatalog {
        ProductCatalog::from(vec![
            Product::new("P1", "Banco Távola", Decimal::from(10)),
            Product::new("P2", "Estante Magia", Decimal::from(2)),
        ])
    }

    fn order(items: Vec<OrderItem>) -> Order {
        Order::new("#1", "Lancelot", items, NaiveDate::from_ymd_opt(2025, 12, 20).unwrap())
    }

    #[test]
    fn test_reserve_and_release_are_inverse() {
        let mut products = catalog();
        let order = order(vec![
            OrderItem::new("P1", "Banco Távola", Decimal::from(3), Decimal::from(450)),
            OrderItem::new("P2", "Estante Magia", Decimal::from(5), Decimal::from(3500)),
        ]);

        let reserved = ReservationCalculator::apply(
            &order,
            &mut products,
            ReservationDirection::Reserve,
            MatchPolicy::WarnAndSkip,
        )
        .unwrap();

        assert_eq!(reserved.effects.len(), 2);
        assert_eq!(products.get("P1").unwrap().stock, Decimal::from(7));
        // 超賣：庫存可低於 0
        assert_eq!(products.get("P2").unwrap().stock, Decimal::from(-3));

        ReservationCalculator::apply(
            &order,
            &mut products,
            ReservationDirection::Release,
            MatchPolicy::WarnAndSkip,
        )
        .unwrap();

        assert_eq!(products, catalog());
    }

    #[test]
    fn test_missing_product_is_skipped() {
        let mut products = catalog();
        let order = order(vec![
            OrderItem::new("GONE", "Escudo", Decimal::from(2), Decimal::from(450)),
            OrderItem::new("P1", "Banco Távola", Decimal::ONE, Decimal::from(450)),
        ]);

        let outcome = ReservationCalculator::apply(
            &order,
            &mut products,
            ReservationDirection::Reserve,
            MatchPolicy::WarnAndSkip,
        )
        .unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].reference, "GONE");
        assert_eq!(products.get("P1").unwrap().stock, Decimal::from(9));
    }

    #[test]
    fn test_missing_product_fails_in_strict_mode() {
        let mut products = catalog();
        let order = order(vec![OrderItem::new(
            "GONE",
            "Escudo",
            Decimal::from(2),
            Decimal::from(450),
        )]);

        let result = ReservationCalculator::apply(
            &order,
            &mut products,
            ReservationDirection::Reserve,
            MatchPolicy::Strict,
        );

        assert!(matches!(result, Err(ShopError::ProductNotFound(id)) if id == "GONE"));
    }
}
