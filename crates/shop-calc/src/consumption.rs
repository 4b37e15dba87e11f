//! 原料消耗與歸還

use rust_decimal::Decimal;
use shop_core::{MatchPolicy, MaterialLedger, Order, ProductCatalog, ShopError};

use crate::resolution::RecipeResolver;
use crate::{ReconcileWarning, StockEffect, StockEffectKind, StockTarget};

/// 原料移動方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialMovement {
    /// 訂單完成：扣減原料
    Consume,
    /// 撤回完成：加回原料
    Restore,
}

impl MaterialMovement {
    fn signed(self, quantity: Decimal) -> Decimal {
        match self {
            MaterialMovement::Consume => -quantity,
            MaterialMovement::Restore => quantity,
        }
    }

    fn kind(self) -> StockEffectKind {
        match self {
            MaterialMovement::Consume => StockEffectKind::Consume,
            MaterialMovement::Restore => StockEffectKind::Restore,
        }
    }
}

/// 消耗結果
#[derive(Debug, Clone, Default)]
pub struct ConsumptionOutcome {
    pub effects: Vec<StockEffect>,
    pub warnings: Vec<ReconcileWarning>,
}

/// 原料消耗計算器
pub struct ConsumptionCalculator;

impl ConsumptionCalculator {
    /// 依訂單明細與產品目前的配方調整原料庫存
    ///
    /// 每個配方項目的需求量 = 單位用量 × 明細數量；原料庫存不截斷，可為負。
    /// 找不到產品或原料時依策略略過或失敗。
    pub fn apply(
        order: &Order,
        products: &ProductCatalog,
        materials: &mut MaterialLedger,
        movement: MaterialMovement,
        policy: MatchPolicy,
    ) -> shop_core::Result<ConsumptionOutcome> {
        let mut outcome = ConsumptionOutcome::default();

        for item in &order.items {
            let product = match products.get(&item.product_id) {
                Ok(product) => product,
                Err(e) => {
                    if policy == MatchPolicy::Strict {
                        return Err(e);
                    }
                    tracing::warn!(
                        "訂單 {} 參照的產品 {} 不存在，原料未調整",
                        order.id,
                        item.product_id
                    );
                    outcome.warnings.push(ReconcileWarning::warning(
                        Some(order.id.clone()),
                        item.product_id.clone(),
                        "產品不存在，原料庫存未調整".to_string(),
                    ));
                    continue;
                }
            };

            if !product.has_recipe() {
                tracing::debug!("產品 {} 沒有配方，原料不變", product.id);
                continue;
            }

            for line in &product.materials {
                let required = line.required_for(item.quantity)?;

                let material_id = match RecipeResolver::resolve(line, materials) {
                    Some(material) => material.id.clone(),
                    None => {
                        if policy == MatchPolicy::Strict {
                            return Err(ShopError::UnresolvedMaterial {
                                product_id: product.id.clone(),
                                reference: line.material.to_string(),
                            });
                        }
                        tracing::warn!(
                            "產品 {} 的配方項目 {} 找不到原料，略過",
                            product.id,
                            line.material
                        );
                        outcome.warnings.push(ReconcileWarning::warning(
                            Some(order.id.clone()),
                            line.material.to_string(),
                            format!("產品 {} 的配方項目找不到原料", product.id),
                        ));
                        continue;
                    }
                };

                let delta = movement.signed(required);
                let stock_after = materials.adjust_stock(&material_id, delta)?;

                tracing::debug!(
                    "訂單 {} {:?} 原料 {}: {} → 庫存 {}",
                    order.id,
                    movement,
                    material_id,
                    delta,
                    stock_after
                );

                outcome.effects.push(StockEffect {
                    order_id: order.id.clone(),
                    target: StockTarget::Material(material_id),
                    kind: movement.kind(),
                    delta,
                    stock_after,
                });
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shop_core::{Material, OrderItem, Product, RecipeLine};

    fn products() -> ProductCatalog {
        ProductCatalog::from(vec![
            Product::new("P1", "Oak Table", Decimal::from(10))
                .with_recipe(vec![RecipeLine::fragment("Oak", Decimal::from(2))]),
            Product::new("P2", "Office Chair", Decimal::from(25)).with_recipe(vec![
                RecipeLine::fragment("Pine", Decimal::new(15, 1)),
                RecipeLine::bound("M3", Decimal::from(4)),
                RecipeLine::fragment("Casters", Decimal::from(4)),
            ]),
        ])
    }

    fn materials() -> MaterialLedger {
        MaterialLedger::from(vec![
            Material::new("M1", "Oak Panel", Decimal::from(50)),
            Material::new("M2", "Pine Board", Decimal::from(100)),
            Material::new("M3", "Screw 3.5x40", Decimal::from(12)),
        ])
    }

    fn order(items: Vec<OrderItem>) -> Order {
        Order::new("#7", "Merlin", items, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
    }

    #[test]
    fn test_consume_single_line() {
        let mut materials = materials();
        let order = order(vec![OrderItem::new("P1", "Oak Table", Decimal::from(3), Decimal::ZERO)]);

        let outcome = ConsumptionCalculator::apply(
            &order,
            &products(),
            &mut materials,
            MaterialMovement::Consume,
            MatchPolicy::WarnAndSkip,
        )
        .unwrap();

        assert_eq!(materials.get("M1").unwrap().stock, Decimal::from(44));
        assert_eq!(outcome.effects[0].delta, Decimal::from(-6));
        assert_eq!(outcome.effects[0].kind, StockEffectKind::Consume);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_consume_goes_negative_and_skips_unmatched() {
        let mut materials = materials();
        let order = order(vec![OrderItem::new("P2", "Office Chair", Decimal::from(4), Decimal::ZERO)]);

        let outcome = ConsumptionCalculator::apply(
            &order,
            &products(),
            &mut materials,
            MaterialMovement::Consume,
            MatchPolicy::WarnAndSkip,
        )
        .unwrap();

        assert_eq!(materials.get("M2").unwrap().stock, Decimal::from(94));
        assert_eq!(materials.get("M3").unwrap().stock, Decimal::from(-4));
        assert_eq!(outcome.effects.len(), 2);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_restore_reverses_consume() {
        let mut materials = materials();
        let order = order(vec![
            OrderItem::new("P1", "Oak Table", Decimal::from(3), Decimal::ZERO),
            OrderItem::new("P2", "Office Chair", Decimal::from(2), Decimal::ZERO),
        ]);

        for movement in [MaterialMovement::Consume, MaterialMovement::Restore] {
            ConsumptionCalculator::apply(
                &order,
                &products(),
                &mut materials,
                movement,
                MatchPolicy::WarnAndSkip,
            )
            .unwrap();
        }

        assert_eq!(materials, self::materials());
    }

    #[test]
    fn test_strict_mode_rejects_unmatched_material() {
        let mut materials = materials();
        let order = order(vec![OrderItem::new("P2", "Office Chair", Decimal::ONE, Decimal::ZERO)]);

        let result = ConsumptionCalculator::apply(
            &order,
            &products(),
            &mut materials,
            MaterialMovement::Consume,
            MatchPolicy::Strict,
        );

        assert!(matches!(result, Err(ShopError::UnresolvedMaterial { .. })));
    }

    #[test]
    fn test_blank_legacy_fragment_matches_first_material() {
        let products = ProductCatalog::from(vec![Product::new("P9", "Bench", Decimal::from(5))
            .with_recipe(vec![RecipeLine::parse_lenient(": 2")])]);
        let mut materials = materials();
        let order = order(vec![OrderItem::new("P9", "Bench", Decimal::from(3), Decimal::ZERO)]);

        let outcome = ConsumptionCalculator::apply(
            &order,
            &products,
            &mut materials,
            MaterialMovement::Consume,
            MatchPolicy::WarnAndSkip,
        )
        .unwrap();

        assert_eq!(materials.get("M1").unwrap().stock, Decimal::from(44));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_overflowing_requirement_is_an_error() {
        let huge = Decimal::from_i128_with_scale(10_000_000_000_000_000_000, 0);
        let products = ProductCatalog::from(vec![Product::new("P1", "Oak Table", Decimal::from(10))
            .with_recipe(vec![RecipeLine::fragment("Oak", huge)])]);
        let mut materials = materials();
        let order = order(vec![OrderItem::new("P1", "Oak Table", huge, Decimal::ZERO)]);

        let result = ConsumptionCalculator::apply(
            &order,
            &products,
            &mut materials,
            MaterialMovement::Consume,
            MatchPolicy::WarnAndSkip,
        );

        assert!(matches!(result, Err(ShopError::Overflow(_))));
    }

    #[test]
    fn test_product_without_recipe_moves_nothing() {
        let products = ProductCatalog::from(vec![Product::new("P0", "Shelf", Decimal::ONE)]);
        let mut materials = materials();
        let order = order(vec![OrderItem::new("P0", "Shelf", Decimal::from(2), Decimal::ZERO)]);

        let outcome = ConsumptionCalculator::apply(
            &order,
            &products,
            &mut materials,
            MaterialMovement::Consume,
            MatchPolicy::Strict,
        )
        .unwrap();

        assert!(outcome.effects.is_empty());
        assert_eq!(materials, self::materials());
    }

    #[test]
    fn test_missing_product_is_skipped() {
        let mut materials = materials();
        let order = order(vec![OrderItem::new("GONE", "Escudo", Decimal::ONE, Decimal::ZERO)]);

        let outcome = ConsumptionCalculator::apply(
            &order,
            &products(),
            &mut materials,
            MaterialMovement::Consume,
            MatchPolicy::WarnAndSkip,
        )
        .unwrap();

        assert!(outcome.effects.is_empty());
        assert_eq!(outcome.warnings[0].reference, "GONE");
        assert_eq!(materials, self::materials());
    }
}
