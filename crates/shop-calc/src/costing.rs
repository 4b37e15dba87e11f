//! 成本試算（沙盒）
//!
//! 以目前的原料單價試算配方成本，結果不寫回任何資料。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shop_core::{MaterialLedger, Product, RecipeLine};

use crate::resolution::RecipeResolver;

/// 額外成本項目（人工、運輸、耗材等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub label: String,
    pub amount: Decimal,
}

impl CostLine {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// 單一原料的成本明細
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCost {
    pub material_id: String,
    pub material_name: String,
    pub quantity: Decimal,
    pub cost_per_unit: Decimal,
    pub subtotal: Decimal,
}

/// 試算結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub materials: Vec<MaterialCost>,
    /// 找不到原料的配方項目
    pub unresolved: Vec<String>,
    pub materials_total: Decimal,
    pub extras_total: Decimal,
    /// 單位成本（原料 + 額外成本）
    pub unit_cost: Decimal,
    pub margin_percent: Decimal,
    /// 建議售價 = 單位成本 × (1 + 利潤率)
    pub suggested_price: Decimal,
}

/// 成本計算器
pub struct CostCalculator;

impl CostCalculator {
    /// 試算配方成本
    pub fn estimate(
        recipe: &[RecipeLine],
        materials: &MaterialLedger,
        extras: &[CostLine],
        margin_percent: Decimal,
    ) -> CostEstimate {
        let mut material_costs = Vec::new();
        let mut unresolved = Vec::new();

        for line in recipe {
            match RecipeResolver::resolve(line, materials) {
                Some(material) => material_costs.push(MaterialCost {
                    material_id: material.id.clone(),
                    material_name: material.name.clone(),
                    quantity: line.quantity_per_unit,
                    cost_per_unit: material.cost_per_unit,
                    subtotal: line.quantity_per_unit.saturating_mul(material.cost_per_unit),
                }),
                None => unresolved.push(line.to_string()),
            }
        }

        let materials_total = material_costs
            .iter()
            .fold(Decimal::ZERO, |acc, m| acc.saturating_add(m.subtotal));
        let extras_total = extras
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount));
        let unit_cost = materials_total.saturating_add(extras_total);
        let markup = Decimal::ONE.saturating_add(margin_percent / Decimal::ONE_HUNDRED);
        let suggested_price = unit_cost.saturating_mul(markup).round_dp(2);

        CostEstimate {
            materials: material_costs,
            unresolved,
            materials_total,
            extras_total,
            unit_cost,
            margin_percent,
            suggested_price,
        }
    }

    /// 試算既有產品的原料成本
    pub fn product_material_cost(product: &Product, materials: &MaterialLedger) -> Decimal {
        Self::estimate(&product.materials, materials, &[], Decimal::ZERO).materials_total
    }
}
