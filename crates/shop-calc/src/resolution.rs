//! 配方項目 → 原料解析

use shop_core::{
    MatchPolicy, Material, MaterialLedger, MaterialRef, Product, ProductCatalog, RecipeLine,
    ShopError,
};

use crate::ReconcileWarning;

/// 配方解析器
pub struct RecipeResolver;

impl RecipeResolver {
    /// 解析單一配方項目
    ///
    /// - `Id`：精確查找
    /// - `Fragment`：依帳本順序，第一個名稱包含該片段（不分大小寫）的原料
    pub fn resolve<'a>(line: &RecipeLine, materials: &'a MaterialLedger) -> Option<&'a Material> {
        match &line.material {
            MaterialRef::Id(id) => materials.get(id).ok(),
            MaterialRef::Fragment(fragment) => materials.find_by_fragment(fragment),
        }
    }

    /// 編寫配方時即把名稱片段綁定為原料ID
    ///
    /// 無法解析的項目：寬鬆模式保留原樣並回傳警告，嚴格模式直接失敗。
    pub fn bind(
        product: &Product,
        materials: &MaterialLedger,
        policy: MatchPolicy,
    ) -> shop_core::Result<(Product, Vec<ReconcileWarning>)> {
        let mut bound = product.clone();
        let mut warnings = Vec::new();

        for line in bound.materials.iter_mut() {
            if line.is_bound() {
                continue;
            }

            match Self::resolve(line, materials) {
                Some(material) => {
                    tracing::debug!(
                        "綁定配方: 產品 {} 的 {} → 原料 {} ({})",
                        product.id,
                        line.material,
                        material.id,
                        material.name
                    );
                    *line = RecipeLine::bound(material.id.clone(), line.quantity_per_unit);
                }
                None => {
                    if policy == MatchPolicy::Strict {
                        return Err(ShopError::UnresolvedMaterial {
                            product_id: product.id.clone(),
                            reference: line.material.to_string(),
                        });
                    }
                    tracing::warn!("產品 {} 的配方項目 {} 找不到原料，保留未綁定", product.id, line.material);
                    warnings.push(ReconcileWarning::warning(
                        None,
                        line.material.to_string(),
                        format!("產品 {} 的配方項目找不到原料", product.id),
                    ));
                }
            }
        }

        Ok((bound, warnings))
    }

    /// 綁定整個目錄的配方
    pub fn bind_catalog(
        catalog: &ProductCatalog,
        materials: &MaterialLedger,
        policy: MatchPolicy,
    ) -> shop_core::Result<(ProductCatalog, Vec<ReconcileWarning>)> {
        let mut bound_catalog = catalog.clone();
        let mut warnings = Vec::new();

        for product in bound_catalog.iter_mut() {
            let (bound, product_warnings) = Self::bind(product, materials, policy)?;
            *product = bound;
            warnings.extend(product_warnings);
        }

        tracing::info!(
            "配方綁定完成：產品 {} 筆，未綁定項目 {} 筆",
            bound_catalog.len(),
            warnings.len()
        );

        Ok((bound_catalog, warnings))
    }
}
