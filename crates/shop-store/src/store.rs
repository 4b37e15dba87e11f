//! 工作階段資料存放
//!
//! 所有異動都先由對帳引擎計算出下一份快照，成功後才整份替換；
//! 失敗時目前快照保持不變。

use rust_decimal::Decimal;
use shop_calc::{
    CostCalculator, CostEstimate, CostLine, DashboardCalculator, DashboardSummary,
    ReconcileWarning, RecipeResolver, Reconciler, ReplenishmentLine, StatusChange, StockEffect,
    TimeRange, Transition,
};
use shop_core::{
    AppSettings, EngineConfig, Material, Order, OrderStatus, Product, RecipeLine, SettingsPatch,
    ShopError, ShopSnapshot,
};

use crate::backup::{Backup, BackupFile};
use crate::clock::Clock;
use crate::seed;
use crate::session::{SessionProvider, SessionStatus};

/// 出廠重置的確認字
pub const RESET_KEYWORD: &str = "RESETAR";

/// 已套用異動的記錄
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedChange {
    pub effects: Vec<StockEffect>,
    pub status_changes: Vec<StatusChange>,
    pub warnings: Vec<ReconcileWarning>,
}

/// 工作階段資料存放
pub struct ShopStore {
    snapshot: ShopSnapshot,
    settings: AppSettings,
    reconciler: Reconciler,
    clock: Box<dyn Clock>,
    session: Box<dyn SessionProvider>,
}

impl ShopStore {
    /// 開啟工作階段：載入資料後立即執行一次逾期掃描
    pub fn open(
        snapshot: ShopSnapshot,
        settings: AppSettings,
        config: EngineConfig,
        clock: impl Clock + 'static,
        session: impl SessionProvider + 'static,
    ) -> Self {
        let mut store = Self {
            snapshot,
            settings,
            reconciler: Reconciler::new(config),
            clock: Box::new(clock),
            session: Box::new(session),
        };

        let applied = store.refresh_late_statuses();
        tracing::info!(
            "工作階段開啟：訂單 {} 筆，產品 {} 筆，原料 {} 筆，逾期推導變更 {} 筆",
            store.snapshot.orders.len(),
            store.snapshot.products.len(),
            store.snapshot.materials.len(),
            applied.status_changes.len()
        );
        store
    }

    /// 以示範資料開啟工作階段
    pub fn with_seed_data(
        config: EngineConfig,
        clock: impl Clock + 'static,
        session: impl SessionProvider + 'static,
    ) -> Self {
        let snapshot = seed::snapshot(clock.today());
        Self::open(snapshot, AppSettings::default(), config, clock, session)
    }

    pub fn snapshot(&self) -> &ShopSnapshot {
        &self.snapshot
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn config(&self) -> &EngineConfig {
        self.reconciler.config()
    }

    /// 今天的日期
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    fn commit(&mut self, transition: Transition) -> AppliedChange {
        self.snapshot = transition.next;
        AppliedChange {
            effects: transition.effects,
            status_changes: transition.status_changes,
            warnings: transition.warnings,
        }
    }

    // ---------------------------------------------------------------
    // 訂單
    // ---------------------------------------------------------------

    /// 建立訂單（ID 空白時自動產生）
    pub fn add_order(&mut self, mut order: Order) -> shop_core::Result<AppliedChange> {
        assign_id(&mut order.id);
        let transition = self
            .reconciler
            .create_order(&self.snapshot, order, self.clock.today())?;
        Ok(self.commit(transition))
    }

    /// 刪除訂單
    pub fn delete_order(&mut self, order_id: &str) -> shop_core::Result<AppliedChange> {
        let transition = self.reconciler.delete_order(&self.snapshot, order_id)?;
        Ok(self.commit(transition))
    }

    /// 變更訂單狀態
    pub fn update_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> shop_core::Result<AppliedChange> {
        let transition = self
            .reconciler
            .change_status(&self.snapshot, order_id, status)?;
        Ok(self.commit(transition))
    }

    /// 重新推導逾期狀態
    pub fn refresh_late_statuses(&mut self) -> AppliedChange {
        let transition = self
            .reconciler
            .refresh_late_statuses(&self.snapshot, self.clock.today());
        self.commit(transition)
    }

    // ---------------------------------------------------------------
    // 產品
    // ---------------------------------------------------------------

    /// 新增產品；配方在此時綁定原料ID
    pub fn add_product(&mut self, mut product: Product) -> shop_core::Result<Vec<ReconcileWarning>> {
        assign_id(&mut product.id);
        if self.snapshot.products.contains(&product.id) {
            return Err(ShopError::DuplicateId(product.id));
        }
        let (bound, warnings) = self.bind_recipe(&product)?;
        tracing::info!("新增產品 {} ({})", bound.id, bound.name);
        self.snapshot.products.upsert(bound);
        Ok(warnings)
    }

    /// 更新產品；配方在此時綁定原料ID
    pub fn update_product(&mut self, product: Product) -> shop_core::Result<Vec<ReconcileWarning>> {
        self.snapshot.products.get(&product.id)?;
        let (bound, warnings) = self.bind_recipe(&product)?;
        tracing::info!("更新產品 {} ({})", bound.id, bound.name);
        self.snapshot.products.upsert(bound);
        Ok(warnings)
    }

    /// 刪除產品（既有訂單的明細保留懸空參照）
    pub fn delete_product(&mut self, product_id: &str) -> shop_core::Result<Product> {
        let removed = self
            .snapshot
            .products
            .delete(product_id)
            .ok_or_else(|| ShopError::ProductNotFound(product_id.to_string()))?;
        tracing::info!("刪除產品 {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// 手動調整成品庫存（結果最小為 0）
    pub fn update_product_stock(&mut self, product_id: &str, delta: Decimal) -> shop_core::Result<Decimal> {
        let stock = self.snapshot.products.adjust_stock(product_id, delta)?;
        tracing::info!("產品 {} 庫存調整 {} → {}", product_id, delta, stock);
        Ok(stock)
    }

    /// 把目錄中所有名稱片段配方綁定為原料ID
    pub fn bind_all_recipes(&mut self) -> shop_core::Result<Vec<ReconcileWarning>> {
        let (catalog, warnings) = RecipeResolver::bind_catalog(
            &self.snapshot.products,
            &self.snapshot.materials,
            self.config().match_policy,
        )?;
        self.snapshot.products = catalog;
        Ok(warnings)
    }

    fn bind_recipe(&self, product: &Product) -> shop_core::Result<(Product, Vec<ReconcileWarning>)> {
        RecipeResolver::bind(product, &self.snapshot.materials, self.config().match_policy)
    }

    // ---------------------------------------------------------------
    // 原料
    // ---------------------------------------------------------------

    /// 新增原料
    pub fn add_material(&mut self, mut material: Material) -> shop_core::Result<()> {
        assign_id(&mut material.id);
        if self.snapshot.materials.contains(&material.id) {
            return Err(ShopError::DuplicateId(material.id));
        }
        tracing::info!("新增原料 {} ({})", material.id, material.name);
        self.snapshot.materials.upsert(material);
        Ok(())
    }

    /// 更新原料
    pub fn update_material(&mut self, material: Material) -> shop_core::Result<()> {
        self.snapshot.materials.get(&material.id)?;
        tracing::info!("更新原料 {} ({})", material.id, material.name);
        self.snapshot.materials.upsert(material);
        Ok(())
    }

    /// 刪除原料（綁定到此原料的配方項目之後會被略過或拒絕）
    pub fn delete_material(&mut self, material_id: &str) -> shop_core::Result<Material> {
        let removed = self
            .snapshot
            .materials
            .delete(material_id)
            .ok_or_else(|| ShopError::MaterialNotFound(material_id.to_string()))?;
        tracing::info!("刪除原料 {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// 庫存偏低或危急原料的補貨清單
    pub fn low_stock_report(&self) -> Vec<ReplenishmentLine> {
        DashboardCalculator::replenishment(&self.snapshot.materials)
    }

    // ---------------------------------------------------------------
    // 設定、儀表板、試算
    // ---------------------------------------------------------------

    /// 部分更新設定
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.apply(patch);
        tracing::debug!("設定已更新: {:?}", self.settings);
    }

    /// 儀表板摘要
    pub fn dashboard(&self, range: TimeRange) -> DashboardSummary {
        DashboardCalculator::summarize(&self.snapshot, range, self.clock.today())
    }

    /// 成本試算（不影響任何資料）
    pub fn estimate_cost(
        &self,
        recipe: &[RecipeLine],
        extras: &[CostLine],
        margin_percent: Decimal,
    ) -> CostEstimate {
        CostCalculator::estimate(recipe, &self.snapshot.materials, extras, margin_percent)
    }

    // ---------------------------------------------------------------
    // 備份與重置
    // ---------------------------------------------------------------

    /// 匯入備份；驗證失敗時不做任何變更
    pub fn import_data(&mut self, json: &str) -> shop_core::Result<AppliedChange> {
        let backup = Backup::parse(json).map_err(|e| {
            tracing::error!("匯入失敗: {}", e);
            e
        })?;

        let (snapshot, settings) = backup.into_parts();
        tracing::info!(
            "匯入備份：訂單 {} 筆，產品 {} 筆，原料 {} 筆",
            snapshot.orders.len(),
            snapshot.products.len(),
            snapshot.materials.len()
        );
        self.snapshot = snapshot;
        self.settings = settings;

        Ok(self.refresh_late_statuses())
    }

    /// 匯出備份
    pub fn export_data(&self) -> shop_core::Result<BackupFile> {
        let backup = Backup::from_state(&self.snapshot, &self.settings);
        BackupFile::new(&backup, self.clock.today())
    }

    /// 出廠重置：還原示範資料與預設設定
    pub fn reset(&mut self, confirmation: &str) -> shop_core::Result<()> {
        if confirmation != RESET_KEYWORD {
            return Err(ShopError::ResetNotConfirmed {
                expected: RESET_KEYWORD,
            });
        }

        tracing::warn!("執行出廠重置");
        self.snapshot = seed::snapshot(self.clock.today());
        self.settings = AppSettings::default();
        self.refresh_late_statuses();
        Ok(())
    }

    // ---------------------------------------------------------------
    // 工作階段
    // ---------------------------------------------------------------

    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn logout(&mut self) {
        self.session.sign_out();
    }
}

fn assign_id(id: &mut String) {
    if id.trim().is_empty() {
        *id = shop_core::new_record_id();
    }
}
