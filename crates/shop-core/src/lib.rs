//! # Shop Core
//!
//! 核心資料模型、帳本與類型定義

pub mod catalog;
pub mod config;
pub mod material;
pub mod material_ledger;
pub mod order;
pub mod order_ledger;
pub mod product;
pub mod recipe;
pub mod settings;
pub mod snapshot;

// Re-export 主要類型
pub use catalog::ProductCatalog;
pub use config::{EngineConfig, MatchPolicy};
pub use material::{Material, StockLevel};
pub use material_ledger::MaterialLedger;
pub use order::{Order, OrderItem, OrderOrigin, OrderStatus};
pub use order_ledger::OrderLedger;
pub use product::Product;
pub use recipe::{MaterialRef, RecipeLine};
pub use settings::{AppSettings, SettingsPatch};
pub use snapshot::ShopSnapshot;

/// 產生新記錄用的唯一識別碼
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 業務錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("找不到訂單: {0}")]
    OrderNotFound(String),

    #[error("找不到產品: {0}")]
    ProductNotFound(String),

    #[error("找不到原料: {0}")]
    MaterialNotFound(String),

    #[error("產品 {product_id} 的配方項目無法對應原料: {reference}")]
    UnresolvedMaterial { product_id: String, reference: String },

    #[error("識別碼重複: {0}")]
    DuplicateId(String),

    #[error("無效的訂單: {0}")]
    InvalidOrder(String),

    #[error("無效的配方項目: {0}")]
    InvalidRecipeLine(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("備份資料格式錯誤: {0}")]
    MalformedImport(String),

    #[error("備份匯出失敗: {0}")]
    Export(String),

    #[error("數值溢位: {0}")]
    Overflow(String),

    #[error("重置未確認：確認字必須為 {expected}")]
    ResetNotConfirmed { expected: &'static str },

    #[error("I/O 錯誤: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShopError>;
