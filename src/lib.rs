//! # Shop
//!
//! 家具工坊訂單與庫存對帳：
//! - [`shop_core`]：訂單、產品、原料、設定等資料模型
//! - [`shop_calc`]：保留/釋放、消耗/歸還、逾期推導與儀表板計算
//! - [`shop_store`]：工作階段資料存放、備份匯入/匯出

pub mod logging;

pub use shop_calc::{DashboardSummary, Reconciler, StockEffect, TimeRange, Transition};
pub use shop_core::{
    EngineConfig, MatchPolicy, Material, Order, OrderItem, OrderStatus, Product, RecipeLine,
    ShopError, ShopSnapshot,
};
pub use shop_store::{ShopStore, SystemClock};
