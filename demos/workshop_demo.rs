//! 工坊訂單對帳示例

use rust_decimal::Decimal;
use shop::{EngineConfig, Order, OrderItem, OrderStatus, ShopStore, SystemClock, TimeRange};
use shop_calc::CostLine;
use shop_store::InMemorySession;

fn main() -> anyhow::Result<()> {
    shop::logging::init();

    println!("=== 工坊訂單對帳示例 ===\n");

    let config = EngineConfig::from_env()?;
    let mut store = ShopStore::with_seed_data(config, SystemClock, InMemorySession::signed_in("oficina"));
    let today = store.today();

    println!("原料庫存:");
    for material in store.snapshot().materials.iter() {
        println!(
            "  - {} ({}): {} {} [{:?}]",
            material.name,
            material.id,
            material.stock,
            material.unit,
            material.stock_level()
        );
    }

    // 建立訂單：保留成品
    let order = Order::new(
        "#2001",
        "Percival",
        vec![OrderItem::new("2", "Cadeira de Escritório", Decimal::from(6), Decimal::from(480))],
        today + chrono::Duration::days(14),
    );
    let applied = store.add_order(order)?;
    println!("\n建立訂單 #2001:");
    for effect in &applied.effects {
        println!("  - {:?} {:?}: {} → 庫存 {}", effect.kind, effect.target, effect.delta, effect.stock_after);
    }

    // 完成訂單：消耗原料
    let applied = store.update_order_status("#2001", OrderStatus::Concluido)?;
    println!("\n完成訂單 #2001:");
    for effect in &applied.effects {
        println!("  - {:?} {:?}: {} → 庫存 {}", effect.kind, effect.target, effect.delta, effect.stock_after);
    }
    for warning in &applied.warnings {
        println!("  ! {}: {}", warning.reference, warning.message);
    }

    // 成本試算
    let product = store.snapshot().products.get("2")?.clone();
    let estimate = store.estimate_cost(
        &product.materials,
        &[CostLine::new("Mão de obra", Decimal::from(120))],
        Decimal::from(35),
    );
    println!(
        "\n成本試算 {}: 單位成本 {}，建議售價 {}",
        product.name, estimate.unit_cost, estimate.suggested_price
    );

    let summary = store.dashboard(TimeRange::Last30Days);
    println!("\n儀表板（{:?}）:", summary.range);
    println!("  訂單數: {}", summary.order_count);
    println!("  已實現收入: {}", summary.realized_revenue);
    println!("  預計收入: {}", summary.forecast_revenue);
    println!("  庫存偏低/危急原料: {}/{}", summary.low_stock_materials, summary.critical_materials);
    println!("  庫存總值: {}", summary.inventory_value);

    println!("\n補貨清單:");
    for line in store.low_stock_report() {
        println!(
            "  - {} [{:?}]: 缺 {} {}，約 {}",
            line.material_name, line.level, line.shortfall, line.unit, line.estimated_cost
        );
    }

    let backup = store.export_data()?;
    println!("\n備份檔: {}（{} 位元組）", backup.file_name, backup.contents.len());

    Ok(())
}
