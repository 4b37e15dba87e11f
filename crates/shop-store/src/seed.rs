//! 示範資料（出廠重置時還原）

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use shop_core::{
    Material, MaterialLedger, Order, OrderItem, OrderLedger, OrderOrigin, OrderStatus, Product,
    ProductCatalog, RecipeLine, ShopSnapshot,
};

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// 示範原料
pub fn materials() -> MaterialLedger {
    let material = |id: &str, name: &str, unit: &str, cost: Decimal, stock: i64, min: i64| {
        Material::new(id, name, Decimal::from(stock))
            .with_unit(unit)
            .with_cost_per_unit(cost)
            .with_min_stock(Decimal::from(min))
    };

    MaterialLedger::from(vec![
        material("1", "Chapa de MDF 18mm", "m²", money(8500), 150, 20),
        material("2", "Parafuso Phillips 3.5x40", "un", money(15), 12, 50),
        material("3", "Dobradiça Reta 35mm", "un", money(350), 48, 20),
        material("4", "Cola Branca PVA Extra", "L", money(2500), 8, 5),
        material("5", "Tinta Acrílica Branca", "L", money(9500), 22, 10),
        material("6", "Verniz Premium", "L", money(4500), 8, 10),
        material("7", "Lixa Grão 120", "un", money(200), 200, 50),
        material("8", "Madeira Carvalho", "m²", money(12000), 50, 10),
        material("9", "Pinus", "m²", money(4000), 100, 20),
    ])
}

/// 示範產品
pub fn products() -> ProductCatalog {
    let line = |text: &str| RecipeLine::parse_lenient(text);

    ProductCatalog::from(vec![
        Product::new("1", "Mesa de Jantar Rústica", Decimal::from(12))
            .with_sku("MDR-001")
            .with_recipe(vec![line("Madeira Carvalho: 2"), line("Parafusos: 30")])
            .with_cost(money(45075)),
        Product::new("2", "Cadeira de Escritório", Decimal::from(25))
            .with_sku("CDR-002")
            .with_recipe(vec![line("Pinus: 1.5"), line("Rodízios: 4")])
            .with_cost(money(21050)),
        Product::new("3", "Estante Modular", Decimal::from(8))
            .with_sku("EST-003")
            .with_recipe(vec![line("Chapa de MDF 18mm: 5"), line("Suportes: 16")])
            .with_cost(money(32000))
            .with_image("https://picsum.photos/400/400?random=3"),
        Product::new("4", "Bancada de Cozinha", Decimal::from(5))
            .with_sku("BNC-004")
            .with_recipe(vec![line("Granito: 3"), line("Cola Epóxi: 1")])
            .with_cost(money(85000))
            .with_image("https://picsum.photos/400/400?random=4"),
    ])
}

/// 示範訂單（日期相對於今天）
pub fn orders(today: NaiveDate) -> OrderLedger {
    let days_ago = |days: i64| today - Duration::days(days);
    let days_ahead = |days: i64| today + Duration::days(days);
    let item = |product_id: &str, name: &str, quantity: i64, unit_price: Decimal| {
        OrderItem::new(product_id, name, Decimal::from(quantity), unit_price)
    };

    OrderLedger::from(vec![
        Order::new(
            "#1275",
            "Ana Souza",
            vec![item("4", "Armário de Cozinha", 1, money(250000))],
            days_ago(20),
        )
        .with_created_at(days_ago(30))
        .with_status(OrderStatus::Atrasado)
        .with_shipping_cost(money(15000)),
        Order::new(
            "#1024",
            "Lancelot",
            vec![item("1", "Banco Távola", 4, money(45000))],
            days_ahead(60),
        )
        .with_created_at(today)
        .with_origin(OrderOrigin::Online),
        Order::new(
            "#1023",
            "Guinevere",
            vec![item("2", "Penteadeira Lago", 1, money(220000))],
            days_ago(2),
        )
        .with_created_at(days_ago(7))
        .with_status(OrderStatus::Concluido)
        .with_shipping_cost(money(10000)),
        Order::new(
            "#1022",
            "Merlin",
            vec![item("3", "Estante Magia", 1, money(350000))],
            days_ago(15),
        )
        .with_created_at(days_ago(30))
        .with_status(OrderStatus::Atrasado)
        .with_origin(OrderOrigin::Online)
        .with_shipping_cost(money(5000)),
        Order::new(
            "#1020",
            "Gawain",
            vec![item("5", "Escudo Decorativo", 2, money(45000))],
            days_ahead(45),
        )
        .with_created_at(days_ago(1))
        .with_origin(OrderOrigin::Online)
        .with_shipping_cost(money(3000)),
    ])
}

/// 完整示範快照
pub fn snapshot(today: NaiveDate) -> ShopSnapshot {
    ShopSnapshot::new(orders(today), products(), materials())
}
