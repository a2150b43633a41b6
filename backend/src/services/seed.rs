//! Reference data loader for demos and fresh installs
//!
//! Replaces all operational records (accounts are kept) in one transaction.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{types::Json, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    Coordinates, DeliveryStatus, MetricCategory, MetricTrend, MonthlyValue, Priority,
    SupplierContact, SupplierPerformance, SupplierTrend,
};

struct SeedItem {
    product: &'static str,
    store: &'static str,
    current: i32,
    optimal: i32,
    predicted: i32,
    trend: f64,
    category: &'static str,
    sku: &'static str,
}

const INVENTORY: [SeedItem; 5] = [
    SeedItem {
        product: "Parachute Coconut Oil",
        store: "Jalgaon Central",
        current: 45,
        optimal: 100,
        predicted: 15,
        trend: -12.0,
        category: "Personal Care",
        sku: "PCO-500ML",
    },
    SeedItem {
        product: "Maggi Noodles 2-Min",
        store: "Nashik Mall",
        current: 234,
        optimal: 200,
        predicted: 180,
        trend: 8.0,
        category: "Food",
        sku: "MAG-2MIN",
    },
    SeedItem {
        product: "Tata Salt",
        store: "Aurangabad Plaza",
        current: 89,
        optimal: 150,
        predicted: 120,
        trend: -5.0,
        category: "Grocery",
        sku: "TTS-1KG",
    },
    SeedItem {
        product: "Surf Excel",
        store: "Kolhapur Store",
        current: 23,
        optimal: 80,
        predicted: 8,
        trend: -18.0,
        category: "Household",
        sku: "SFX-1KG",
    },
    SeedItem {
        product: "Britannia Biscuits",
        store: "Solapur Branch",
        current: 156,
        optimal: 120,
        predicted: 200,
        trend: 15.0,
        category: "Food",
        sku: "BRT-100G",
    },
];

struct SeedDelivery {
    truck: &'static str,
    driver: &'static str,
    route: &'static str,
    progress: i32,
    eta: &'static str,
    delay: i32,
    items: i32,
    status: DeliveryStatus,
    start: &'static str,
    end: &'static str,
    coordinates: Coordinates,
}

const DELIVERIES: [SeedDelivery; 4] = [
    SeedDelivery {
        truck: "MH-12-AB-1234",
        driver: "Rajesh Kumar",
        route: "Mumbai → Jalgaon",
        progress: 75,
        eta: "2h 15m",
        delay: 0,
        items: 45,
        status: DeliveryStatus::InTransit,
        start: "Mumbai",
        end: "Jalgaon",
        coordinates: Coordinates { lat: 20.0504, lng: 75.5648 },
    },
    SeedDelivery {
        truck: "MH-14-CD-5678",
        driver: "Priya Sharma",
        route: "Pune → Nashik",
        progress: 45,
        eta: "3h 45m",
        delay: 30,
        items: 67,
        status: DeliveryStatus::InTransit,
        start: "Pune",
        end: "Nashik",
        coordinates: Coordinates { lat: 19.9975, lng: 73.7898 },
    },
    SeedDelivery {
        truck: "MH-16-EF-9012",
        driver: "Amit Patel",
        route: "Nagpur → Aurangabad",
        progress: 90,
        eta: "45m",
        delay: -15,
        items: 32,
        status: DeliveryStatus::InTransit,
        start: "Nagpur",
        end: "Aurangabad",
        coordinates: Coordinates { lat: 19.8762, lng: 75.3433 },
    },
    SeedDelivery {
        truck: "MH-18-GH-3456",
        driver: "Sunita Yadav",
        route: "Mumbai → Kolhapur",
        progress: 25,
        eta: "5h 30m",
        delay: 45,
        items: 78,
        status: DeliveryStatus::Delayed,
        start: "Mumbai",
        end: "Kolhapur",
        coordinates: Coordinates { lat: 16.7050, lng: 74.2433 },
    },
];

struct SeedSupplier {
    name: &'static str,
    category: &'static str,
    scores: [f64; 5],
    total_orders: i32,
    rating: f64,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
    trend: SupplierTrend,
}

// scores: on-time, avg delay, quality, cost efficiency, sustainability
const SUPPLIERS: [SeedSupplier; 3] = [
    SeedSupplier {
        name: "Hindustan Unilever Ltd",
        category: "FMCG",
        scores: [94.2, 2.3, 96.8, 89.5, 92.1],
        total_orders: 1247,
        rating: 4.8,
        email: "orders@hul.com",
        phone: "+91-22-6678-1234",
        address: "Mumbai, Maharashtra",
        trend: SupplierTrend::Up,
    },
    SeedSupplier {
        name: "Nestle India Ltd",
        category: "Food & Beverages",
        scores: [91.7, 3.1, 95.2, 87.3, 88.9],
        total_orders: 892,
        rating: 4.6,
        email: "supply@nestle.in",
        phone: "+91-124-3985-000",
        address: "Gurgaon, Haryana",
        trend: SupplierTrend::Stable,
    },
    SeedSupplier {
        name: "Tata Consumer Products",
        category: "FMCG",
        scores: [88.9, 4.2, 93.7, 91.2, 95.4],
        total_orders: 634,
        rating: 4.4,
        email: "procurement@tatacp.com",
        phone: "+91-22-6665-8282",
        address: "Mumbai, Maharashtra",
        trend: SupplierTrend::Down,
    },
];

struct SeedReorder {
    sku: &'static str,
    product: &'static str,
    store: &'static str,
    current_stock: i32,
    daily_consumption: f64,
    recommended_order: i32,
    priority: Priority,
    supplier: &'static str,
    estimated_cost: i64,
    lead_time: i32,
    category: &'static str,
    reason: &'static str,
}

const REORDERS: [SeedReorder; 2] = [
    SeedReorder {
        sku: "PCO-500ML",
        product: "Parachute Coconut Oil 500ml",
        store: "Jalgaon Central",
        current_stock: 23,
        daily_consumption: 8.5,
        recommended_order: 150,
        priority: Priority::Urgent,
        supplier: "Hindustan Unilever Ltd",
        estimated_cost: 12750,
        lead_time: 3,
        category: "Personal Care",
        reason: "Stock critically low, high demand expected",
    },
    SeedReorder {
        sku: "SFX-1KG",
        product: "Surf Excel 1kg",
        store: "Kolhapur Store",
        current_stock: 12,
        daily_consumption: 6.2,
        recommended_order: 100,
        priority: Priority::Urgent,
        supplier: "Hindustan Unilever Ltd",
        estimated_cost: 8500,
        lead_time: 2,
        category: "Household",
        reason: "Emergency restock needed",
    },
];

struct SeedMetric {
    metric: &'static str,
    value: f64,
    unit: &'static str,
    target: f64,
    category: MetricCategory,
    trend: MetricTrend,
    description: &'static str,
    monthly: [(&'static str, f64); 3],
}

const METRICS: [SeedMetric; 3] = [
    SeedMetric {
        metric: "Carbon Footprint",
        value: 2847.0,
        unit: "tons CO2",
        target: 2500.0,
        category: MetricCategory::Carbon,
        trend: MetricTrend::Declining,
        description: "Total carbon emissions from supply chain operations",
        monthly: [("Jan", 2950.0), ("Feb", 2890.0), ("Mar", 2847.0)],
    },
    SeedMetric {
        metric: "Waste Reduction",
        value: 78.5,
        unit: "% recycled",
        target: 85.0,
        category: MetricCategory::Waste,
        trend: MetricTrend::Improving,
        description: "Percentage of waste materials recycled",
        monthly: [("Jan", 75.2), ("Feb", 76.8), ("Mar", 78.5)],
    },
    SeedMetric {
        metric: "Energy Efficiency",
        value: 92.3,
        unit: "% renewable",
        target: 95.0,
        category: MetricCategory::Energy,
        trend: MetricTrend::Improving,
        description: "Percentage of renewable energy usage",
        monthly: [("Jan", 89.1), ("Feb", 90.7), ("Mar", 92.3)],
    },
];

/// Number of records written per table
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub inventory_items: usize,
    pub deliveries: usize,
    pub suppliers: usize,
    pub reorder_recommendations: usize,
    pub sustainability_metrics: usize,
}

#[derive(Clone)]
pub struct SeedService {
    db: PgPool,
}

impl SeedService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn seed(&self) -> AppResult<SeedSummary> {
        let mut tx = self.db.begin().await?;

        for table in [
            "reorder_recommendations",
            "inventory_items",
            "deliveries",
            "suppliers",
            "sustainability_metrics",
        ] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        tracing::info!("Cleared operational data");

        insert_inventory(&mut tx).await?;
        insert_deliveries(&mut tx).await?;
        insert_suppliers(&mut tx).await?;
        insert_reorders(&mut tx).await?;
        insert_metrics(&mut tx).await?;

        tx.commit().await?;

        let summary = SeedSummary {
            inventory_items: INVENTORY.len(),
            deliveries: DELIVERIES.len(),
            suppliers: SUPPLIERS.len(),
            reorder_recommendations: REORDERS.len(),
            sustainability_metrics: METRICS.len(),
        };
        tracing::info!(?summary, "Reference data seeded");
        Ok(summary)
    }
}

async fn insert_inventory(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
    for item in &INVENTORY {
        sqlx::query(
            r#"
            INSERT INTO inventory_items (id, product, store, current, optimal, predicted,
                                         trend, category, sku, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(item.product)
        .bind(item.store)
        .bind(item.current)
        .bind(item.optimal)
        .bind(item.predicted)
        .bind(item.trend)
        .bind(item.category)
        .bind(item.sku)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_deliveries(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
    for delivery in &DELIVERIES {
        sqlx::query(
            r#"
            INSERT INTO deliveries (id, truck, driver, route, progress, eta, delay, items,
                                    status, start_location, end_location, lat, lng)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(delivery.truck)
        .bind(delivery.driver)
        .bind(delivery.route)
        .bind(delivery.progress)
        .bind(delivery.eta)
        .bind(delivery.delay)
        .bind(delivery.items)
        .bind(delivery.status.as_str())
        .bind(delivery.start)
        .bind(delivery.end)
        .bind(delivery.coordinates.lat)
        .bind(delivery.coordinates.lng)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_suppliers(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
    for supplier in &SUPPLIERS {
        let [on_time, avg_delay, quality, cost, sustainability] = supplier.scores;
        let contact = SupplierContact {
            email: Some(supplier.email.to_string()),
            phone: Some(supplier.phone.to_string()),
            address: Some(supplier.address.to_string()),
        };
        let performance = SupplierPerformance {
            last_month: Some(on_time),
            trend: supplier.trend,
        };

        sqlx::query(
            r#"
            INSERT INTO suppliers (id, name, category, on_time_delivery, avg_delay, quality_score,
                                   cost_efficiency, sustainability_score, total_orders, rating,
                                   contact, performance)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(supplier.name)
        .bind(supplier.category)
        .bind(on_time)
        .bind(avg_delay)
        .bind(quality)
        .bind(cost)
        .bind(sustainability)
        .bind(supplier.total_orders)
        .bind(supplier.rating)
        .bind(Json(contact))
        .bind(Json(performance))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_reorders(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
    for rec in &REORDERS {
        let days_left = shared::compute_days_left(rec.current_stock.into(), rec.daily_consumption)?;

        sqlx::query(
            r#"
            INSERT INTO reorder_recommendations (
                id, sku, product, store, current_stock, daily_consumption, days_left,
                recommended_order, priority, supplier, estimated_cost, lead_time,
                category, reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rec.sku)
        .bind(rec.product)
        .bind(rec.store)
        .bind(rec.current_stock)
        .bind(rec.daily_consumption)
        .bind(days_left)
        .bind(rec.recommended_order)
        .bind(rec.priority.as_str())
        .bind(rec.supplier)
        .bind(Decimal::from(rec.estimated_cost))
        .bind(rec.lead_time)
        .bind(rec.category)
        .bind(rec.reason)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_metrics(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
    for metric in &METRICS {
        let monthly: Vec<MonthlyValue> = metric
            .monthly
            .iter()
            .map(|(month, value)| MonthlyValue {
                month: month.to_string(),
                value: *value,
            })
            .collect();

        sqlx::query(
            r#"
            INSERT INTO sustainability_metrics (id, metric, value, unit, target, category,
                                                trend, description, monthly_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(metric.metric)
        .bind(metric.value)
        .bind(metric.unit)
        .bind(metric.target)
        .bind(metric.category.as_str())
        .bind(metric.trend.as_str())
        .bind(metric.description)
        .bind(Json(monthly))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
