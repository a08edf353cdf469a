#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use tour_booking::config::Config;
use tour_booking::engine::FixedClock;
use tour_booking::lifecycle::BookingSystem;
use tour_booking::model::{OrderCreate, OrderId, OrderItem, OrderStatus, Price, TourCreate, TourId};

/// Mid-month noon UTC, so the local calendar month is June 2024 everywhere.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn system_at(now: DateTime<Utc>) -> (BookingSystem, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(now));
    let system = BookingSystem::with_clock(Config::default(), clock.clone());
    (system, clock)
}

pub async fn add_tour(system: &BookingSystem, slug: &str, end_date: DateTime<Utc>) -> TourId {
    system
        .tour_client
        .add_tour(TourCreate {
            slug: slug.to_string(),
            name: format!("Tour {slug}"),
            price: Price(500_000),
            end_date,
        })
        .await
        .expect("Failed to add tour")
}

pub async fn ended_tour(system: &BookingSystem, slug: &str) -> TourId {
    add_tour(system, slug, fixed_now() - Duration::days(1)).await
}

pub async fn upcoming_tour(system: &BookingSystem, slug: &str) -> TourId {
    add_tour(system, slug, fixed_now() + Duration::days(10)).await
}

pub async fn place(
    system: &BookingSystem,
    user_id: &str,
    slug: &str,
    prices: &[u64],
    status: OrderStatus,
) -> OrderId {
    place_at(system, user_id, slug, prices, status, fixed_now() - Duration::hours(1)).await
}

pub async fn place_at(
    system: &BookingSystem,
    user_id: &str,
    slug: &str,
    prices: &[u64],
    status: OrderStatus,
    created_at: DateTime<Utc>,
) -> OrderId {
    let items = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            OrderItem::new(slug, format!("{slug} #{i}"), Price(*price), format!("{slug}.jpg"))
        })
        .collect();
    system
        .order_client
        .place_order(
            OrderCreate::new(user_id, items)
                .with_status(status)
                .placed_at(created_at),
        )
        .await
        .expect("Failed to place order")
}
