//! # Tour Booking Demo
//!
//! Starts the [`BookingSystem`](tour_booking::lifecycle::BookingSystem) and walks
//! a few orders through their lifecycle:
//! 1. Seeds the catalog with one finished and one upcoming tour.
//! 2. Places orders and confirms payment for one of them.
//! 3. Runs a sweep, which archives the orders of the finished tour.
//! 4. Prints the revenue reports.

use chrono::{Duration, Utc};
use store_actor::tracing::setup_tracing;
use tour_booking::config::Config;
use tour_booking::engine::AuthContext;
use tour_booking::lifecycle::BookingSystem;
use tour_booking::model::{OrderCreate, OrderItem, OrderStatus, Price, TourCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::load();
    info!(?config, "Starting tour booking back office");
    let mut system = BookingSystem::start(config).await;
    let admin = AuthContext::admin("admin");

    let span = tracing::info_span!("catalog_seeding");
    async {
        let now = Utc::now();
        for (slug, name, price, end_date) in [
            ("hanoi-1", "Hanoi Old Quarter", 500_000, now - Duration::days(2)),
            ("halong-3", "Ha Long Bay Cruise", 2_750_000, now + Duration::days(30)),
        ] {
            system
                .tour_client
                .add_tour(TourCreate {
                    slug: slug.to_string(),
                    name: name.to_string(),
                    price: Price(price),
                    end_date,
                })
                .await
                .map_err(|e| e.to_string())?;
        }
        info!("Catalog seeded");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("order_processing");
    async {
        let hanoi = OrderItem::new("hanoi-1", "Hanoi Old Quarter", Price(500_000), "hanoi.jpg");
        let halong = OrderItem::new("halong-3", "Ha Long Bay Cruise", Price(2_750_000), "halong.jpg");

        let paid = system
            .order_client
            .place_order(
                OrderCreate::new("alice", vec![hanoi.clone()])
                    .with_status(OrderStatus::AwaitingConfirmation),
            )
            .await
            .map_err(|e| e.to_string())?;
        system
            .order_client
            .place_order(
                OrderCreate::new("bob", vec![hanoi])
                    .with_status(OrderStatus::AwaitingConfirmation),
            )
            .await
            .map_err(|e| e.to_string())?;
        system
            .order_client
            .place_order(
                OrderCreate::new("carol", vec![halong])
                    .with_status(OrderStatus::AwaitingConfirmation),
            )
            .await
            .map_err(|e| e.to_string())?;

        match system.lifecycle.confirm_payment(&admin, paid).await {
            Ok(order) => info!(order_id = %order.id, status = %order.status, "Payment confirmed"),
            Err(e) => error!(error = %e.user_message(), "Confirmation failed"),
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let now = system.lifecycle.now();
    match system.sweeper.sweep_once(now).await {
        Ok(report) => info!(
            archived = report.archived.len(),
            waiting = report.waiting,
            failures = report.failures.len(),
            "Sweep finished"
        ),
        Err(e) => error!(error = %e.user_message(), "Sweep failed"),
    }

    match system.lifecycle.revenue_reports(&admin).await {
        Ok(reports) => {
            for report in reports {
                info!(
                    period = %report.period,
                    revenue = %report.total_revenue,
                    orders = report.total_orders,
                    "Revenue report"
                );
            }
        }
        Err(e) => error!(error = %e.user_message(), "No revenue yet"),
    }

    system.spawn_sweeper();

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
