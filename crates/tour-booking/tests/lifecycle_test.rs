mod common;

use chrono::Duration;
use common::*;
use std::sync::Arc;
use store_actor::mock::MockCollection;
use store_actor::{CollectionHandle, StoreError};
use tour_booking::clients::{HistoryClient, RevenueClient};
use tour_booking::engine::{ArchiveOutcome, AuthContext, FixedClock, LifecycleError, OrderLifecycle, Principal};
use tour_booking::model::{
    HistoryFilter, HistoryRecord, OrderFilter, OrderId, OrderStatus, Price, RevenuePeriod,
    RevenueReport,
};

fn admin() -> AuthContext {
    AuthContext::admin("ops")
}

fn june() -> RevenuePeriod {
    RevenuePeriod::from_local(fixed_now())
}

#[tokio::test]
async fn test_confirm_payment_requires_awaiting_confirmation() {
    let (system, _clock) = system_at(fixed_now());
    upcoming_tour(&system, "hanoi-1").await;

    for status in [OrderStatus::PendingPayment, OrderStatus::Completed] {
        let id = place(&system, "u1", "hanoi-1", &[100], status).await;
        let before = system.order_client.find_by_id(id).await.unwrap().unwrap();

        let result = system.lifecycle.confirm_payment(&admin(), id).await;
        assert_eq!(
            result,
            Err(LifecycleError::InvalidState {
                order_id: id,
                expected: OrderStatus::AwaitingConfirmation,
                actual: status,
            })
        );
        let after = system.order_client.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(before, after);
    }

    let id = place(&system, "u1", "hanoi-1", &[100], OrderStatus::AwaitingConfirmation).await;
    let confirmed = system.lifecycle.confirm_payment(&admin(), id).await.unwrap();
    assert_eq!(confirmed.status, OrderStatus::Completed);
    let stored = system.order_client.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Completed);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_confirm_payment_reports_missing_order_and_tour() {
    let (system, _clock) = system_at(fixed_now());
    let tour_id = upcoming_tour(&system, "hanoi-1").await;
    let id = place(&system, "u1", "hanoi-1", &[100], OrderStatus::AwaitingConfirmation).await;

    assert!(matches!(
        system.lifecycle.confirm_payment(&admin(), OrderId(99)).await,
        Err(LifecycleError::NotFound(_))
    ));

    system.tour_client.delete_by_id(tour_id).await.unwrap();
    assert!(matches!(
        system.lifecycle.confirm_payment(&admin(), id).await,
        Err(LifecycleError::NotFound(what)) if what.contains("hanoi-1")
    ));
    let stored = system.order_client.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::AwaitingConfirmation);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_archive_before_tour_ends_writes_nothing() {
    let (system, _clock) = system_at(fixed_now());
    upcoming_tour(&system, "halong-3").await;
    let id = place(&system, "u1", "halong-3", &[2_750_000], OrderStatus::Completed).await;

    let outcome = system.lifecycle.archive_if_tour_ended(id).await.unwrap();
    assert_eq!(
        outcome,
        ArchiveOutcome::NotYetEnded {
            end_date: fixed_now() + Duration::days(10)
        }
    );

    assert!(system.order_client.find_by_id(id).await.unwrap().is_some());
    assert!(system.history_client.find(HistoryFilter::All).await.unwrap().is_empty());
    assert!(system.revenue_client.all().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_archive_end_to_end() {
    let (system, _clock) = system_at(fixed_now());
    let end_date = fixed_now() - Duration::days(1);
    add_tour(&system, "hanoi-1", end_date).await;
    let id = place(&system, "u1", "hanoi-1", &[500_000], OrderStatus::AwaitingConfirmation).await;

    let record = match system.lifecycle.archive_if_tour_ended(id).await.unwrap() {
        ArchiveOutcome::Archived(record) => record,
        other => panic!("Expected the order to be archived, got {other:?}"),
    };
    assert_eq!(record.order_id, id);
    assert_eq!(record.user_id, "u1");
    assert_eq!(record.completed_at, fixed_now());
    assert_eq!(record.end_date, end_date);
    assert_eq!(record.items.len(), 1);
    assert_eq!(record.items[0].price, Price(500_000));
    assert_eq!(record.items[0].image, "hanoi-1.jpg");

    let stored = system.history_client.find_by_order_id(id).await.unwrap();
    assert_eq!(stored, Some(record));

    let report = system.revenue_client.find_by_period(june()).await.unwrap().unwrap();
    assert_eq!(report.total_revenue, Price(500_000));
    assert_eq!(report.total_orders, 1);

    assert!(system.order_client.find_by_id(id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_archiving_twice_credits_revenue_once() {
    let (system, _clock) = system_at(fixed_now());
    ended_tour(&system, "hanoi-1").await;
    let id = place(&system, "u1", "hanoi-1", &[500_000], OrderStatus::Completed).await;

    assert!(matches!(
        system.lifecycle.archive_if_tour_ended(id).await,
        Ok(ArchiveOutcome::Archived(_))
    ));
    assert_eq!(
        system.lifecycle.archive_if_tour_ended(id).await,
        Err(LifecycleError::AlreadyArchived(id))
    );
    assert_eq!(
        system.lifecycle.force_archive(&admin(), id).await,
        Err(LifecycleError::AlreadyArchived(id))
    );

    let history = system.history_client.find(HistoryFilter::All).await.unwrap();
    assert_eq!(history.len(), 1);
    let report = system.revenue_client.find_by_period(june()).await.unwrap().unwrap();
    assert_eq!(report.total_revenue, Price(500_000));
    assert_eq!(report.total_orders, 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_guard_removes_leftover_order() {
    let (system, _clock) = system_at(fixed_now());
    ended_tour(&system, "hanoi-1").await;
    let id = place(&system, "u1", "hanoi-1", &[100], OrderStatus::Completed).await;
    let order = system.order_client.find_by_id(id).await.unwrap().unwrap();

    // A previous run got as far as the history insert.
    system
        .history_client
        .archive(tour_booking::model::HistoryCreate {
            user_id: order.user_id.clone(),
            order_id: id,
            completed_at: fixed_now(),
            end_date: fixed_now() - Duration::days(1),
            items: order.items.iter().map(Into::into).collect(),
        })
        .await
        .unwrap();

    assert_eq!(
        system.lifecycle.archive_if_tour_ended(id).await,
        Err(LifecycleError::AlreadyArchived(id))
    );
    assert!(system.order_client.find_by_id(id).await.unwrap().is_none());
    assert!(system.revenue_client.all().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_revenue_is_additive_within_a_month() {
    let (system, _clock) = system_at(fixed_now());
    ended_tour(&system, "hanoi-1").await;
    let first = place(&system, "u1", "hanoi-1", &[100], OrderStatus::Completed).await;
    let second = place(&system, "u2", "hanoi-1", &[200, 50], OrderStatus::AwaitingConfirmation).await;

    system.lifecycle.archive_if_tour_ended(first).await.unwrap();
    system.lifecycle.archive_if_tour_ended(second).await.unwrap();

    let reports = system.revenue_client.all().await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].period, june());
    assert_eq!(reports[0].total_revenue, Price(350));
    assert_eq!(reports[0].total_orders, 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_revenue_follows_completion_month() {
    let (system, clock) = system_at(fixed_now());
    ended_tour(&system, "hanoi-1").await;
    let june_order = place(&system, "u1", "hanoi-1", &[100], OrderStatus::Completed).await;
    let july_order = place(&system, "u1", "hanoi-1", &[400], OrderStatus::Completed).await;

    system.lifecycle.archive_if_tour_ended(june_order).await.unwrap();
    clock.advance(Duration::days(30));
    system.lifecycle.archive_if_tour_ended(july_order).await.unwrap();

    let reports = system.lifecycle.revenue_reports(&admin()).await.unwrap();
    let summary: Vec<(String, Price, u64)> = reports
        .iter()
        .map(|r| (r.period.to_string(), r.total_revenue, r.total_orders))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("07/2024".to_string(), Price(400), 1),
            ("06/2024".to_string(), Price(100), 1),
        ]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_pending_orders_are_never_archived() {
    let (system, _clock) = system_at(fixed_now());
    ended_tour(&system, "hanoi-1").await;
    let id = place(&system, "u1", "hanoi-1", &[100], OrderStatus::PendingPayment).await;

    let expected = Err(LifecycleError::InvalidState {
        order_id: id,
        expected: OrderStatus::AwaitingConfirmation,
        actual: OrderStatus::PendingPayment,
    });
    assert_eq!(
        system.lifecycle.archive_if_tour_ended(id).await.map(|_| ()),
        expected
    );
    assert_eq!(
        system.lifecycle.force_archive(&admin(), id).await.map(|_| ()),
        expected
    );
    assert!(system.order_client.find_by_id(id).await.unwrap().is_some());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_force_archive_skips_end_date() {
    let (system, _clock) = system_at(fixed_now());
    upcoming_tour(&system, "halong-3").await;
    let id = place(&system, "u1", "halong-3", &[900], OrderStatus::AwaitingConfirmation).await;

    let record = system.lifecycle.force_archive(&admin(), id).await.unwrap();
    assert_eq!(record.total(), Price(900));
    assert!(system.order_client.find_by_id(id).await.unwrap().is_none());

    let history = system.lifecycle.history_for_user("u1").await.unwrap();
    assert_eq!(history, vec![record]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_admin_operations_refuse_customers() {
    let (system, _clock) = system_at(fixed_now());
    ended_tour(&system, "hanoi-1").await;
    let id = place(&system, "u1", "hanoi-1", &[100], OrderStatus::AwaitingConfirmation).await;
    let customer = AuthContext::customer("u1");

    assert_eq!(
        system.lifecycle.confirm_payment(&customer, id).await,
        Err(LifecycleError::Forbidden)
    );
    assert_eq!(
        system.lifecycle.force_archive(&customer, id).await,
        Err(LifecycleError::Forbidden)
    );
    assert_eq!(
        system.lifecycle.revenue_reports(&customer).await,
        Err(LifecycleError::Forbidden)
    );
    let stored = system.order_client.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::AwaitingConfirmation);

    // Before any administrator exists the back office is open.
    let bootstrap = AuthContext::new(Principal::Anonymous, false);
    assert!(system.lifecycle.confirm_payment(&bootstrap, id).await.is_ok());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_back_office_listings() {
    let (system, _clock) = system_at(fixed_now());
    upcoming_tour(&system, "hanoi-1").await;
    let later = place_at(
        &system,
        "u1",
        "hanoi-1",
        &[100],
        OrderStatus::PendingPayment,
        fixed_now() - Duration::hours(5),
    )
    .await;
    let earlier = place_at(
        &system,
        "u2",
        "hanoi-1",
        &[100],
        OrderStatus::PendingPayment,
        fixed_now() - Duration::hours(8),
    )
    .await;
    let paid = place(&system, "u3", "hanoi-1", &[100], OrderStatus::AwaitingConfirmation).await;

    let pending = system
        .lifecycle
        .orders_with_status(&admin(), OrderStatus::PendingPayment)
        .await
        .unwrap();
    assert_eq!(pending.iter().map(|o| o.id).collect::<Vec<_>>(), vec![earlier, later]);

    assert!(matches!(
        system.lifecycle.delete_pending_order(&admin(), paid).await,
        Err(LifecycleError::InvalidState { .. })
    ));
    system.lifecycle.delete_pending_order(&admin(), later).await.unwrap();
    assert!(system.order_client.find_by_id(later).await.unwrap().is_none());
    assert!(matches!(
        system.lifecycle.delete_pending_order(&admin(), later).await,
        Err(LifecycleError::NotFound(_))
    ));

    assert_eq!(
        system.lifecycle.revenue_reports(&admin()).await,
        Err(LifecycleError::NotFound("revenue reports".into()))
    );

    system.shutdown().await.unwrap();
}

/// Real Order, Tour and Revenue actors with a scripted History archive that
/// loses the insert race.
#[tokio::test]
async fn test_lost_history_race_does_not_credit_revenue() {
    let (system, _clock) = system_at(fixed_now());
    ended_tour(&system, "hanoi-1").await;
    let id = place(&system, "u1", "hanoi-1", &[500_000], OrderStatus::Completed).await;

    let mut history = MockCollection::<HistoryRecord>::new();
    history.expect_find().return_ok(vec![]);
    history
        .expect_create()
        .return_err(StoreError::DuplicateKey(id.to_string()));

    let lifecycle = OrderLifecycle::new(
        system.order_client.clone(),
        system.tour_client.clone(),
        HistoryClient::new(history.client()),
        system.revenue_client.clone(),
    )
    .with_clock(Arc::new(FixedClock::new(fixed_now())));

    assert_eq!(
        lifecycle.archive_if_tour_ended(id).await,
        Err(LifecycleError::AlreadyArchived(id))
    );
    assert!(system.revenue_client.all().await.unwrap().is_empty());
    assert!(system.order_client.find_by_id(id).await.unwrap().is_some());
    history.verify();

    drop(lifecycle);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_storage_failure_is_generic_for_users() {
    let (system, _clock) = system_at(fixed_now());
    ended_tour(&system, "hanoi-1").await;
    let id = place(&system, "u1", "hanoi-1", &[100], OrderStatus::Completed).await;

    let mut revenue = MockCollection::<RevenueReport>::new();
    revenue.expect_find().return_err(StoreError::ActorClosed);

    let lifecycle = OrderLifecycle::new(
        system.order_client.clone(),
        system.tour_client.clone(),
        system.history_client.clone(),
        RevenueClient::new(revenue.client()),
    )
    .with_clock(Arc::new(FixedClock::new(fixed_now())));

    let err = lifecycle.archive_if_tour_ended(id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::Storage(_)));
    assert!(!err.user_message().contains("closed"));

    // The order stays, so the guard will clean it up on retry.
    assert!(system.order_client.find_by_id(id).await.unwrap().is_some());
    assert_eq!(
        system.lifecycle.archive_if_tour_ended(id).await,
        Err(LifecycleError::AlreadyArchived(id))
    );
    assert!(system
        .order_client
        .find(OrderFilter::all())
        .await
        .unwrap()
        .is_empty());
    revenue.verify();

    drop(lifecycle);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_force_archive_credits_once() {
    let (system, _clock) = system_at(fixed_now());
    upcoming_tour(&system, "hanoi-1").await;
    let id = place(&system, "u1", "hanoi-1", &[500_000], OrderStatus::Completed).await;

    let auth = admin();
    let (first, second) = tokio::join!(
        system.lifecycle.force_archive(&auth, id),
        system.lifecycle.force_archive(&auth, id),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| **r == Err(LifecycleError::AlreadyArchived(id)))
            .count(),
        1
    );

    let history = system.history_client.find(HistoryFilter::All).await.unwrap();
    assert_eq!(history.len(), 1);
    let report = system.revenue_client.find_by_period(june()).await.unwrap().unwrap();
    assert_eq!(report.total_revenue, Price(500_000));
    assert_eq!(report.total_orders, 1);
    assert!(system.order_client.find_by_id(id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}
