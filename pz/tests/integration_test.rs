//! Integration tests for the pizzeria pipeline
//!
//! These tests run the full pipeline (coordinator plus all five stages) with
//! short simulated delays and check the observable event stream.

use std::time::Duration;

use pizzeria::config::{Config, SimulationConfig};
use pizzeria::domain::{EventKind, OrderPayload, Role};
use pizzeria::events::PipelineEvent;
use pizzeria::pipeline::{Pizzeria, demo_orders, wait_for_completions};
use pizzeria::stages::Component;

fn fast_config() -> Config {
    Config {
        simulation: SimulationConfig {
            dispatch_delay_ms: 2,
            stage_delay_ms: 3,
        },
        ..Default::default()
    }
}

/// Kinds dispatched for one order, with the terminal completion appended
fn kind_sequence(events: &[PipelineEvent], item: &str) -> Vec<EventKind> {
    events
        .iter()
        .filter(|e| e.order().is_some_and(|o| o.item == item))
        .filter_map(|e| match e {
            PipelineEvent::Dispatched { kind, .. } => Some(kind.clone()),
            PipelineEvent::OrderCompleted { .. } => Some(EventKind::DeliveryDone),
            _ => None,
        })
        .collect()
}

fn full_pipeline() -> Vec<EventKind> {
    vec![
        EventKind::OrderPlaced,
        EventKind::KitchenDone,
        EventKind::OvenDone,
        EventKind::PaymentDone,
        EventKind::DeliveryDone,
    ]
}

// =============================================================================
// Single order
// =============================================================================

#[tokio::test]
async fn test_order_runs_all_five_stages_with_payload_unchanged() {
    let pizzeria = Pizzeria::start(&fast_config()).await.expect("pipeline should start");
    let mut rx = pizzeria.subscribe();

    pizzeria.waiter().place_order("Pizza X", 7, false).await.unwrap();

    let events = wait_for_completions(&mut rx, 1, Duration::from_secs(5)).await.unwrap();

    assert_eq!(kind_sequence(&events, "Pizza X"), full_pipeline());

    let expected = OrderPayload::new("Pizza X", 7, false);
    for event in &events {
        assert_eq!(event.order(), Some(&expected), "payload changed at {:?}", event);
    }

    let roles: Vec<Role> = events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::WorkStarted { role, .. } => Some(*role),
            _ => None,
        })
        .collect();
    assert_eq!(roles, vec![Role::Kitchen, Role::Oven, Role::Billing, Role::Delivery]);

    pizzeria.shutdown().await.unwrap();
}

// =============================================================================
// Demo scenario
// =============================================================================

#[tokio::test]
async fn test_demo_urgent_order_reaches_kitchen_first() {
    let pizzeria = Pizzeria::start(&fast_config()).await.unwrap();
    let mut rx = pizzeria.subscribe();

    pizzeria.place_orders(&demo_orders()).await.unwrap();

    let events = wait_for_completions(&mut rx, 3, Duration::from_secs(10)).await.unwrap();

    let taken: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::Dispatched {
                kind: EventKind::OrderPlaced,
                order,
                ..
            } => Some(order.item.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(taken, vec!["Pizza Marguerita", "Pizza Calabresa", "Pizza Quatro Queijos"]);

    let first_in_kitchen = events.iter().find_map(|e| match e {
        PipelineEvent::WorkStarted {
            role: Role::Kitchen,
            order,
            ..
        } => Some(order.item.clone()),
        _ => None,
    });
    assert_eq!(first_in_kitchen.as_deref(), Some("Pizza Marguerita"));

    for order in demo_orders() {
        assert_eq!(kind_sequence(&events, &order.item), full_pipeline(), "{}", order.item);
        assert!(
            events
                .iter()
                .filter_map(|e| e.order())
                .filter(|o| o.item == order.item)
                .all(|o| *o == order)
        );
    }

    let metrics = pizzeria.coordinator().metrics().await.unwrap();
    assert_eq!(metrics.orders_completed, 3);
    assert_eq!(metrics.events_received, 15);
    assert_eq!(metrics.events_dispatched, 12);
    assert_eq!(metrics.events_discarded, 0);
    assert_eq!(metrics.queue_depth, 0);
    assert!(!metrics.busy);
    assert_eq!(metrics.registered_components, 5);

    pizzeria.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_demo_ordering_holds_on_multi_thread_runtime() {
    for _ in 0..20 {
        let pizzeria = Pizzeria::start(&fast_config()).await.unwrap();
        let mut rx = pizzeria.subscribe();

        pizzeria.place_orders(&demo_orders()).await.unwrap();

        let events = wait_for_completions(&mut rx, 3, Duration::from_secs(10)).await.unwrap();
        let first_taken = events.iter().find_map(|e| match e {
            PipelineEvent::Dispatched {
                kind: EventKind::OrderPlaced,
                order,
                ..
            } => Some(order.item.clone()),
            _ => None,
        });
        assert_eq!(first_taken.as_deref(), Some("Pizza Marguerita"));

        pizzeria.shutdown().await.unwrap();
    }
}

// =============================================================================
// Error paths
// =============================================================================

#[tokio::test]
async fn test_unknown_event_does_not_stall_pipeline() {
    let pizzeria = Pizzeria::start(&fast_config()).await.unwrap();
    let mut rx = pizzeria.subscribe();

    pizzeria
        .coordinator()
        .notify_raw("Test", "bogus_kind", OrderPayload::default())
        .await
        .unwrap();
    pizzeria.waiter().place_order("Pizza Y", 4, false).await.unwrap();

    let events = wait_for_completions(&mut rx, 1, Duration::from_secs(5)).await.unwrap();

    let discarded = events
        .iter()
        .position(|e| matches!(e, PipelineEvent::EventDiscarded { kind, .. } if kind == "bogus_kind"))
        .expect("bogus event should be discarded");
    let first_dispatch = events
        .iter()
        .position(|e| matches!(e, PipelineEvent::Dispatched { .. }))
        .expect("order should be dispatched");
    assert!(discarded < first_dispatch);
    assert_eq!(kind_sequence(&events, "Pizza Y"), full_pipeline());

    let metrics = pizzeria.coordinator().metrics().await.unwrap();
    assert_eq!(metrics.events_discarded, 1);

    pizzeria.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_lookup_of_fixed_components() {
    let pizzeria = Pizzeria::start(&fast_config()).await.unwrap();

    for role in Role::ALL {
        let component = pizzeria.coordinator().lookup(role.default_name()).await.unwrap();
        assert_eq!(component.role(), role);
    }
    assert!(pizzeria.coordinator().lookup("Cozinha").await.is_err());

    pizzeria.shutdown().await.unwrap();
}
