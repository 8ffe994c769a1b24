//! End-to-end aggregation scenarios against in-memory sources.

#![allow(clippy::unwrap_used)]

use product_aggregator::application::AggregationOrchestrator;
use product_aggregator::config::AggregationConfig;
use product_aggregator::domain::{
    Inventory, ProductDetails, ProductId, Recommendations, Source, UserId,
};
use product_aggregator::infrastructure::SourcePool;
use product_aggregator::infrastructure::sources::{
    InMemoryInventorySource, InMemoryProductDetailsSource, InMemoryRecommendationsSource,
    SourceError,
};
use std::sync::Arc;
use std::time::Duration;

fn widget_details() -> ProductDetails {
    ProductDetails::new(ProductId::new("prod-1"), "Widget").with_price_minor(1299)
}

fn widget_inventory() -> Inventory {
    Inventory::new(ProductId::new("prod-1"), 42).with_location("eu-west")
}

fn widget_recommendations() -> Recommendations {
    Recommendations::new(
        ProductId::new("prod-1"),
        UserId::new("user-1"),
        vec![ProductId::new("prod-7"), ProductId::new("prod-9")],
    )
}

#[tokio::test(start_paused = true)]
async fn happy_path_returns_fully_populated_view() {
    let engine = AggregationOrchestrator::with_defaults(
        Arc::new(InMemoryProductDetailsSource::responding(widget_details())),
        Arc::new(InMemoryInventorySource::responding(widget_inventory())),
        Arc::new(InMemoryRecommendationsSource::responding(
            widget_recommendations(),
        )),
    );

    let view = engine
        .aggregate(&ProductId::new("prod-1"), &UserId::new("user-1"))
        .await
        .unwrap();

    assert!(view.is_complete());
    assert_eq!(view.product_details().unwrap().name(), "Widget");
    assert_eq!(view.inventory().unwrap().in_stock(), 42);
    assert_eq!(view.recommendations().unwrap().items().len(), 2);
    for source in Source::ALL {
        assert!(view.status().get(source).is_ok(), "{source} not OK");
    }
}

#[tokio::test(start_paused = true)]
async fn degraded_scenario_details_ok_inventory_error_recommendations_slow() {
    // The canonical degraded case: one success, one application error,
    // one source slower than its deadline.
    let engine = AggregationOrchestrator::with_defaults(
        Arc::new(InMemoryProductDetailsSource::responding(widget_details())),
        Arc::new(InMemoryInventorySource::failing(SourceError::upstream(
            "DB down",
        ))),
        Arc::new(
            InMemoryRecommendationsSource::responding(widget_recommendations())
                .with_delay(Duration::from_millis(2000)),
        ),
    );

    let view = engine
        .aggregate(&ProductId::new("prod-1"), &UserId::new("user-1"))
        .await
        .unwrap();

    assert_eq!(view.status().details().as_str(), "OK");
    assert_eq!(view.status().inventory().as_str(), "DB down");
    assert_eq!(view.status().recommendations().as_str(), "Timeout");
    assert!(view.product_details().is_some());
    assert!(view.inventory().is_none());
    assert!(view.recommendations().is_none());
}

#[tokio::test(start_paused = true)]
async fn all_failed_view_is_returned_not_raised() {
    let engine = AggregationOrchestrator::with_defaults(
        Arc::new(InMemoryProductDetailsSource::failing(
            SourceError::connection("connection refused"),
        )),
        Arc::new(InMemoryInventorySource::failing(SourceError::unavailable(
            "maintenance window",
        ))),
        Arc::new(
            InMemoryRecommendationsSource::responding(widget_recommendations())
                .with_delay(Duration::from_secs(60)),
        ),
    );

    let view = engine
        .aggregate(&ProductId::new("prod-1"), &UserId::new("user-1"))
        .await
        .unwrap();

    assert!(!view.is_complete());
    assert_eq!(view.status().ok_count(), 0);
    assert!(view.product_details().is_none());
    assert!(view.inventory().is_none());
    assert!(view.recommendations().is_none());
}

#[tokio::test(start_paused = true)]
async fn aggregate_honors_the_overall_bound_with_custom_timeouts() {
    let config = AggregationConfig::default()
        .with_per_source_timeout_ms(100)
        .with_overall_wait_buffer_ms(50);
    let pool = SourcePool::new(&config.pool);
    let hang = Duration::from_secs(600);

    let engine = AggregationOrchestrator::new(
        Arc::new(InMemoryProductDetailsSource::responding(widget_details()).with_delay(hang)),
        Arc::new(InMemoryInventorySource::responding(widget_inventory()).with_delay(hang)),
        Arc::new(
            InMemoryRecommendationsSource::responding(widget_recommendations()).with_delay(hang),
        ),
        pool,
        config,
    );

    let started = tokio::time::Instant::now();
    let view = engine
        .aggregate(&ProductId::new("prod-1"), &UserId::new("user-1"))
        .await
        .unwrap();

    assert!(started.elapsed() <= Duration::from_millis(200));
    assert_eq!(view.status().ok_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn view_serializes_for_the_wire_layer() {
    let engine = AggregationOrchestrator::with_defaults(
        Arc::new(InMemoryProductDetailsSource::responding(widget_details())),
        Arc::new(InMemoryInventorySource::failing(SourceError::upstream(
            "DB down",
        ))),
        Arc::new(InMemoryRecommendationsSource::responding(
            widget_recommendations(),
        )),
    );

    let view = engine
        .aggregate(&ProductId::new("prod-1"), &UserId::new("user-1"))
        .await
        .unwrap();

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["status"]["details"], "OK");
    assert_eq!(json["status"]["inventory"], "DB down");
    assert_eq!(json["status"]["recommendations"], "OK");
    assert_eq!(json["product_details"]["name"], "Widget");
    assert!(json["inventory"].is_null());
}

#[tokio::test(start_paused = true)]
async fn concurrent_aggregations_share_one_pool() {
    let config = AggregationConfig::default();
    let pool = SourcePool::new(&config.pool);

    let engine = Arc::new(AggregationOrchestrator::new(
        Arc::new(InMemoryProductDetailsSource::responding(widget_details())),
        Arc::new(InMemoryInventorySource::responding(widget_inventory())),
        Arc::new(InMemoryRecommendationsSource::responding(
            widget_recommendations(),
        )),
        pool,
        config,
    ));

    let mut handles = Vec::new();
    for i in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine
                .aggregate(&ProductId::new(format!("prod-{i}")), &UserId::new("user-1"))
                .await
        }));
    }

    for handle in handles {
        let view = handle.await.unwrap().unwrap();
        assert!(view.is_complete());
    }
}
