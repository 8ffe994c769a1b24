//! Benchmark for the all-fast aggregation path.

#![allow(clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use product_aggregator::application::AggregationOrchestrator;
use product_aggregator::domain::{Inventory, ProductDetails, ProductId, Recommendations, UserId};
use product_aggregator::infrastructure::sources::{
    InMemoryInventorySource, InMemoryProductDetailsSource, InMemoryRecommendationsSource,
};
use std::sync::Arc;

fn bench_aggregate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let engine = rt.block_on(async {
        AggregationOrchestrator::with_defaults(
            Arc::new(InMemoryProductDetailsSource::responding(
                ProductDetails::new(ProductId::new("p1"), "Widget"),
            )),
            Arc::new(InMemoryInventorySource::responding(Inventory::new(
                ProductId::new("p1"),
                5,
            ))),
            Arc::new(InMemoryRecommendationsSource::responding(
                Recommendations::new(
                    ProductId::new("p1"),
                    UserId::new("u1"),
                    vec![ProductId::new("p2")],
                ),
            )),
        )
    });

    let product = ProductId::new("p1");
    let user = UserId::new("u1");

    c.bench_function("aggregate_all_fast", |b| {
        b.to_async(&rt).iter(|| async {
            let view = engine.aggregate(&product, &user).await.unwrap();
            assert!(view.is_complete());
        });
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
