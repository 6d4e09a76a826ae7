//! Performance benchmarks for encoding and inference

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shipping_delay::features::encode;
use shipping_delay::features::vocabulary::*;
use shipping_delay::ml::model::{DecisionTree, ModelArtifact, ModelKind, RandomForest, TreeNode};
use shipping_delay::{predict_delay, ShipmentInput};

fn shipment() -> ShipmentInput {
    ShipmentInput {
        product_category: ProductCategory::Furniture,
        product_weight: 42.5,
        shipping_method: ShippingMethod::Standard,
        distance: 1800.0,
        items_in_shipment: 2,
        shipping_mode: ShippingMode::Sea,
        origin_city: City::Houston,
        destination_city: City::SanFrancisco,
        weather_conditions: Weather::Rain,
        holiday_indicator: Holiday::Yes,
        warehouse_processing_time: 36,
        traffic_conditions: Traffic::Moderate,
    }
}

/// Balanced tree of the given depth splitting on every column in turn
fn deep_tree(depth: usize) -> DecisionTree {
    let internal = (1 << depth) - 1;
    let mut nodes = Vec::with_capacity(internal * 2 + 1);
    for i in 0..internal {
        nodes.push(TreeNode::Split {
            feature: i % 12,
            threshold: (i % 7) as f64,
            left: 2 * i + 1,
            right: 2 * i + 2,
        });
    }
    for i in 0..=internal {
        nodes.push(TreeNode::Leaf {
            value: (i % 2) as f64,
        });
    }
    DecisionTree { nodes }
}

fn bench_prediction(c: &mut Criterion) {
    let input = shipment();
    let forest = ModelArtifact::new(ModelKind::RandomForest(RandomForest {
        trees: (0..100).map(|_| deep_tree(10)).collect(),
    }));
    forest.validate().expect("benchmark forest should be valid");

    c.bench_function("encode_shipment", |b| {
        b.iter(|| encode(black_box(&input)));
    });

    c.bench_function("predict_forest_100x10", |b| {
        b.iter(|| predict_delay(black_box(&input), black_box(&forest)));
    });
}

criterion_group!(benches, bench_prediction);
criterion_main!(benches);
