use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jsh_core::{Action, IdObject, Object, Relationships, Resource, Validator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hint::black_box;

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
struct Account {
    #[serde(skip)]
    #[jsh("one,create,update")]
    owner: Option<IdObject>,
    #[jsh("create/required,update")]
    name: String,
    #[jsh("create,update")]
    email: String,
    #[jsh("create,update")]
    active: bool,
    #[jsh("create,update")]
    score: u64,
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
struct Line {
    #[jsh("create/required")]
    sku: String,
    #[jsh("create")]
    quantity: u32,
    #[jsh("create")]
    notes: Vec<String>,
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
struct Order {
    #[jsh("create/required")]
    reference: String,
    #[jsh("create")]
    lines: Vec<Line>,
    #[jsh("create")]
    labels: HashMap<String, String>,
    #[serde(skip)]
    #[jsh("many,create")]
    coupons: HashMap<String, IdObject>,
}

impl Order {
    fn new_sample(line_count: usize) -> Self {
        Self {
            reference: "ORD-0001".to_string(),
            lines: (0..line_count)
                .map(|i| Line { sku: format!("SKU-{}", i), quantity: i as u32 + 1, notes: vec!["gift".into()] })
                .collect(),
            labels: HashMap::from([("channel".to_string(), "web".to_string())]),
            coupons: HashMap::new(),
        }
    }
}

fn benchmark_flat_model(c: &mut Criterion) {
    let raw = serde_json::to_vec(&Account {
        owner: None,
        name: "bench".into(),
        email: "bench@example.com".into(),
        active: true,
        score: 42,
    })
    .unwrap();
    let mut relationships = Relationships::new();
    relationships.insert("owner".into(), jsh_core::Relationship::one(IdObject::new("users", "1")));

    let mut group = c.benchmark_group("flat_model");
    for action in [Action::Create, Action::Update] {
        let validator = Validator::new(action);
        group.bench_with_input(BenchmarkId::new("validate", action), &raw, |b, raw| {
            b.iter(|| {
                let mut account: Account = serde_json::from_slice(raw).unwrap();
                black_box(validator.validate(&mut account, raw, &relationships).unwrap())
            });
        });
    }
    group.finish();
}

fn benchmark_nested_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_model");

    for line_count in [1, 10, 100, 1000] {
        let mut object = Object::new("", "orders").with_attributes(&Order::new_sample(line_count)).unwrap();
        let coupons = (0..5).map(|i| IdObject::new("coupons", i.to_string())).collect();
        object.add_relationship_many("coupons", coupons);

        group.bench_with_input(BenchmarkId::new("process_create", line_count), &object, |b, object| {
            b.iter(|| {
                let mut order = Order::default();
                black_box(object.process_create("orders", &mut order).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_flat_model, benchmark_nested_model);
criterion_main!(benches);
