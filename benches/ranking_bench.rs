use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};
use skinstric::config::ReviewConfig;
use skinstric::payload::ingest;
use skinstric::policy::sort_age_rows;
use skinstric::ranked::build_ranked;
use std::hint::black_box;

fn setup_payload() -> Map<String, Value> {
    let races = [
        "black",
        "white",
        "east asian",
        "southeast asian",
        "south asian",
        "latino hispanic",
        "middle eastern",
    ];
    let race: Vec<Value> = races
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"label": name, "confidence": (i as f64 + 1.0) / 28.0}))
        .collect();

    let mut age = Map::new();
    for decade in 0..10 {
        let label = format!("{}-{}", decade * 10, decade * 10 + 9);
        age.insert(label, json!(0.1 / (decade as f64 + 1.0)));
    }

    let payload = json!({
        "data": {
            "race": race,
            "age": age,
            "gender": {"predictions": [{"class": "male", "probability": "62%"}]}
        }
    });
    match payload {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let payload = setup_payload();
    let config = ReviewConfig::default();
    let age_node = &payload["data"]["age"];
    let age_rows = build_ranked(age_node);

    c.bench_function("build_ranked (keyed age)", |b| {
        b.iter(|| build_ranked(black_box(age_node)))
    });

    c.bench_function("sort_age_rows (10 buckets)", |b| {
        b.iter(|| sort_age_rows(black_box(&age_rows)))
    });

    c.bench_function("ingest (full payload)", |b| {
        b.iter(|| ingest(black_box(&payload), black_box(&config)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
