use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use holocache::{CacheAside, CacheKey, VisibilityTracker};
use holostore::MemoryStore;
use serde_json::{json, Value};

fn bench_try_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("try_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    group.bench_function("hit_entity", |b| {
        let cache = CacheAside::new(Arc::new(MemoryStore::new()));
        let key = CacheKey::entry("planets", "1");
        let planet = json!({
            "name": "Tatooine",
            "rotation_period": "23",
            "orbital_period": "304",
            "url": "https://swapi.dev/api/planets/1/"
        });

        // Warm the cache
        rt.block_on(cache.try_get(&key, || async { Ok::<_, ()>(planet.clone()) }))
            .unwrap();

        b.iter(|| {
            let value: Value = rt
                .block_on(cache.try_get(&key, || async { Ok::<_, ()>(Value::Null) }))
                .unwrap();
            black_box(value);
        });
    });

    group.bench_function("hit_collection_82", |b| {
        let cache = CacheAside::new(Arc::new(MemoryStore::new()));
        let key = CacheKey::collection("characters");
        let people: Vec<Value> = (1..=82)
            .map(|i| {
                json!({
                    "name": format!("Character {}", i),
                    "films": ["https://swapi.dev/api/films/1/"],
                    "url": format!("https://swapi.dev/api/people/{}/", i)
                })
            })
            .collect();

        rt.block_on(cache.try_get(&key, || async { Ok::<_, ()>(people.clone()) }))
            .unwrap();

        b.iter(|| {
            let value: Vec<Value> = rt
                .block_on(cache.try_get(&key, || async { Ok::<_, ()>(Vec::new()) }))
                .unwrap();
            black_box(value);
        });
    });

    group.finish();
}

fn bench_record_visit(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    group.bench_function("record_repeat_visit", |b| {
        let tracker = VisibilityTracker::new(Arc::new(MemoryStore::new()), "movies");
        for id in 1..=6 {
            rt.block_on(tracker.record_visit("bench", &id.to_string()));
        }

        b.iter(|| {
            rt.block_on(tracker.record_visit(black_box("bench"), black_box("4")));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_try_get_hit, bench_record_visit);
criterion_main!(benches);
