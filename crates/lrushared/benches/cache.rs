use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrukit::LruCache;
use lrushared::SharedLru;

fn bench_core_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("core_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for key in 0..1000u64 {
            cache.put(key, key);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 1000)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_core_put_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("core_put");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_evicting", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for key in 0..1000u64 {
            cache.put(key, key);
        }

        // Every key is new, so every put evicts
        let mut counter = 1000u64;
        b.iter(|| {
            cache.put(black_box(counter), counter);
            counter += 1;
        });
    });

    group.finish();
}

fn bench_shared_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1kb_cached", |b| {
        let cache = SharedLru::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        for key in 0..100u64 {
            cache.put(key, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write_shared", |b| {
        let cache = SharedLru::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        for key in 0..100u64 {
            cache.put(key, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(&(counter % 100)));
            } else {
                cache.put(counter, data.clone());
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_shared_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("memoize_thrash", |b| {
        let cache = SharedLru::new(10).unwrap(); // Small cache

        // Cycling through more keys than the capacity guarantees misses
        let mut counter = 0u64;
        b.iter(|| {
            let key = counter % 100;
            black_box(cache.get_or_insert_with(key, || key * key));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_core_get,
    bench_core_put_evicting,
    bench_shared_get,
    bench_mixed_50_50,
    bench_shared_miss
);
criterion_main!(benches);
