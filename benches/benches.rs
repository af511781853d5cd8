use std::time::Duration;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BatchSize;
use criterion::Criterion;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use redis_map::RedisMap;
use redis_map::SledProvider;
use tempfile::TempDir;

fn write_benchmark(c: &mut Criterion) {
    c.bench_function("sled_put", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().unwrap();
                let provider = SledProvider::open(dir.path()).unwrap();
                (dir, RedisMap::new("bench", provider))
            },
            |(_dir, map)| {
                let mut rng = SmallRng::from_seed([0; 32]);
                for _ in 0..100 {
                    let i = rng.gen_range(0..100000);
                    let key = format!("key{}", i);
                    let value = format!("value{}", i);
                    map.put(&key, &value).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
    c.bench_function("sled_put_all", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().unwrap();
                let provider = SledProvider::open(dir.path()).unwrap();
                (dir, RedisMap::new("bench", provider))
            },
            |(_dir, map)| {
                let entries = (0..100).map(|i| (format!("key{}", i), format!("value{}", i)));
                map.put_all(entries).unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

fn read_benchmark(c: &mut Criterion) {
    c.bench_function("sled_get", |b| {
        let dir = TempDir::new().unwrap();
        let map = RedisMap::new("bench", SledProvider::open(dir.path()).unwrap());
        for i in 0..100 {
            let key = format!("key{}", i);
            let value = format!("value{}", i);
            map.put(&key, &value).unwrap();
        }
        let mut rng = SmallRng::from_seed([0; 32]);
        b.iter(|| {
            let key = format!("key{}", rng.gen_range(0..100));
            map.get(&key).unwrap();
        });
    });
    c.bench_function("sled_entry_set", |b| {
        let dir = TempDir::new().unwrap();
        let map = RedisMap::new("bench", SledProvider::open(dir.path()).unwrap());
        for i in 0..100 {
            map.put(&format!("key{}", i), &format!("value{}", i)).unwrap();
        }
        b.iter(|| map.entry_set().unwrap());
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = write_benchmark, read_benchmark
}
criterion_main!(benches);
