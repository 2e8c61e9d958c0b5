use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{
    KeyOrder, apply_medium_runtime_config, apply_small_runtime_config, mix_seed, probe_key,
    seed_for_iter, workload_keys,
};
use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ordered_container::{
    ArrayMap, AvlTreeMap, BinarySearchMap, BstMap, HashTableMap, OrderedContainer,
};

const SIZES: [usize; 3] = [1_000, 4_000, 16_000];
const OPS_PER_ITER: usize = 200;
const RANGE_WIDTH: u64 = 64;

#[derive(Clone)]
enum PointOp {
    Get { key: u64 },
    Contains { key: u64 },
}

#[derive(Clone)]
enum OrderOp {
    Next { key: u64 },
    Prev { key: u64 },
    Range { k1: u64, k2: u64 },
}

#[derive(Clone)]
enum UpdateOp {
    Insert { key: u64, value: u64 },
    Erase { key: u64 },
}

fn build<M>(size: usize, order: KeyOrder, seed: u64) -> (M, Vec<u64>)
where
    M: OrderedContainer<Key = u64, Value = u64>,
{
    let keys = workload_keys(size, order, seed);
    let mut map = M::new();
    for &k in &keys {
        black_box(map.insert(k, k));
    }
    (map, keys)
}

fn configure<T: Measurement>(group: &mut BenchmarkGroup<'_, T>, size: usize) {
    if size >= 16_000 {
        apply_medium_runtime_config(group);
    } else {
        apply_small_runtime_config(group);
    }
}

pub fn bench_point<M, T>(group: &mut BenchmarkGroup<'_, T>, label: &str, order: KeyOrder)
where
    T: Measurement<Value = Duration>,
    M: OrderedContainer<Key = u64, Value = u64>,
{
    for &size in &SIZES {
        configure(group, size);
        let base_seed = mix_seed(0x9071_0000 ^ size as u64);
        let (map, _) = build::<M>(size, order, base_seed);
        let id = BenchmarkId::new(format!("{label}/{}", order.label()), size);

        group.bench_function(id, |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = StdRng::seed_from_u64(seed_for_iter(base_seed, iter));
                    let ops: Vec<PointOp> = (0..OPS_PER_ITER)
                        .map(|_| {
                            let key = probe_key(&mut rng, size);
                            if rng.random_bool(0.5) {
                                PointOp::Get { key }
                            } else {
                                PointOp::Contains { key }
                            }
                        })
                        .collect();
                    let start = Instant::now();
                    for op in &ops {
                        match *op {
                            PointOp::Get { key } => {
                                black_box(map.get(&key).ok());
                            }
                            PointOp::Contains { key } => {
                                black_box(map.contains(&key));
                            }
                        }
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

pub fn bench_order<M, T>(group: &mut BenchmarkGroup<'_, T>, label: &str, order: KeyOrder)
where
    T: Measurement<Value = Duration>,
    M: OrderedContainer<Key = u64, Value = u64>,
{
    for &size in &SIZES {
        configure(group, size);
        let base_seed = mix_seed(0x0DE2_0000 ^ size as u64);
        let (map, _) = build::<M>(size, order, base_seed);
        let id = BenchmarkId::new(format!("{label}/{}", order.label()), size);

        group.bench_function(id, |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = StdRng::seed_from_u64(seed_for_iter(base_seed, iter));
                    let ops: Vec<OrderOp> = (0..OPS_PER_ITER)
                        .map(|_| {
                            let key = probe_key(&mut rng, size);
                            match rng.random_range(0..3) {
                                0 => OrderOp::Next { key },
                                1 => OrderOp::Prev { key },
                                _ => OrderOp::Range {
                                    k1: key,
                                    k2: key + RANGE_WIDTH,
                                },
                            }
                        })
                        .collect();
                    let start = Instant::now();
                    for op in &ops {
                        match *op {
                            OrderOp::Next { key } => {
                                black_box(map.next_key(&key));
                            }
                            OrderOp::Prev { key } => {
                                black_box(map.prev_key(&key));
                            }
                            OrderOp::Range { k1, k2 } => {
                                black_box(map.find_keys(&k1, &k2));
                            }
                        }
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

pub fn bench_update<M, T>(group: &mut BenchmarkGroup<'_, T>, label: &str, order: KeyOrder)
where
    T: Measurement<Value = Duration>,
    M: OrderedContainer<Key = u64, Value = u64>,
{
    for &size in &SIZES {
        configure(group, size);
        let base_seed = mix_seed(0x0FDA_7E00 ^ size as u64);
        let (mut map, _) = build::<M>(size, order, base_seed);
        let id = BenchmarkId::new(format!("{label}/{}", order.label()), size);

        group.bench_function(id, |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = StdRng::seed_from_u64(seed_for_iter(base_seed, iter));
                    let ops = generate_update_ops(size, &mut rng);
                    let start = Instant::now();
                    for op in &ops {
                        match *op {
                            UpdateOp::Insert { key, value } => {
                                black_box(map.insert(key, value));
                            }
                            UpdateOp::Erase { key } => {
                                black_box(map.erase(&key).ok());
                            }
                        }
                    }
                    black_box(map.len());
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

// Inserts odd keys (never part of the initial set) and erases each one again
// within the same batch, so the map returns to its initial size.
fn generate_update_ops(size: usize, rng: &mut StdRng) -> Vec<UpdateOp> {
    let mut live = Vec::with_capacity(OPS_PER_ITER / 2);
    let mut ops = Vec::with_capacity(OPS_PER_ITER);
    for i in 0..OPS_PER_ITER {
        if i % 2 == 0 {
            let key = probe_key(rng, size) | 1;
            live.push(key);
            ops.push(UpdateOp::Insert { key, value: key });
        } else {
            let idx = rng.random_range(0..live.len());
            ops.push(UpdateOp::Erase {
                key: live.swap_remove(idx),
            });
        }
    }
    debug_assert!(live.is_empty());
    ops
}

macro_rules! bench_all {
    ($name:ident, $func:ident) => {
        pub fn $name<T>(group: &mut BenchmarkGroup<'_, T>)
        where
            T: Measurement<Value = Duration>,
        {
            for order in [KeyOrder::Shuffled, KeyOrder::Ascending] {
                $func::<ArrayMap<u64, u64>, _>(group, "array", order);
                $func::<BinarySearchMap<u64, u64>, _>(group, "binary_search", order);
                $func::<AvlTreeMap<u64, u64>, _>(group, "avl", order);
                $func::<HashTableMap<u64, u64>, _>(group, "hash_table", order);
                $func::<BstMap<u64, u64>, _>(group, "bst", order);
            }
        }
    };
}

bench_all!(bench_all_point, bench_point);
bench_all!(bench_all_order, bench_order);
bench_all!(bench_all_update, bench_update);
