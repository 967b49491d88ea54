//! Criterion benchmarks for location scans.
//!
//! Two layouts:
//! - `scan_dense_64x64`: every tile occupied -- one giant group, worst-case
//!   flood fill.
//! - `scan_sparse_64x64`: isolated machines every 4 tiles -- many singleton
//!   groups, worst-case outer loop.

use criterion::{Criterion, criterion_group, criterion_main};
use grange_core::factory::FactoryChain;
use grange_core::rules::RuleSet;
use grange_core::test_utils::{KindFactory, TestLocation};
use grange_discovery::discover;

fn farm_chain() -> FactoryChain {
    let mut chain = FactoryChain::new();
    chain.register(Box::new(
        KindFactory::new("farm-kit")
            .machine("keg")
            .container("chest")
            .connector("fence"),
    ));
    chain
}

/// A 64x64 location fully tiled with kegs and chests: one giant group.
fn dense_location() -> TestLocation {
    let mut location = TestLocation::new("Farm", 64, 64);
    for y in 0..64 {
        for x in 0..64 {
            let kind = if (x + y) % 8 == 0 { "chest" } else { "keg" };
            location = location.with_object(kind, x, y);
        }
    }
    location
}

/// A 64x64 location with isolated machines: many singleton groups.
fn sparse_location() -> TestLocation {
    let mut location = TestLocation::new("Farm", 64, 64);
    for y in (0..64).step_by(4) {
        for x in (0..64).step_by(4) {
            location = location.with_object("keg", x, y);
        }
    }
    location
}

fn bench_discovery(c: &mut Criterion) {
    let chain = farm_chain();
    let rules = RuleSet::new();

    let dense = dense_location();
    c.bench_function("scan_dense_64x64", |b| {
        b.iter(|| {
            let groups = discover(&dense, &chain, &rules).unwrap();
            assert_eq!(groups.len(), 1);
        })
    });

    let sparse = sparse_location();
    c.bench_function("scan_sparse_64x64", |b| {
        b.iter(|| {
            let groups = discover(&sparse, &chain, &rules).unwrap();
            assert_eq!(groups.len(), 256);
        })
    });
}

criterion_group!(benches, bench_discovery);
criterion_main!(benches);
