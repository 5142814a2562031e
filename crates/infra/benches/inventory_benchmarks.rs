use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use stockyard_core::{ProductId, WarehouseId};
use stockyard_infra::{InMemoryInventoryStore, InventoryConfig, InventoryService};
use stockyard_inventory::{AllocationRequest, WithdrawalRequest};

fn setup(capacity: i64) -> InventoryService<InMemoryInventoryStore> {
    let config = InventoryConfig::with_default_capacity(capacity).unwrap();
    InventoryService::new(Arc::new(InMemoryInventoryStore::new()), &config).unwrap()
}

fn bench_allocation_spread(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation_spread");

    // Warehouses touched per request = quantity / capacity.
    for warehouses in [1i64, 10, 100].iter() {
        group.throughput(Throughput::Elements(*warehouses as u64));
        group.bench_with_input(
            BenchmarkId::new("fresh_pool", warehouses),
            warehouses,
            |b, &warehouses| {
                b.iter_with_setup(
                    || setup(10),
                    |service| {
                        service
                            .allocate(&[AllocationRequest::new(
                                ProductId::new(1),
                                black_box(warehouses * 10),
                                WarehouseId::new(1),
                            )])
                            .unwrap();
                    },
                );
            },
        );
    }

    group.finish();
}

fn bench_fifo_withdrawal(c: &mut Criterion) {
    let mut group = c.benchmark_group("fifo_withdrawal");

    for entries in [10u64, 100, 500].iter() {
        group.throughput(Throughput::Elements(*entries));
        group.bench_with_input(BenchmarkId::new("drain_entries", entries), entries, |b, &entries| {
            b.iter_with_setup(
                || {
                    let service = setup(1_000);
                    let requests: Vec<AllocationRequest> = (0..entries)
                        .map(|i| AllocationRequest::new(ProductId::new(1), 5, WarehouseId::new(i % 20 + 1)))
                        .collect();
                    service.allocate(&requests).unwrap();
                    service
                },
                |service| {
                    service
                        .withdraw(&[WithdrawalRequest::new(ProductId::new(1), black_box(entries as i64 * 5))])
                        .unwrap();
                },
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_allocation_spread, bench_fifo_withdrawal);
criterion_main!(benches);
