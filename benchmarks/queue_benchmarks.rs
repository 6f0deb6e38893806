use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;
use namedq::{MessageQueue, QueueRegistry};

/// Benchmark: Single-threaded enqueue then drain
fn bench_enqueue_dequeue_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("enqueue_dequeue_single_thread");

    for batch in [1_000u64, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*batch));
        group.bench_with_input(BenchmarkId::from_parameter(batch), batch, |b, &batch| {
            let queue = MessageQueue::new("bench");

            b.iter(|| {
                for _ in 0..batch {
                    queue.enqueue(black_box("payload"));
                }
                while let Some(value) = queue.dequeue() {
                    black_box(value);
                }
            });
        });
    }
    group.finish();
}

/// Benchmark: Registry lookup of an existing queue
fn bench_resolve_existing(c: &mut Criterion) {
    let registry = QueueRegistry::new();
    for i in 0..1_000 {
        registry.resolve_queue(&format!("queue-{}", i));
    }

    c.bench_function("resolve_existing_queue", |b| {
        b.iter(|| black_box(registry.resolve_queue(black_box("queue-500"))));
    });
}

/// Benchmark: Concurrent producers through the registry
fn bench_concurrent_producers(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("concurrent_producers");

    for num_producers in [2u64, 4, 8, 16].iter() {
        group.throughput(Throughput::Elements(*num_producers * 1000));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_producers),
            num_producers,
            |b, &num_producers| {
                b.iter(|| {
                    rt.block_on(async {
                        let registry = Arc::new(QueueRegistry::new());

                        let mut handles = vec![];
                        for _ in 0..num_producers {
                            let registry = registry.clone();
                            handles.push(tokio::spawn(async move {
                                let queue = registry.resolve_queue("bench");
                                for _ in 0..1000 {
                                    queue.enqueue(black_box("payload"));
                                }
                            }));
                        }

                        for handle in handles {
                            handle.await.unwrap();
                        }
                    });
                });
            },
        );
    }
    group.finish();
}

/// Benchmark: Producer-Consumer with a waiting consumer
fn bench_producer_consumer(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("producer_consumer");
    group.sample_size(50);

    group.bench_function("1_producer_1_waiting_consumer", |b| {
        b.iter(|| {
            rt.block_on(async {
                let queue = Arc::new(MessageQueue::new("bench"));

                let consumer = {
                    let queue = queue.clone();
                    tokio::spawn(async move {
                        let mut count = 0;
                        while count < 10_000 {
                            if let Ok(Some(value)) = queue.dequeue_with_timeout(1).await {
                                black_box(value);
                                count += 1;
                            }
                        }
                    })
                };

                let producer = {
                    let queue = queue.clone();
                    tokio::spawn(async move {
                        for _ in 0..10_000 {
                            queue.enqueue("payload");
                        }
                    })
                };

                producer.await.unwrap();
                consumer.await.unwrap();
            });
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_enqueue_dequeue_single_thread,
    bench_resolve_existing,
    bench_concurrent_producers,
    bench_producer_consumer,
);

criterion_main!(benches);
