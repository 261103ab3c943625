use divan::{bench, black_box_drop, AllocProfiler, Bencher};
use itertools::iproduct;
use std::time::Duration;
use taskhive::pool::Builder;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

const WORKERS: &[usize] = &[1, 4, 8, 16];
const NUM_SHORT_TASKS: &[usize] = &[1, 100, 10_000];
const NUM_LONG_TASKS: &[usize] = &[1, 10, 100];

#[bench(args = iproduct!(WORKERS, NUM_SHORT_TASKS))]
fn bench_batch_short_task(bencher: Bencher, (num_workers, num_tasks): (&usize, &usize)) {
    let pool = Builder::new()
        .num_workers(*num_workers)
        .num_tasks(*num_tasks)
        .task_cost(Duration::ZERO)
        .idle_timeout(Duration::from_secs(1))
        .build();
    bencher.bench_local(|| pool.run().map(black_box_drop))
}

#[bench(args = iproduct!(WORKERS, NUM_LONG_TASKS))]
fn bench_batch_long_task(bencher: Bencher, (num_workers, num_tasks): (&usize, &usize)) {
    let pool = Builder::new()
        .num_workers(*num_workers)
        .num_tasks(*num_tasks)
        .task_cost(Duration::from_millis(1))
        .idle_timeout(Duration::from_secs(1))
        .build();
    bencher.bench_local(|| pool.run().map(black_box_drop))
}

fn main() {
    divan::main();
}
