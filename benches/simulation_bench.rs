use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use socialsim::{evolve, precompute_reachability, PersonId, Simulation, SimulationConfig, SocialNetwork};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

/// `people` people, each following `fanout` pseudo-random others and
/// authoring two posts.
fn network(people: usize, fanout: usize) -> SocialNetwork {
    let mut net = SocialNetwork::new();
    let ids: Vec<PersonId> = (0..people)
        .map(|i| net.add_person(format!("p{i}")).unwrap())
        .collect();
    let mut r = lcg(5);
    for (i, &id) in ids.iter().enumerate() {
        for _ in 0..fanout {
            let j = (r.next().unwrap() >> 33) as usize % people;
            if j != i {
                let _ = net.follow(id, ids[j]);
            }
        }
        net.make_post(id, "first", 1.0).unwrap();
        net.make_post(id, "second", 0.5).unwrap();
    }
    net
}

fn bench_precompute(c: &mut Criterion) {
    c.bench_function("precompute_reachability_500", |b| {
        b.iter_batched(
            || network(500, 3),
            |mut net| {
                precompute_reachability(&mut net).unwrap();
                black_box(net)
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_single_step(c: &mut Criterion) {
    c.bench_function("evolve_step_1k", |b| {
        b.iter_batched(
            || (network(1_000, 4), ChaCha8Rng::seed_from_u64(1)),
            |(mut net, mut rng)| black_box(evolve(&mut net, 0.3, 0.3, &mut rng).unwrap()),
            BatchSize::LargeInput,
        )
    });
}

fn bench_run_to_saturation(c: &mut Criterion) {
    c.bench_function("run_to_saturation_200", |b| {
        b.iter_batched(
            || network(200, 2),
            |net| {
                let mut sim = Simulation::new(net, SimulationConfig::new(0.5, 0.5)).unwrap();
                black_box(sim.run().unwrap())
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_precompute, bench_single_step, bench_run_to_saturation
}
criterion_main!(benches);
