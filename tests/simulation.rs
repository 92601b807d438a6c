use socialsim::{
    completion, is_saturated, precompute_reachability, reach_of, Error, PersonId, Simulation,
    SimulationConfig, SocialNetwork,
};

fn ring(n: usize) -> SocialNetwork {
    let mut net = SocialNetwork::new();
    let ids: Vec<PersonId> = (0..n).map(|i| net.add_person(format!("r{i}")).unwrap()).collect();
    for i in 0..n {
        net.follow(ids[i], ids[(i + 1) % n]).unwrap();
        net.make_post(ids[i], format!("hello from r{i}"), 1.0).unwrap();
    }
    net
}

#[test]
fn isolated_person_is_saturated_after_precompute() {
    let mut net = SocialNetwork::new();
    net.add_person("hermit").unwrap();
    precompute_reachability(&mut net).unwrap();
    assert!(is_saturated(&net));
}

#[test]
fn ring_maxima_cover_everyone_else() {
    let mut net = ring(5);
    precompute_reachability(&mut net).unwrap();
    for (id, p) in net.people() {
        let reach = p.reach().unwrap();
        assert_eq!(reach.max_liked_posts, 4);
        assert_eq!(reach.max_following, 4);
        assert_eq!(reach_of(&net, id).unwrap(), reach);
    }
    assert!(!is_saturated(&net));
}

#[test]
fn certain_run_reaches_the_precomputed_maxima() {
    let mut sim = Simulation::new(ring(5), SimulationConfig::new(1.0, 1.0)).unwrap();
    let summary = sim.run().unwrap();
    assert!(summary.saturated);
    assert_eq!(summary.total_likes, 5 * 4);
    assert_eq!(summary.total_follows, 5 * 3);
    let net = sim.into_network();
    for (_, p) in net.people() {
        assert_eq!(p.liked_post_count(), 4);
        assert_eq!(p.following_count(), 4);
    }
}

#[test]
fn random_run_saturates_and_is_reproducible() {
    let config = SimulationConfig::new(0.3, 0.4).with_seed(2024).with_max_steps(10_000);
    let run = || {
        let mut sim = Simulation::new(ring(6), config.clone()).unwrap();
        let summary = sim.run().unwrap();
        (summary, sim.network().people().map(|(_, p)| p.liked_post_count()).collect::<Vec<_>>())
    };
    let (summary, likes) = run();
    assert!(summary.saturated);
    assert_eq!(summary.completion.likes, 1.0);
    assert_eq!(summary.completion.follows, 1.0);
    assert_eq!(run(), (summary, likes));
}

#[test]
fn step_reports_count_timesteps() {
    let mut sim = Simulation::new(ring(3), SimulationConfig::new(1.0, 1.0)).unwrap();
    let first = sim.step().unwrap();
    let second = sim.step().unwrap();
    assert_eq!(first.timestep, 1);
    assert_eq!(second.timestep, 2);
    assert_eq!(sim.timestep(), 2);
    assert!(completion(sim.network()).likes > 0.0);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let err = Simulation::new(ring(3), SimulationConfig::new(0.5, 2.0)).err();
    assert!(matches!(err, Some(Error::InvalidArgument(_))));
}

#[test]
fn unbounded_run_that_needs_a_zero_chance_fails() {
    let mut sim = Simulation::new(ring(3), SimulationConfig::new(1.0, 0.0)).unwrap();
    assert!(matches!(sim.run(), Err(Error::InvalidArgument(_))));

    let bounded = SimulationConfig::new(1.0, 0.0).with_max_steps(3);
    let mut sim = Simulation::new(ring(3), bounded).unwrap();
    let summary = sim.run().unwrap();
    assert!(!summary.saturated);
    assert_eq!(summary.steps, 3);
    assert_eq!(summary.total_follows, 0);
}

#[test]
fn likes_returning_through_a_mutual_follow_still_saturate() {
    let mut net = SocialNetwork::new();
    let a = net.add_person("a").unwrap();
    let x = net.add_person("x").unwrap();
    let q = net.add_person("q").unwrap();
    net.follow(a, x).unwrap();
    net.follow(x, a).unwrap();
    let q1 = net.make_post(q, "q1", 1.0).unwrap();
    net.make_post(q, "q2", 1.0).unwrap();
    net.like_post(a, q1).unwrap();

    let mut sim = Simulation::new(net, SimulationConfig::new(1.0, 1.0)).unwrap();
    let summary = sim.run().unwrap();
    assert!(summary.saturated);
    let a = sim.network().person(a).unwrap();
    assert_eq!(a.liked_post_count(), 2);
    assert_eq!(a.following_count(), 2);
    assert!(a.is_following(q));
}
