//! Seeded simulation runner.
//!
//! A [`Simulation`] owns a network and a deterministic random source. On
//! construction it precomputes every person's reachable maxima; afterwards
//! [`Simulation::run`] steps the network until it is saturated or a step
//! bound is hit. The same network and config always produce the same run.

use crate::error::{Error, Result};
use crate::evolve::{check_chance, evolve, Interactions};
use crate::network::SocialNetwork;
use crate::reachability::{completion, is_saturated, precompute_reachability, Completion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

/// Configuration for a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Base chance that a person likes a post they see, scaled by the post's
    /// clickbait factor.
    pub like_chance: f64,

    /// Chance that a person follows the poster of a post they like.
    pub follow_chance: f64,

    /// Random seed for deterministic runs.
    pub seed: u64,

    /// Upper bound on timesteps for [`Simulation::run`]. `None` runs until
    /// saturation.
    pub max_steps: Option<usize>,
}

impl SimulationConfig {
    pub fn new(like_chance: f64, follow_chance: f64) -> Self {
        Self {
            like_chance,
            follow_chance,
            seed: 12345,
            max_steps: None,
        }
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Bound the number of timesteps a run may take.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_chance("like", self.like_chance)?;
        check_chance("follow", self.follow_chance)
    }
}

/// Outcome of a single timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimestepReport {
    /// 1-based.
    pub timestep: usize,
    pub interactions: Interactions,
    pub saturated: bool,
}

/// Outcome of [`Simulation::run`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub total_likes: usize,
    pub total_follows: usize,
    pub saturated: bool,
    pub completion: Completion,
}

pub struct Simulation {
    network: SocialNetwork,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    timestep: usize,
}

impl Simulation {
    /// Validate `config` and precompute reachability for `network`.
    pub fn new(mut network: SocialNetwork, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        if config.like_chance == 0.0 || config.follow_chance == 0.0 {
            warn!(
                like_chance = config.like_chance,
                follow_chance = config.follow_chance,
                "simulation configured with a zero chance"
            );
        }
        precompute_reachability(&mut network)?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            network,
            config,
            timestep: 0,
        })
    }

    pub fn network(&self) -> &SocialNetwork {
        &self.network
    }

    pub fn into_network(self) -> SocialNetwork {
        self.network
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Timesteps taken so far.
    pub fn timestep(&self) -> usize {
        self.timestep
    }

    pub fn is_saturated(&self) -> bool {
        is_saturated(&self.network)
    }

    pub fn step(&mut self) -> Result<TimestepReport> {
        let interactions = evolve(
            &mut self.network,
            self.config.like_chance,
            self.config.follow_chance,
            &mut self.rng,
        )?;
        self.timestep += 1;
        let saturated = self.is_saturated();
        info!(
            timestep = self.timestep,
            new_likes = interactions.new_likes,
            new_follows = interactions.new_follows,
            saturated,
            "timestep complete"
        );
        Ok(TimestepReport {
            timestep: self.timestep,
            interactions,
            saturated,
        })
    }

    /// Step until saturated or `max_steps` timesteps have run in this call.
    ///
    /// Without a step bound, fails with `InvalidArgument` when saturation
    /// depends on a chance configured as zero.
    pub fn run(&mut self) -> Result<RunSummary> {
        if self.config.max_steps.is_none() {
            self.check_can_saturate()?;
        }
        let mut summary = RunSummary {
            steps: 0,
            total_likes: 0,
            total_follows: 0,
            saturated: self.is_saturated(),
            completion: completion(&self.network),
        };
        while !summary.saturated && self.config.max_steps.map_or(true, |max| summary.steps < max) {
            let report = self.step()?;
            summary.steps += 1;
            summary.total_likes += report.interactions.new_likes;
            summary.total_follows += report.interactions.new_follows;
            summary.saturated = report.saturated;
        }
        summary.completion = completion(&self.network);
        if summary.saturated {
            info!(
                steps = summary.steps,
                total_likes = summary.total_likes,
                total_follows = summary.total_follows,
                "network saturated"
            );
        }
        Ok(summary)
    }

    fn check_can_saturate(&self) -> Result<()> {
        let (mut needs_likes, mut needs_follows) = (false, false);
        for (_, p) in self.network.people() {
            if let Some(r) = p.reach() {
                needs_likes |= p.liked_post_count() < r.max_liked_posts;
                needs_follows |= p.following_count() < r.max_following;
            }
        }
        let like_blocked = needs_likes && self.config.like_chance == 0.0;
        // Every follow draw waits on a successful like draw.
        let follow_blocked = needs_follows
            && (self.config.follow_chance == 0.0 || self.config.like_chance == 0.0);
        if like_blocked || follow_blocked {
            return Err(Error::InvalidArgument(
                "run would never saturate with a zero chance; set max_steps".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> SocialNetwork {
        let mut net = SocialNetwork::new();
        let a = net.add_person("a").unwrap();
        let b = net.add_person("b").unwrap();
        let c = net.add_person("c").unwrap();
        net.follow(a, b).unwrap();
        net.follow(b, c).unwrap();
        net.make_post(c, "root", 1.0).unwrap();
        net.make_post(b, "middle", 1.0).unwrap();
        net
    }

    #[test]
    fn config_builder_sets_fields() {
        let cfg = SimulationConfig::new(0.5, 0.25).with_seed(9).with_max_steps(4);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.max_steps, Some(4));
        assert_eq!(SimulationConfig::new(0.5, 0.5).seed, 12345);
        assert!(cfg.validate().is_ok());
        assert!(matches!(
            SimulationConfig::new(1.5, 0.0).validate(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn certain_chances_saturate_a_chain() {
        let mut sim = Simulation::new(chain(), SimulationConfig::new(1.0, 1.0)).unwrap();
        assert!(!sim.is_saturated());
        let summary = sim.run().unwrap();
        assert!(summary.saturated);
        assert_eq!(summary.steps, 2);
        assert_eq!(summary.total_likes, 3);
        assert_eq!(summary.total_follows, 1);
        assert_eq!(summary.completion, Completion { likes: 1.0, follows: 1.0 });
        assert_eq!(sim.timestep(), 2);
    }

    #[test]
    fn step_bound_stops_early() {
        let cfg = SimulationConfig::new(1.0, 1.0).with_max_steps(1);
        let mut sim = Simulation::new(chain(), cfg).unwrap();
        let summary = sim.run().unwrap();
        assert_eq!(summary.steps, 1);
        assert!(!summary.saturated);
        assert!(summary.completion.likes < 1.0);
    }

    #[test]
    fn zero_chance_without_bound_is_rejected() {
        let mut sim = Simulation::new(chain(), SimulationConfig::new(0.0, 1.0)).unwrap();
        assert!(matches!(sim.run(), Err(Error::InvalidArgument(_))));
        assert_eq!(sim.timestep(), 0);
    }

    #[test]
    fn zero_chance_is_fine_when_nothing_is_needed() {
        let mut net = SocialNetwork::new();
        net.add_person("alone").unwrap();
        let mut sim = Simulation::new(net, SimulationConfig::new(0.0, 0.0)).unwrap();
        let summary = sim.run().unwrap();
        assert!(summary.saturated);
        assert_eq!(summary.steps, 0);
    }
}
