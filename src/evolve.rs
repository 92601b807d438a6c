//! One timestep of network evolution.
//!
//! Every person looks at the posts their followees authored or liked. Each
//! such post is considered at most once per person per timestep: a like
//! draw (chance scaled by the post's clickbait factor) and, only if that
//! draw succeeds, a follow draw for its poster. The like draw happens even
//! for posts the person already likes, so a follow through an old like
//! stays possible but is no likelier than through a new one.
//!
//! Decisions are collected during the scan and applied afterwards, so no
//! person observes another person's change from the same timestep and the
//! outcome does not depend on the order people are visited in.

use crate::entity::{PersonId, PostId};
use crate::error::{Error, Result};
use crate::network::SocialNetwork;
use hashbrown::HashSet;
use rand::Rng;
use tracing::trace;

/// Edges created by one call to [`evolve`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Interactions {
    pub new_likes: usize,
    pub new_follows: usize,
}

impl Interactions {
    pub fn is_empty(&self) -> bool {
        self.new_likes == 0 && self.new_follows == 0
    }
}

pub(crate) fn check_chance(what: &str, chance: f64) -> Result<()> {
    if (0.0..=1.0).contains(&chance) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "{what} chance must be within [0, 1], got {chance}"
        )))
    }
}

#[inline]
fn roll<R: Rng + ?Sized>(rng: &mut R, threshold: f64) -> bool {
    rng.gen::<f64>() < threshold
}

/// Advance `network` by one timestep.
///
/// Fails with `InvalidArgument`, leaving the network untouched, if either
/// chance lies outside `[0, 1]`. Never removes an edge.
pub fn evolve<R: Rng + ?Sized>(
    network: &mut SocialNetwork,
    like_chance: f64,
    follow_chance: f64,
    rng: &mut R,
) -> Result<Interactions> {
    check_chance("like", like_chance)?;
    check_chance("follow", follow_chance)?;

    let mut likes: Vec<(PersonId, PostId)> = Vec::new();
    let mut follows: Vec<(PersonId, PersonId)> = Vec::new();
    let mut seen: HashSet<PostId> = HashSet::new();
    let mut scanned = 0usize;

    for (id, person) in network.people() {
        seen.clear();
        for followee in person.following() {
            let followee = network.person(followee)?;
            for post_id in followee.posts().chain(followee.liked_posts()) {
                if !seen.insert(post_id) {
                    continue;
                }
                let post = network.post(post_id)?;
                if post.poster() == id || post.clickbait_factor() <= 0.0 {
                    continue;
                }
                scanned += 1;
                if !roll(rng, like_chance * post.clickbait_factor()) {
                    continue;
                }
                if !person.likes_post(post_id) {
                    likes.push((id, post_id));
                }
                if roll(rng, follow_chance) {
                    follows.push((id, post.poster()));
                }
            }
        }
    }

    let mut out = Interactions::default();
    for (person, post) in likes {
        match network.like_post(person, post) {
            Ok(()) => out.new_likes += 1,
            Err(Error::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }
    }
    for (follower, followee) in follows {
        match network.follow(follower, followee) {
            Ok(()) => out.new_follows += 1,
            Err(Error::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }
    }
    trace!(
        scanned,
        new_likes = out.new_likes,
        new_follows = out.new_follows,
        "timestep evolved"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn chances_outside_unit_interval_are_rejected() {
        let mut net = SocialNetwork::new();
        for (like, follow) in [(-0.1, 0.5), (0.5, 1.5), (f64::NAN, 0.0), (0.0, f64::NAN)] {
            let got = evolve(&mut net, like, follow, &mut rng());
            assert!(matches!(got, Err(Error::InvalidArgument(_))), "{like} {follow}");
        }
    }

    #[test]
    fn zero_chances_change_nothing() {
        let mut net = SocialNetwork::new();
        let a = net.add_person("a").unwrap();
        let b = net.add_person("b").unwrap();
        net.follow(a, b).unwrap();
        net.make_post(b, "hello", 1.0).unwrap();
        let got = evolve(&mut net, 0.0, 0.0, &mut rng()).unwrap();
        assert!(got.is_empty());
        assert_eq!(net.person(a).unwrap().liked_post_count(), 0);
    }

    #[test]
    fn post_seen_twice_is_liked_once() {
        // a follows b and c; c likes b's post, so a reaches it along two paths.
        let mut net = SocialNetwork::new();
        let a = net.add_person("a").unwrap();
        let b = net.add_person("b").unwrap();
        let c = net.add_person("c").unwrap();
        net.follow(a, b).unwrap();
        net.follow(a, c).unwrap();
        let post = net.make_post(b, "hi", 1.0).unwrap();
        net.like_post(c, post).unwrap();
        let got = evolve(&mut net, 1.0, 0.0, &mut rng()).unwrap();
        assert_eq!(got, Interactions { new_likes: 1, new_follows: 0 });
        assert_eq!(net.post(post).unwrap().like_count(), 2);
    }

    #[test]
    fn own_posts_liked_by_followees_are_ignored() {
        let mut net = SocialNetwork::new();
        let a = net.add_person("a").unwrap();
        let b = net.add_person("b").unwrap();
        net.follow(a, b).unwrap();
        let mine = net.make_post(a, "mine", 1.0).unwrap();
        net.like_post(b, mine).unwrap();
        let got = evolve(&mut net, 1.0, 1.0, &mut rng()).unwrap();
        assert!(got.is_empty());
        assert!(!net.person(a).unwrap().likes_post(mine));
    }

    #[test]
    fn changes_are_not_visible_within_the_same_timestep() {
        // a -> b -> c; c posts. b likes it this step, a can only see it next step.
        let mut net = SocialNetwork::new();
        let a = net.add_person("a").unwrap();
        let b = net.add_person("b").unwrap();
        let c = net.add_person("c").unwrap();
        net.follow(a, b).unwrap();
        net.follow(b, c).unwrap();
        let post = net.make_post(c, "chain", 1.0).unwrap();

        let first = evolve(&mut net, 1.0, 1.0, &mut rng()).unwrap();
        assert_eq!(first, Interactions { new_likes: 1, new_follows: 0 });
        assert!(!net.person(a).unwrap().likes_post(post));

        let second = evolve(&mut net, 1.0, 1.0, &mut rng()).unwrap();
        assert_eq!(second, Interactions { new_likes: 1, new_follows: 1 });
        assert!(net.person(a).unwrap().is_following(c));
    }

    #[test]
    fn follows_need_a_successful_like_draw() {
        let mut net = SocialNetwork::new();
        let a = net.add_person("a").unwrap();
        let b = net.add_person("b").unwrap();
        let c = net.add_person("c").unwrap();
        net.follow(a, b).unwrap();
        let post = net.make_post(c, "old news", 1.0).unwrap();
        net.like_post(b, post).unwrap();
        net.like_post(a, post).unwrap();

        let got = evolve(&mut net, 0.0, 1.0, &mut rng()).unwrap();
        assert!(got.is_empty());
        assert!(!net.person(a).unwrap().is_following(c));

        // The like draw succeeds again for the held like; only the follow is new.
        let got = evolve(&mut net, 1.0, 1.0, &mut rng()).unwrap();
        assert_eq!(got, Interactions { new_likes: 0, new_follows: 1 });
        assert!(net.person(a).unwrap().is_following(c));
    }
}
