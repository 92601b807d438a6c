//! Reachability oracle: how far can evolution take each person?
//!
//! Evolution only ever adds likes and follows, and every addition it makes
//! stays possible once it becomes possible. A person `p` sees a post when
//! someone `p` follows authored or likes it, the post is likable (positive
//! clickbait factor) and `p` did not author it. Every post `p` sees is
//! eventually liked by `p`, and its poster eventually followed. Running those
//! two rules to a fixed point gives the state every run ends in, whatever
//! the draws.
//!
//! The fixed point is global: whether `p` ends up seeing its own liked posts
//! through someone who follows `p` back depends on that person's final
//! state, so no walk from `p` alone can decide it. A worklist recomputes a
//! person only when someone they follow (or they themselves) gained an edge.

use crate::entity::{PersonId, PostId};
use crate::error::Result;
use crate::network::SocialNetwork;
use hashbrown::HashSet;
use slotmap::SecondaryMap;
use tracing::debug;

/// Most likes and follows a person can reach through evolution.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Reach {
    pub max_liked_posts: usize,
    pub max_following: usize,
}

/// Fraction of achievable likes and follows already realised across the
/// network. Both are 1.0 when nothing is achievable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Completion {
    pub likes: f64,
    pub follows: f64,
}

/// Final like and follow sets for every person, seeded from the network's
/// current relations.
struct Closure {
    liked: SecondaryMap<PersonId, HashSet<PostId>>,
    following: SecondaryMap<PersonId, HashSet<PersonId>>,
    followers: SecondaryMap<PersonId, HashSet<PersonId>>,
}

impl Closure {
    fn seed(network: &SocialNetwork) -> Self {
        let mut closure = Closure {
            liked: SecondaryMap::new(),
            following: SecondaryMap::new(),
            followers: SecondaryMap::new(),
        };
        for (id, p) in network.people() {
            closure.liked.insert(id, p.liked_posts().collect());
            closure.following.insert(id, p.following().collect());
            closure.followers.insert(id, p.followers().collect());
        }
        closure
    }

    /// Everything `id` sees but does not yet hold.
    fn pending(
        &self,
        network: &SocialNetwork,
        id: PersonId,
    ) -> Result<(HashSet<PostId>, HashSet<PersonId>)> {
        let (mut likes, mut follows) = (HashSet::new(), HashSet::new());
        let (Some(liked), Some(following)) = (self.liked.get(id), self.following.get(id)) else {
            return Ok((likes, follows));
        };
        for &followee in following {
            let authored = network.person(followee)?.posts();
            let followee_likes = self.liked.get(followee).into_iter().flatten().copied();
            for post_id in authored.chain(followee_likes) {
                let post = network.post(post_id)?;
                if post.poster() == id || post.clickbait_factor() <= 0.0 {
                    continue;
                }
                if !liked.contains(&post_id) {
                    likes.insert(post_id);
                }
                if !following.contains(&post.poster()) {
                    follows.insert(post.poster());
                }
            }
        }
        Ok((likes, follows))
    }

    fn run(&mut self, network: &SocialNetwork) -> Result<()> {
        let mut queued: HashSet<PersonId> = network.people().map(|(id, _)| id).collect();
        let mut work: Vec<PersonId> = queued.iter().copied().collect();
        while let Some(id) = work.pop() {
            queued.remove(&id);
            let (likes, follows) = self.pending(network, id)?;
            if likes.is_empty() && follows.is_empty() {
                continue;
            }
            if let Some(liked) = self.liked.get_mut(id) {
                liked.extend(likes);
            }
            for followee in follows {
                if let Some(set) = self.following.get_mut(id) {
                    set.insert(followee);
                }
                if let Some(set) = self.followers.get_mut(followee) {
                    set.insert(id);
                }
            }
            // `id` has new followees to scan, and its followers see its new likes.
            let watchers = self.followers.get(id).into_iter().flatten().copied();
            for next in core::iter::once(id).chain(watchers) {
                if queued.insert(next) {
                    work.push(next);
                }
            }
        }
        Ok(())
    }

    fn reach(&self, id: PersonId) -> Reach {
        Reach {
            max_liked_posts: self.liked.get(id).map_or(0, HashSet::len),
            max_following: self.following.get(id).map_or(0, HashSet::len),
        }
    }
}

fn closure_of(network: &SocialNetwork) -> Result<Closure> {
    let mut closure = Closure::seed(network);
    closure.run(network)?;
    Ok(closure)
}

/// Maxima for one person, computed from the network's current state. Solves
/// the whole network; use [`precompute_reachability`] for everyone at once.
pub fn reach_of(network: &SocialNetwork, origin: PersonId) -> Result<Reach> {
    network.person(origin)?;
    Ok(closure_of(network)?.reach(origin))
}

/// Compute and store [`Reach`] for every person. Call once before a run;
/// structural edits made afterwards (new people, posts or manual follows)
/// are not reflected until this is called again.
pub fn precompute_reachability(network: &mut SocialNetwork) -> Result<()> {
    let closure = closure_of(network)?;
    let ids: Vec<PersonId> = network.people().map(|(id, _)| id).collect();
    let (mut likes, mut follows) = (0, 0);
    for id in ids {
        let reach = closure.reach(id);
        likes += reach.max_liked_posts;
        follows += reach.max_following;
        network.person_mut(id)?.reach = Some(reach);
    }
    debug!(
        people = network.person_count(),
        max_likes = likes,
        max_follows = follows,
        "reachability precomputed"
    );
    Ok(())
}

/// True when every person holds exactly their precomputed maxima. A person
/// without precomputed maxima is never saturated.
pub fn is_saturated(network: &SocialNetwork) -> bool {
    network.people().all(|(_, p)| match p.reach() {
        Some(r) => {
            p.liked_post_count() == r.max_liked_posts && p.following_count() == r.max_following
        }
        None => false,
    })
}

/// People without precomputed maxima are skipped.
pub fn completion(network: &SocialNetwork) -> Completion {
    let (mut likes, mut follows, mut max_likes, mut max_follows) = (0, 0, 0, 0);
    for (_, p) in network.people() {
        if let Some(r) = p.reach() {
            likes += p.liked_post_count();
            follows += p.following_count();
            max_likes += r.max_liked_posts;
            max_follows += r.max_following;
        }
    }
    let ratio = |done: usize, max: usize| {
        if max == 0 {
            1.0
        } else {
            done as f64 / max as f64
        }
    };
    Completion {
        likes: ratio(likes, max_likes),
        follows: ratio(follows, max_follows),
    }
}
