//! Popularity rankings.
//!
//! Both rankings are stable: entries with equal counts keep the network's
//! arena order.

use crate::entity::{Person, PersonId, Post, PostId};
use crate::network::SocialNetwork;
use core::cmp::Reverse;

/// People ordered by follower count, most followed first.
pub fn people_by_popularity(network: &SocialNetwork) -> Vec<(PersonId, &Person)> {
    let mut people: Vec<_> = network.people().collect();
    people.sort_by_key(|(_, p)| Reverse(p.follower_count()));
    people
}

/// Posts ordered by like count, most liked first.
pub fn posts_by_popularity(network: &SocialNetwork) -> Vec<(PostId, &Post)> {
    let mut posts: Vec<_> = network.posts().collect();
    posts.sort_by_key(|(_, p)| Reverse(p.like_count()));
    posts
}
