//! People, posts and the handles that name them.
//!
//! Entities live in arenas owned by [`SocialNetwork`](crate::SocialNetwork)
//! and refer to each other only through [`PersonId`]/[`PostId`] handles.
//! Handles are generational: once a person or post is deleted its handle
//! never resolves again, even if the arena slot is reused.
//!
//! Every relation is stored on both ends (`following`/`followers`,
//! `liked_posts`/`liked_by`); only the network mutates them, and it always
//! updates both ends together.

use crate::chain::{ChainList, Link};
use crate::ordered_set::OrderedSet;
use crate::reachability::Reach;
use crate::set::Set;
use slotmap::new_key_type;

new_key_type! {
    pub struct PersonId;
    pub struct PostId;
}

const SHORT_TEXT_LEN: usize = 30;

#[derive(Debug)]
pub struct Person {
    pub(crate) name: String,
    /// Most recent first.
    pub(crate) posts: ChainList<PostId>,
    pub(crate) followers: Set<PersonId>,
    pub(crate) following: Set<PersonId>,
    /// Most recently liked first.
    pub(crate) liked_posts: OrderedSet<PostId>,
    pub(crate) next_post_id: u64,
    pub(crate) reach: Option<Reach>,
}

impl Person {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            posts: ChainList::new(),
            followers: Set::new(),
            following: Set::new(),
            liked_posts: OrderedSet::new(),
            next_post_id: 1,
            reach: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Posts authored by this person, most recent first.
    pub fn posts(&self) -> impl ExactSizeIterator<Item = PostId> + '_ {
        self.posts.iter().copied()
    }

    pub fn followers(&self) -> impl ExactSizeIterator<Item = PersonId> + '_ {
        self.followers.iter().copied()
    }

    pub fn following(&self) -> impl ExactSizeIterator<Item = PersonId> + '_ {
        self.following.iter().copied()
    }

    /// Liked posts, most recently liked first.
    pub fn liked_posts(&self) -> impl ExactSizeIterator<Item = PostId> + '_ {
        self.liked_posts.iter().copied()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn follower_count(&self) -> usize {
        self.followers.len()
    }

    pub fn following_count(&self) -> usize {
        self.following.len()
    }

    pub fn liked_post_count(&self) -> usize {
        self.liked_posts.len()
    }

    pub fn is_following(&self, person: PersonId) -> bool {
        self.following.contains(&person)
    }

    pub fn is_followed_by(&self, person: PersonId) -> bool {
        self.followers.contains(&person)
    }

    pub fn likes_post(&self, post: PostId) -> bool {
        self.liked_posts.contains(&post)
    }

    /// Precomputed maxima, if reachability has been computed for this person.
    pub fn reach(&self) -> Option<Reach> {
        self.reach
    }
}

#[derive(Debug)]
pub struct Post {
    pub(crate) poster: PersonId,
    pub(crate) id: u64,
    pub(crate) text: String,
    pub(crate) clickbait_factor: f64,
    pub(crate) liked_by: Set<PersonId>,
    /// Node of this post in its poster's post chain.
    pub(crate) link: Link,
}

impl Post {
    pub fn poster(&self) -> PersonId {
        self.poster
    }

    /// Sequence number, unique among the poster's posts and assigned in
    /// creation order starting at 1.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Texts longer than 30 characters are cut to 27 followed by `...`.
    pub fn short_text(&self) -> String {
        if self.text.chars().count() > SHORT_TEXT_LEN {
            let mut short: String = self.text.chars().take(SHORT_TEXT_LEN - 3).collect();
            short.push_str("...");
            short
        } else {
            self.text.clone()
        }
    }

    pub fn clickbait_factor(&self) -> f64 {
        self.clickbait_factor
    }

    pub fn liked_by(&self) -> impl ExactSizeIterator<Item = PersonId> + '_ {
        self.liked_by.iter().copied()
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, person: PersonId) -> bool {
        self.liked_by.contains(&person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn post_with_text(text: &str) -> Post {
        let mut people: SlotMap<PersonId, ()> = SlotMap::with_key();
        let mut chain = ChainList::new();
        let mut posts: SlotMap<PostId, ()> = SlotMap::with_key();
        Post {
            poster: people.insert(()),
            id: 1,
            text: text.to_string(),
            clickbait_factor: 1.0,
            liked_by: Set::new(),
            link: chain.push_back(posts.insert(())),
        }
    }

    #[test]
    fn short_text_abbreviates_long_posts() {
        assert_eq!(post_with_text("short").short_text(), "short");
        let exact = "a".repeat(30);
        assert_eq!(post_with_text(&exact).short_text(), exact);
        let long = "b".repeat(31);
        assert_eq!(post_with_text(&long).short_text(), format!("{}...", "b".repeat(27)));
    }

    #[test]
    fn short_text_counts_characters_not_bytes() {
        let text = "é".repeat(31);
        let short = post_with_text(&text).short_text();
        assert_eq!(short.chars().count(), 30);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn new_person_has_no_relations() {
        let p = Person::new("alice".to_string());
        assert_eq!(p.name(), "alice");
        assert_eq!(p.post_count(), 0);
        assert_eq!(p.follower_count(), 0);
        assert_eq!(p.following_count(), 0);
        assert_eq!(p.liked_post_count(), 0);
        assert_eq!(p.reach(), None);
    }
}
