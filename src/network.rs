//! SocialNetwork: owner of every person and post.
//!
//! People and posts are stored in generational arenas; a [`HashTable`] maps
//! each unique name to its [`PersonId`]. All relation edits go through the
//! network so both ends of every edge change together, and deleting a person
//! severs all of their edges before the person is released.

use crate::entity::{Person, PersonId, Post, PostId};
use crate::error::{Error, Result};
use crate::hash_table::HashTable;
use crate::set::Set;
use slotmap::SlotMap;
use tracing::debug;

pub struct SocialNetwork {
    people: SlotMap<PersonId, Person>,
    posts: SlotMap<PostId, Post>,
    names: HashTable<String, PersonId>,
}

impl Default for SocialNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialNetwork {
    pub fn new() -> Self {
        Self {
            people: SlotMap::with_key(),
            posts: SlotMap::with_key(),
            names: HashTable::new(),
        }
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Every registered person, in arena order.
    pub fn people(&self) -> impl Iterator<Item = (PersonId, &Person)> + '_ {
        self.people.iter()
    }

    /// Every live post, in arena order.
    pub fn posts(&self) -> impl Iterator<Item = (PostId, &Post)> + '_ {
        self.posts.iter()
    }

    pub fn person(&self, id: PersonId) -> Result<&Person> {
        self.people
            .get(id)
            .ok_or_else(|| Error::NotFound("person is not in the network".to_string()))
    }

    pub fn post(&self, id: PostId) -> Result<&Post> {
        self.posts
            .get(id)
            .ok_or_else(|| Error::NotFound("post is not in the network".to_string()))
    }

    pub(crate) fn person_mut(&mut self, id: PersonId) -> Result<&mut Person> {
        self.people
            .get_mut(id)
            .ok_or_else(|| Error::NotFound("person is not in the network".to_string()))
    }

    fn post_mut(&mut self, id: PostId) -> Result<&mut Post> {
        self.posts
            .get_mut(id)
            .ok_or_else(|| Error::NotFound("post is not in the network".to_string()))
    }

    /// Register a new person with empty relations.
    pub fn add_person(&mut self, name: impl Into<String>) -> Result<PersonId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "name cannot be blank or whitespace".to_string(),
            ));
        }
        if self.names.contains(name.as_str()) {
            return Err(Error::AlreadyExists(format!("person named {name:?}")));
        }
        let id = self.people.insert(Person::new(name.clone()));
        self.names.set(name, id);
        debug!(person = self.people[id].name(), "person added");
        Ok(id)
    }

    pub fn find_person(&self, name: &str) -> Result<PersonId> {
        self.names
            .get(name)
            .copied()
            .map_err(|_| Error::NotFound(format!("person named {name:?}")))
    }

    /// Remove a person and every edge touching them: follows in both
    /// directions, their likes, and every post they authored (with those
    /// posts' likes).
    pub fn delete_person(&mut self, id: PersonId) -> Result<()> {
        let person = self
            .people
            .remove(id)
            .ok_or_else(|| Error::NotFound("person is not in the network".to_string()))?;
        let removed = self.names.delete(person.name.as_str());
        debug_assert!(removed.is_ok(), "name index out of sync");

        for follower in person.followers() {
            if let Some(p) = self.people.get_mut(follower) {
                let _ = p.following.remove(&id);
            }
        }
        for followee in person.following() {
            if let Some(p) = self.people.get_mut(followee) {
                let _ = p.followers.remove(&id);
            }
        }
        for post in person.liked_posts() {
            if let Some(p) = self.posts.get_mut(post) {
                let _ = p.liked_by.remove(&id);
            }
        }
        for post in person.posts() {
            self.discard_post(post);
        }

        debug!(
            person = person.name(),
            followers = person.follower_count(),
            following = person.following_count(),
            liked_posts = person.liked_post_count(),
            posts = person.post_count(),
            "person deleted"
        );
        Ok(())
    }

    /// `follower` starts following `followee`.
    pub fn follow(&mut self, follower: PersonId, followee: PersonId) -> Result<()> {
        if follower == followee {
            return Err(Error::InvalidArgument("a person cannot follow themselves".to_string()));
        }
        self.person(followee)?;
        let p = self.person_mut(follower)?;
        if !p.following.add(followee) {
            return Err(Error::AlreadyExists(format!("{} already follows them", p.name)));
        }
        let added = self.person_mut(followee)?.followers.add(follower);
        debug_assert!(added, "follow edge half-present");
        Ok(())
    }

    pub fn unfollow(&mut self, follower: PersonId, followee: PersonId) -> Result<()> {
        self.person(followee)?;
        let p = self.person_mut(follower)?;
        p.following
            .remove(&followee)
            .map_err(|_| Error::NotFound(format!("{} does not follow them", p.name)))?;
        let removed = self.person_mut(followee)?.followers.remove(&follower);
        debug_assert!(removed.is_ok(), "follow edge half-present");
        Ok(())
    }

    /// Publish a post. `clickbait_factor` scales the chance that a viewer
    /// likes it and must be finite and non-negative.
    pub fn make_post(
        &mut self,
        poster: PersonId,
        text: impl Into<String>,
        clickbait_factor: f64,
    ) -> Result<PostId> {
        if !(clickbait_factor.is_finite() && clickbait_factor >= 0.0) {
            return Err(Error::InvalidArgument(format!(
                "clickbait factor must be finite and >= 0, got {clickbait_factor}"
            )));
        }
        let person = self
            .people
            .get_mut(poster)
            .ok_or_else(|| Error::NotFound("person is not in the network".to_string()))?;
        let seq = person.next_post_id;
        person.next_post_id += 1;
        let posts = &mut self.posts;
        let post = posts.insert_with_key(|key| Post {
            poster,
            id: seq,
            text: text.into(),
            clickbait_factor,
            liked_by: Set::new(),
            link: person.posts.push_front(key),
        });
        Ok(post)
    }

    /// Remove a single post, severing all of its likes.
    pub fn delete_post(&mut self, post: PostId) -> Result<()> {
        let poster = self.post(post)?.poster;
        let link = self.posts[post].link;
        if let Some(p) = self.people.get_mut(poster) {
            p.posts.remove(link);
        }
        self.discard_post(post);
        Ok(())
    }

    pub fn like_post(&mut self, person: PersonId, post: PostId) -> Result<()> {
        self.post(post)?;
        let p = self.person_mut(person)?;
        if !p.liked_posts.add_first(post) {
            return Err(Error::AlreadyExists(format!("{} already likes the post", p.name)));
        }
        let added = self.post_mut(post)?.liked_by.add(person);
        debug_assert!(added, "like edge half-present");
        Ok(())
    }

    pub fn unlike_post(&mut self, person: PersonId, post: PostId) -> Result<()> {
        self.post(post)?;
        let p = self.person_mut(person)?;
        p.liked_posts
            .remove(&post)
            .map_err(|_| Error::NotFound(format!("{} does not like the post", p.name)))?;
        let removed = self.post_mut(post)?.liked_by.remove(&person);
        debug_assert!(removed.is_ok(), "like edge half-present");
        Ok(())
    }

    /// Drop a post from the arena and from every liker. The caller has
    /// already detached it from its poster's chain (or is dropping the poster).
    fn discard_post(&mut self, id: PostId) {
        let Some(post) = self.posts.remove(id) else {
            return;
        };
        for liker in post.liked_by() {
            if let Some(p) = self.people.get_mut(liker) {
                let _ = p.liked_posts.remove(&id);
            }
        }
    }
}
