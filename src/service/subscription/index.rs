//! In-memory index of which channels follow which community.

use std::collections::{BTreeMap, HashMap};

use crate::model::subscription::{community_key, Destination};

/// Result of recording a post slug on a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostMark {
    /// The slug was newly recorded.
    Marked,
    /// The destination already had the slug.
    AlreadyPosted,
    /// The destination is no longer in the index.
    NotCached,
}

/// Lower-cased community name -> channel ID -> destination.
///
/// All lookups lower-case the community name first. Destinations of a community are
/// kept ordered by channel ID so snapshots are deterministic.
#[derive(Debug, Default)]
pub struct SubscriptionIndex {
    communities: HashMap<String, BTreeMap<u64, Destination>>,
}

impl SubscriptionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self, community_name: &str, channel_id: u64) -> bool {
        self.get(community_name, channel_id).is_some()
    }

    /// Inserts a destination or replaces the role of an existing one.
    ///
    /// An existing destination keeps its `already_posted` history.
    pub fn add(&mut self, community_name: &str, channel_id: u64, role_id: Option<u64>) {
        self.communities
            .entry(community_key(community_name))
            .or_default()
            .entry(channel_id)
            .and_modify(|destination| destination.role_id = role_id)
            .or_insert_with(|| Destination::new(channel_id, role_id));
    }

    /// Removes a destination, returning whether one was present.
    pub fn remove(&mut self, channel_id: u64, community_name: &str) -> bool {
        let key = community_key(community_name);
        let Some(destinations) = self.communities.get_mut(&key) else {
            return false;
        };

        let removed = destinations.remove(&channel_id).is_some();
        if destinations.is_empty() {
            self.communities.remove(&key);
        }

        removed
    }

    pub fn get(&self, community_name: &str, channel_id: u64) -> Option<&Destination> {
        self.communities
            .get(&community_key(community_name))
            .and_then(|destinations| destinations.get(&channel_id))
    }

    /// Point-in-time copy of every destination following a community.
    pub fn snapshot(&self, community_name: &str) -> Vec<Destination> {
        self.communities
            .get(&community_key(community_name))
            .map(|destinations| destinations.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Records a post slug as sent to a destination.
    pub fn mark_posted(
        &mut self,
        community_name: &str,
        channel_id: u64,
        post_slug: &str,
    ) -> PostMark {
        let Some(destination) = self
            .communities
            .get_mut(&community_key(community_name))
            .and_then(|destinations| destinations.get_mut(&channel_id))
        else {
            return PostMark::NotCached;
        };

        if destination.has_posted(post_slug) {
            return PostMark::AlreadyPosted;
        }

        destination.already_posted.push(post_slug.to_string());
        PostMark::Marked
    }

    /// Sets or clears the mention role of a destination, returning whether it exists.
    pub fn set_role(
        &mut self,
        community_name: &str,
        channel_id: u64,
        role_id: Option<u64>,
    ) -> bool {
        match self
            .communities
            .get_mut(&community_key(community_name))
            .and_then(|destinations| destinations.get_mut(&channel_id))
        {
            Some(destination) => {
                destination.role_id = role_id;
                true
            }
            None => false,
        }
    }

    /// Sorted names of every community a channel follows.
    pub fn communities_for(&self, channel_id: u64) -> Vec<String> {
        let mut names: Vec<String> = self
            .communities
            .iter()
            .filter(|(_, destinations)| destinations.contains_key(&channel_id))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Every (community, destination) pair in the index.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Destination)> + '_ {
        self.communities.iter().flat_map(|(name, destinations)| {
            destinations
                .values()
                .map(move |destination| (name.as_str(), destination))
        })
    }

    /// Total number of destinations.
    pub fn len(&self) -> usize {
        self.communities.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    pub fn clear(&mut self) {
        self.communities.clear();
    }
}
