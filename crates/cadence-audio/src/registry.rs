use std::collections::HashMap;

use tracing::warn;

use crate::config::Channel;
use crate::error::AudioError;

/// Named clips for one channel, kept in registration order.
#[derive(Debug, Clone)]
struct ClipList<C> {
    entries: Vec<(String, C)>,
    /// Name to index of its first registration.
    index: HashMap<String, usize>,
}

impl<C> Default for ClipList<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// Clip lookup by exact name, scoped to a channel.
#[derive(Debug, Clone)]
pub struct ClipRegistry<C> {
    music: ClipList<C>,
    sfx: ClipList<C>,
}

impl<C> Default for ClipRegistry<C> {
    fn default() -> Self {
        Self {
            music: ClipList::default(),
            sfx: ClipList::default(),
        }
    }
}

impl<C> ClipRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from ordered `(name, clip)` lists.
    pub fn from_lists<S: Into<String>>(
        music: impl IntoIterator<Item = (S, C)>,
        sfx: impl IntoIterator<Item = (S, C)>,
    ) -> Self {
        let mut registry = Self::new();
        for (name, clip) in music {
            registry.register(Channel::Music, name, clip);
        }
        for (name, clip) in sfx {
            registry.register(Channel::Sfx, name, clip);
        }
        registry
    }

    fn list(&self, channel: Channel) -> &ClipList<C> {
        match channel {
            Channel::Music => &self.music,
            Channel::Sfx => &self.sfx,
        }
    }

    /// Add a clip. A name already registered on this channel keeps its first clip.
    pub fn register(&mut self, channel: Channel, name: impl Into<String>, clip: C) {
        let name = name.into();
        let list = match channel {
            Channel::Music => &mut self.music,
            Channel::Sfx => &mut self.sfx,
        };

        let position = list.entries.len();
        if list.index.contains_key(&name) {
            warn!("Duplicate {} clip '{}', keeping the first one", channel, name);
        } else {
            list.index.insert(name.clone(), position);
        }
        list.entries.push((name, clip));
    }

    pub fn find(&self, channel: Channel, name: &str) -> Result<&C, AudioError> {
        let list = self.list(channel);
        list.index
            .get(name)
            .map(|&i| &list.entries[i].1)
            .ok_or_else(|| AudioError::clip_not_found(channel, name))
    }

    pub fn contains(&self, channel: Channel, name: &str) -> bool {
        self.list(channel).index.contains_key(name)
    }

    /// Registered names in registration order, duplicates included.
    pub fn names(&self, channel: Channel) -> impl Iterator<Item = &str> {
        self.list(channel).entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self, channel: Channel) -> usize {
        self.list(channel).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.music.entries.is_empty() && self.sfx.entries.is_empty()
    }
}
