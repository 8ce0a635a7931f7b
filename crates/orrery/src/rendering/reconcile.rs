//! Keyed reconciliation of drawable primitives.
//!
//! Each tick the new data set is matched against the existing items by key.
//! Matched items are updated in place and keep their identity, new keys enter
//! with a fade-in and missing keys fade out before they are dropped.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Entering,
    Present,
    Exiting,
}

#[derive(Debug, Clone)]
pub struct Keyed<V> {
    /// Stable identity assigned on first entry
    pub id: u64,
    pub value: V,
    pub opacity: f64,
    pub presence: Presence,
}

impl<V> Keyed<V> {
    pub fn is_live(&self) -> bool {
        self.presence != Presence::Exiting
    }
}

/// Keys touched by one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta<K> {
    pub entered: Vec<K>,
    pub updated: Vec<K>,
    pub exited: Vec<K>,
}

impl<K> Default for Delta<K> {
    fn default() -> Self {
        Self {
            entered: Vec::new(),
            updated: Vec::new(),
            exited: Vec::new(),
        }
    }
}

impl<K> Delta<K> {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct KeyedLayer<K, V> {
    items: Vec<(K, Keyed<V>)>,
    next_id: u64,
    fade: Duration,
}

impl<K: Eq + Hash + Clone, V> KeyedLayer<K, V> {
    pub fn new(fade: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            fade,
        }
    }

    /// Match `data` against the current items.
    ///
    /// Live items follow the data order; exiting items are kept after them.
    /// A key that returns while still fading out re-enters with its old id.
    pub fn reconcile(&mut self, data: impl IntoIterator<Item = (K, V)>) -> Delta<K> {
        let mut delta = Delta::default();
        let previous_order: Vec<K> = self.items.iter().map(|(k, _)| k.clone()).collect();
        let mut previous: HashMap<K, Keyed<V>> = self.items.drain(..).collect();

        let mut next = Vec::new();
        for (key, value) in data {
            match previous.remove(&key) {
                Some(mut existing) => {
                    existing.value = value;
                    if existing.presence == Presence::Exiting {
                        existing.presence = Presence::Entering;
                        delta.entered.push(key.clone());
                    } else {
                        delta.updated.push(key.clone());
                    }
                    next.push((key, existing));
                }
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    delta.entered.push(key.clone());
                    next.push((
                        key,
                        Keyed {
                            id,
                            value,
                            opacity: if self.fade.is_zero() { 1.0 } else { 0.0 },
                            presence: if self.fade.is_zero() {
                                Presence::Present
                            } else {
                                Presence::Entering
                            },
                        },
                    ));
                }
            }
        }

        for key in previous_order {
            if let Some(mut leftover) = previous.remove(&key) {
                if leftover.presence != Presence::Exiting {
                    delta.exited.push(key.clone());
                    leftover.presence = Presence::Exiting;
                }
                if !self.fade.is_zero() {
                    next.push((key, leftover));
                }
            }
        }

        self.items = next;
        delta
    }

    /// Step fades by `dt`; fully faded exits are dropped.
    /// Returns whether any fade is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let step = if self.fade.is_zero() {
            1.0
        } else {
            dt.as_secs_f64() / self.fade.as_secs_f64()
        };
        for (_, item) in self.items.iter_mut() {
            match item.presence {
                Presence::Entering => {
                    item.opacity = (item.opacity + step).min(1.0);
                    if item.opacity >= 1.0 {
                        item.presence = Presence::Present;
                    }
                }
                Presence::Exiting => item.opacity = (item.opacity - step).max(0.0),
                Presence::Present => {}
            }
        }
        self.items
            .retain(|(_, item)| !(item.presence == Presence::Exiting && item.opacity <= 0.0));
        self.is_fading()
    }

    pub fn is_fading(&self) -> bool {
        self.items
            .iter()
            .any(|(_, item)| item.presence != Presence::Present)
    }

    pub fn get(&self, key: &K) -> Option<&Keyed<V>> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, item)| item)
    }

    /// All items in draw order, including ones fading out
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &Keyed<V>)> {
        self.items.iter().map(|(k, item)| (k, item))
    }

    /// Items that are not fading out
    pub fn live(&self) -> impl DoubleEndedIterator<Item = (&K, &Keyed<V>)> {
        self.iter().filter(|(_, item)| item.is_live())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
