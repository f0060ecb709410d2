//! Named per-event outputs and the producer seam.

use std::collections::BTreeMap;

/// Ordered `(key, value)` writes produced for one event.
///
/// Writes are kept in order so the caller can merge them into its own event
/// record. A key written twice resolves to its last value, which is how
/// diagnostics of a species shared by several rules end up holding the last
/// rule's values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventVariables {
    writes: Vec<(String, f64)>,
}

impl EventVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.writes.push((key.into(), value));
    }

    /// Last value written under `key`.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.writes
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|&(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.writes.iter().any(|(k, _)| k == key)
    }

    /// Number of writes, counting repeated keys.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.writes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Appends all of `other`'s writes after this one's.
    pub fn merge(&mut self, other: EventVariables) {
        self.writes.extend(other.writes);
    }

    pub fn into_writes(self) -> Vec<(String, f64)> {
        self.writes
    }

    /// Collapses the writes into a map, last write winning.
    pub fn into_map(self) -> BTreeMap<String, f64> {
        self.writes.into_iter().collect()
    }
}

impl IntoIterator for EventVariables {
    type Item = (String, f64);
    type IntoIter = std::vec::IntoIter<(String, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

/// Something that derives named event-level variables from an event.
///
/// `E` is whatever the producer reads from the event. Implementations only
/// append to the [`EventVariables`] they are handed; storing the payload is
/// the caller's business.
pub trait EventVariableProducer<E>: Send + Sync {
    /// Name of this producer, for logs.
    fn name(&self) -> &str;

    /// Appends this producer's variables for `event`.
    fn add_variables(&self, event: &E, variables: &mut EventVariables);

    /// Runs the producer on a fresh payload.
    fn produce(&self, event: &E) -> EventVariables {
        let mut variables = EventVariables::new();
        self.add_variables(event, &mut variables);
        variables
    }
}
