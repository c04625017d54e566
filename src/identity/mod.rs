//! Synthetic employee identity.
//!
//! The source sheets carry no stable employee key, so one is derived from
//! `(department, name)`. Two employees sharing both values inside one file
//! are distinct people as far as the sheet can tell, so collisions get a
//! numeric suffix instead of being merged.
use std::collections::{HashMap, HashSet};

/// One assigned identity, flagged when a suffix was needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedId {
    pub id: String,
    pub collided: bool,
}

/// Allocates identities within one parse invocation.
///
/// The base id is `<department>_<name>` with whitespace runs collapsed to
/// single underscores. The first holder keeps the bare id; later holders
/// get `_2`, `_3` and so on in first-seen row order. Every assigned id is
/// recorded, so a suffixed id never coincides with the natural id of a
/// name that happens to end in the same digits.
#[derive(Debug, Default)]
pub struct IdentityResolver {
    counters: HashMap<String, u32>,
    taken: HashSet<String>,
}

impl IdentityResolver {
    pub fn assign(&mut self, department: &str, name: &str) -> AssignedId {
        let base = format!("{}_{}", slug(department), slug(name));
        let mut n = self.counters.get(&base).copied().unwrap_or(0) + 1;
        let id = loop {
            let candidate = if n == 1 { base.clone() } else { format!("{base}_{n}") };
            if !self.taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        let collided = n > 1;
        self.counters.insert(base, n);
        self.taken.insert(id.clone());
        AssignedId { id, collided }
    }
}

fn slug(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("_")
}
