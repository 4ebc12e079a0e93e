use std::collections::HashMap;

use crate::entry::Entry;

/// A set of entries that compete for one selection slot.
#[derive(Debug, Clone)]
pub struct Group {
    /// Shared base name or parent identifier.
    pub key: String,
    /// Candidates in input order. Order matters: the tie-break rule keeps
    /// the last candidate reaching the running maximum.
    pub candidates: Vec<Entry>,
}

/// How entries are partitioned into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingStrategy {
    /// Adjacent entries sharing a base name form a group. Input must be
    /// sorted by raw name.
    SequentialPrefix,
    /// Declared parent/clone links from the catalog source form the
    /// groups; parentless non-BIOS entries become singletons.
    ExplicitLink,
}

/// Partition entries into groups, preserving input order across groups and
/// within each group's candidate list.
pub fn group_entries(entries: Vec<Entry>, strategy: GroupingStrategy) -> Vec<Group> {
    match strategy {
        GroupingStrategy::SequentialPrefix => group_sequential(entries),
        GroupingStrategy::ExplicitLink => group_by_parent(entries),
    }
}

/// Single pass over name-sorted entries: a new group starts whenever the
/// base name differs from the previous entry's.
fn group_sequential(entries: Vec<Entry>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut current: Option<Group> = None;

    for entry in entries {
        match current.as_mut() {
            Some(group) if group.key == entry.base_name => {
                group.candidates.push(entry);
            }
            _ => {
                if let Some(done) = current.take() {
                    groups.push(done);
                }
                current = Some(Group {
                    key: entry.base_name.clone(),
                    candidates: vec![entry],
                });
            }
        }
    }

    if let Some(done) = current.take() {
        groups.push(done);
    }

    groups
}

/// Bucket entries by their declared parent key. Group order follows the
/// first appearance of each key; a parentless BIOS entry forms no group
/// of its own.
fn group_by_parent(entries: Vec<Entry>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = match entry.parent_key.clone() {
            Some(parent) => parent,
            None if entry.bios => {
                log::debug!("not grouping parentless BIOS entry {:?}", entry.raw_name);
                continue;
            }
            None => entry.raw_name.clone(),
        };

        match index_by_key.get(&key) {
            Some(&i) => groups[i].candidates.push(entry),
            None => {
                index_by_key.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    candidates: vec![entry],
                });
            }
        }
    }

    groups
}
