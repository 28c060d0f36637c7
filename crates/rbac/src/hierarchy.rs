//! Hierarchy resolution over the role document
//!
//! Parent links are looked up by name at traversal time. A parent name that
//! does not resolve to a role is a dead end, and every traversal keeps a
//! visited set so cyclic graphs terminate.

use crate::document::Document;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Does `role`, directly or through any ancestor, hold `permission`?
pub fn grants<'a>(doc: &'a Document, role: &'a str, permission: &str) -> bool {
    let mut visited: HashSet<&'a str> = HashSet::new();
    let mut queue: VecDeque<&'a str> = VecDeque::from([role]);

    while let Some(name) = queue.pop_front() {
        if !visited.insert(name) {
            continue;
        }
        let Some(current) = doc.roles.get(name) else {
            continue;
        };
        if current.has_permission(permission) {
            return true;
        }
        queue.extend(
            current
                .parents
                .iter()
                .map(String::as_str)
                .filter(|p| !visited.contains(p)),
        );
    }

    false
}

/// Roles reachable from `role` in breadth-first order, starting with `role`.
///
/// Missing roles are skipped, so an unknown `role` yields an empty chain.
pub fn inheritance_chain(doc: &Document, role: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([role]);

    while let Some(name) = queue.pop_front() {
        if !visited.insert(name) {
            continue;
        }
        if let Some((key, current)) = doc.roles.get_key_value(name) {
            chain.push(key.clone());
            queue.extend(current.parents.iter().map(String::as_str));
        }
    }

    chain
}

/// Every permission `role` holds directly or by inheritance.
pub fn effective_permissions(doc: &Document, role: &str) -> BTreeSet<String> {
    inheritance_chain(doc, role)
        .iter()
        .filter_map(|name| doc.roles.get(name))
        .flat_map(|r| r.permissions.iter().cloned())
        .collect()
}

/// A parent reference that names no role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingParent {
    pub role: String,
    pub parent: String,
}

pub fn dangling_parents(doc: &Document) -> Vec<DanglingParent> {
    let roles = &doc.roles;
    roles
        .iter()
        .flat_map(move |(name, role)| {
            role.parents
                .iter()
                .filter(move |p| !roles.contains_key(p.as_str()))
                .map(move |p| DanglingParent {
                    role: name.clone(),
                    parent: p.clone(),
                })
        })
        .collect()
}

/// Cycles reachable through parent links, each reported once as a role-name
/// path rotated to start at its smallest name.
pub fn find_cycles(doc: &Document) -> Vec<Vec<String>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Active,
        Done,
    }

    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut cycles = Vec::new();

    for (start, start_role) in &doc.roles {
        if marks.contains_key(start.as_str()) {
            continue;
        }

        let mut path: Vec<&str> = vec![start.as_str()];
        let mut stack = vec![start_role.parents.iter()];
        marks.insert(start.as_str(), Mark::Active);

        while let Some(parents) = stack.last_mut() {
            let Some(parent) = parents.next() else {
                stack.pop();
                if let Some(done) = path.pop() {
                    marks.insert(done, Mark::Done);
                }
                continue;
            };

            match marks.get(parent.as_str()) {
                Some(Mark::Active) => {
                    let from = path.iter().position(|n| *n == parent.as_str()).unwrap_or(0);
                    let cycle = rotate_to_smallest(&path[from..]);
                    if seen.insert(cycle.clone()) {
                        cycles.push(cycle);
                    }
                }
                Some(Mark::Done) => {}
                None => {
                    if let Some(role) = doc.roles.get(parent.as_str()) {
                        marks.insert(parent.as_str(), Mark::Active);
                        path.push(parent.as_str());
                        stack.push(role.parents.iter());
                    }
                }
            }
        }
    }

    cycles
}

fn rotate_to_smallest(cycle: &[&str]) -> Vec<String> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, name)| **name)
        .map(|(i, _)| i)
        .unwrap_or(0);

    cycle[start..]
        .iter()
        .chain(cycle[..start].iter())
        .map(|s| s.to_string())
        .collect()
}

/// Structural findings about a role graph. None of them is fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub cycles: Vec<Vec<String>>,
    pub dangling_parents: Vec<DanglingParent>,
}

impl Diagnostics {
    pub fn of(doc: &Document) -> Self {
        Self {
            cycles: find_cycles(doc),
            dangling_parents: dangling_parents(doc),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty() && self.dangling_parents.is_empty()
    }
}
