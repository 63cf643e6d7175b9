// Dependency Tracking
//
// Import edges between source files, used to decide which definitions a
// file can see and which files to re-discover after a change.

use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct FileDependencyGraph {
    /// Forward dependencies: file -> files it imports.
    forward: HashMap<String, HashSet<String>>,
    /// Reverse dependencies: file -> files that import it.
    reverse: HashMap<String, HashSet<String>>,
}

impl FileDependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, file: &str) -> bool {
        self.forward.contains_key(file)
    }

    /// Replace the outgoing edges of `file`.
    pub fn set_dependencies<I, S>(&mut self, file: &str, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_edges_from(file);
        let targets: HashSet<String> = dependencies.into_iter().map(Into::into).collect();
        for target in &targets {
            self.reverse
                .entry(target.clone())
                .or_default()
                .insert(file.to_string());
        }
        self.forward.insert(file.to_string(), targets);
    }

    /// Drop the file and its outgoing edges. Edges pointing at it stay, so
    /// importers are still found when it comes back.
    pub fn remove_file(&mut self, file: &str) {
        self.remove_edges_from(file);
        self.forward.remove(file);
    }

    fn remove_edges_from(&mut self, file: &str) {
        let Some(previous) = self.forward.get(file) else {
            return;
        };
        for target in previous {
            if let Some(importers) = self.reverse.get_mut(target) {
                importers.remove(file);
                if importers.is_empty() {
                    self.reverse.remove(target);
                }
            }
        }
    }

    pub fn get_dependents(&self, file: &str) -> HashSet<String> {
        self.reverse.get(file).cloned().unwrap_or_default()
    }

    /// Files reachable from `file` within `max_depth` hops, `file` excluded.
    /// `None` means no limit.
    pub fn reachable_from(&self, file: &str, max_depth: Option<usize>) -> HashSet<String> {
        let mut visited = HashSet::new();
        visited.insert(file.to_string());
        let mut queue = VecDeque::from([(file.to_string(), 0usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            if max_depth.map_or(false, |max| depth >= max) {
                continue;
            }
            let Some(deps) = self.forward.get(&current) else {
                continue;
            };
            for dep in deps {
                if visited.insert(dep.clone()) {
                    queue.push_back((dep.clone(), depth + 1));
                }
            }
        }

        visited.remove(file);
        visited
    }

    /// Get transitive dependents (all files that import this file, recursively).
    pub fn get_transitive_dependents(&self, file: &str) -> HashSet<String> {
        let mut visited = HashSet::new();
        let mut queue = vec![file.to_string()];

        while let Some(current) = queue.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(deps) = self.reverse.get(&current) {
                queue.extend(deps.iter().filter(|dep| !visited.contains(*dep)).cloned());
            }
        }

        visited.remove(file);
        visited
    }
}
