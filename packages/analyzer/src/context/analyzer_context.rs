//! Long-lived analysis state for a program.
//!
//! Owns the schema store and keeps the Discovered part of it in sync with
//! the files handed in by the host. Updates are incremental: a file is
//! re-discovered only when its content hash changes or a file its discovery
//! depended on changes.

use super::cancellation::CancellationToken;
use super::dependency_graph::FileDependencyGraph;
use super::discovery::{ComponentDefinition, ComponentDiscovery};
use crate::config::AnalyzerConfig;
use crate::schema::{builtin_collection, user_collection, HtmlDataCollection, HtmlStore, SourceKind};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use ts::{Program, SourceFile};
use xxhash_rust::xxh3::xxh3_64;

const BUILTIN_ORIGIN: &str = "builtin";
const USER_ORIGIN: &str = "config";

#[derive(Debug)]
struct FileState {
    content_hash: u64,
    definitions: Vec<ComponentDefinition>,
}

/// Result of one update pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Completed {
        /// Files that were (re-)discovered, in processing order.
        updated: Vec<String>,
    },
    /// The token fired. `deferred` files stay pending and are processed first
    /// on the next pass.
    Cancelled {
        updated: Vec<String>,
        deferred: Vec<String>,
    },
}

impl UpdateOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UpdateOutcome::Cancelled { .. })
    }
}

#[derive(Debug)]
pub struct AnalyzerContext {
    config: AnalyzerConfig,
    store: HtmlStore,
    files: HashMap<String, FileState>,
    imports: FileDependencyGraph,
    /// Edges from a file to the files its discovery result depends on.
    discovery_dependencies: FileDependencyGraph,
    pending: IndexSet<String>,
}

impl AnalyzerContext {
    pub fn new(config: AnalyzerConfig) -> Self {
        let mut store = HtmlStore::new();
        store.absorb(SourceKind::Builtin, BUILTIN_ORIGIN, builtin_collection());
        store.absorb(SourceKind::User, USER_ORIGIN, user_collection(&config));
        AnalyzerContext {
            config,
            store,
            files: HashMap::new(),
            imports: FileDependencyGraph::new(),
            discovery_dependencies: FileDependencyGraph::new(),
            pending: IndexSet::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn store(&self) -> &HtmlStore {
        &self.store
    }

    /// Swap the configuration. Only the User layer depends on it.
    pub fn set_config(&mut self, config: AnalyzerConfig) {
        self.store.forget_origin(SourceKind::User);
        self.store
            .absorb(SourceKind::User, USER_ORIGIN, user_collection(&config));
        self.config = config;
    }

    /// Add data from a library, e.g. a bundled custom-elements manifest.
    pub fn absorb_library(&mut self, origin: &str, collection: HtmlDataCollection) {
        self.store.absorb(SourceKind::Library, origin, collection);
    }

    pub fn definitions_in(&self, file_name: &str) -> &[ComponentDefinition] {
        self.files
            .get(file_name)
            .map(|state| state.definitions.as_slice())
            .unwrap_or_default()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.files.values().flat_map(|state| state.definitions.iter())
    }

    pub fn pending_files(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// Files `file_name` can see through imports, honoring
    /// `maxProjectImportDepth`. `None` when the file was never analyzed.
    pub fn imported_files(&self, file_name: &str) -> Option<HashSet<String>> {
        if !self.imports.contains(file_name) {
            return None;
        }
        Some(
            self.imports
                .reachable_from(file_name, self.config.max_project_import_depth),
        )
    }

    /// Queue changed files and run discovery until the queue is empty or the
    /// token fires. Unchanged files are skipped.
    pub fn update_files(
        &mut self,
        changed: &[&SourceFile],
        program: &dyn Program,
        discovery: &dyn ComponentDiscovery,
        token: &CancellationToken,
    ) -> UpdateOutcome {
        for file in changed {
            let hash = xxh3_64(file.text.as_bytes());
            let unchanged = self
                .files
                .get(&file.file_name)
                .map_or(false, |state| state.content_hash == hash);
            if unchanged {
                tracing::trace!(file = %file.file_name, "content unchanged, skipping");
                continue;
            }
            self.pending.insert(file.file_name.clone());
            for dependent in self
                .discovery_dependencies
                .get_transitive_dependents(&file.file_name)
            {
                self.pending.insert(dependent);
            }
        }

        let token = match self.config.discovery_timeout_ms {
            Some(ms) => token.limited_to(Duration::from_millis(ms)),
            None => token.clone(),
        };

        let mut updated = Vec::new();
        while let Some(file_name) = self.pending.first().cloned() {
            if token.is_cancelled() {
                let deferred: Vec<String> = self.pending.iter().cloned().collect();
                tracing::debug!(deferred = deferred.len(), "discovery cancelled");
                return UpdateOutcome::Cancelled { updated, deferred };
            }
            self.discover_file(&file_name, program, discovery);
            self.pending.shift_remove(&file_name);
            updated.push(file_name);
        }
        UpdateOutcome::Completed { updated }
    }

    fn discover_file(&mut self, file_name: &str, program: &dyn Program, discovery: &dyn ComponentDiscovery) {
        let Some(file) = program.get_source_file(file_name) else {
            tracing::debug!(file = file_name, "file left the program");
            self.remove_file(file_name);
            return;
        };

        self.imports.set_dependencies(file_name, file.imports.iter().cloned());
        let content_hash = xxh3_64(file.text.as_bytes());

        let result = match discovery.discover(file, program) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(file = file_name, error = %err, "component discovery failed");
                self.store.forget(SourceKind::Discovered, file_name);
                self.discovery_dependencies.remove_file(file_name);
                self.files.insert(
                    file_name.to_string(),
                    FileState {
                        content_hash,
                        definitions: Vec::new(),
                    },
                );
                return;
            }
        };

        tracing::debug!(
            file = file_name,
            definitions = result.definitions.len(),
            "discovered components"
        );
        self.discovery_dependencies
            .set_dependencies(file_name, result.dependencies.iter().cloned());
        let definitions = result.definitions.clone();
        let collection = result.into_collection();
        if collection.is_empty() {
            self.store.forget(SourceKind::Discovered, file_name);
        } else {
            self.store.absorb(SourceKind::Discovered, file_name, collection);
        }
        self.files.insert(
            file_name.to_string(),
            FileState {
                content_hash,
                definitions,
            },
        );
    }

    /// Forget everything learned from a file.
    pub fn remove_file(&mut self, file_name: &str) {
        self.store.forget(SourceKind::Discovered, file_name);
        self.files.remove(file_name);
        self.imports.remove_file(file_name);
        self.discovery_dependencies.remove_file(file_name);
        self.pending.shift_remove(file_name);
    }
}
