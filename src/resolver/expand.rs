//! Placeholder expansion on an explicit work stack.
//!
//! Each value under expansion is a `Frame`. When a frame meets a reference
//! to a key that is not memoized yet it parks, and a frame for that key is
//! pushed on top. Once the dependency finishes its entry lands in the cache
//! and the parked frame picks up where it left off. Native stack depth stays
//! constant however long the reference chain is.

use std::mem;

use hashbrown::{HashMap, HashSet};
use smallvec::{smallvec, SmallVec};

use crate::config::ResolverConfig;
use crate::expression::{parse_with, Expression, Segment};
use crate::graph::DependencyGraph;
use crate::model::{KeyId, ResolvedEntry};
use crate::store::PropertyStore;

/// Memoized entries. `None` means "resolved to nothing".
pub(crate) type Cache = HashMap<KeyId, Option<ResolvedEntry>>;

/// Borrowed view of everything expansion reads.
pub(crate) struct Expander<'r, S: ?Sized> {
    pub store: &'r S,
    pub graph: &'r DependencyGraph,
    pub config: &'r ResolverConfig,
}

/// One value being expanded.
struct Frame {
    /// `None` for ad hoc text that is not a store value.
    key: Option<KeyId>,
    raw: String,
    expr: Expression,
    /// Position in `expr`. Every index but the last selects a reference
    /// whose default is being expanded.
    cursor: SmallVec<[usize; 4]>,
    output: String,
    cost: u64,
}

enum Step {
    Finished(Option<ResolvedEntry>),
    /// Needs this key memoized before it can continue.
    Blocked(KeyId),
}

enum Lookup {
    Resolved(ResolvedEntry),
    Unresolved,
    Pending(KeyId),
}

impl<S: PropertyStore + ?Sized> Expander<'_, S> {
    /// Resolve `root`, memoizing it and every key it pulls in.
    pub fn resolve(&self, cache: &mut Cache, root: KeyId) -> Option<ResolvedEntry> {
        let frame = self.frame_for(root);
        self.run(cache, frame)
    }

    /// Expand free-standing text. The text itself is not memoized.
    pub fn expand_text(&self, cache: &mut Cache, text: &str) -> Option<ResolvedEntry> {
        let frame = Frame::new(None, text.to_string(), self.config);
        self.run(cache, frame)
    }

    fn frame_for(&self, id: KeyId) -> Frame {
        let raw = self
            .store
            .get_value(self.graph.key(id))
            .map(|v| v.into_owned())
            .unwrap_or_default();
        Frame::new(Some(id), raw, self.config)
    }

    fn run(&self, cache: &mut Cache, root: Frame) -> Option<ResolvedEntry> {
        let mut active: HashSet<KeyId> = root.key.into_iter().collect();
        let mut stack = vec![root];

        while let Some(frame) = stack.last_mut() {
            match self.step(cache, &active, frame) {
                Step::Blocked(dep) => {
                    active.insert(dep);
                    stack.push(self.frame_for(dep));
                }
                Step::Finished(entry) => {
                    let Some(done) = stack.pop() else { break };
                    if let Some(id) = done.key {
                        active.remove(&id);
                        tracing::trace!(
                            key = self.graph.key(id),
                            cost = ?entry.as_ref().map(|e| e.expansion_cost),
                            "memoized"
                        );
                        cache.insert(id, entry.clone());
                    }
                    if stack.is_empty() {
                        return entry;
                    }
                }
            }
        }
        None
    }

    /// Advance `frame` until it finishes or needs an unresolved key.
    fn step(&self, cache: &Cache, active: &HashSet<KeyId>, frame: &mut Frame) -> Step {
        let bound = self.config.reference_upper_bound;
        let Frame { key, raw, expr, cursor, output, cost } = frame;

        loop {
            let depth = cursor.len() - 1;
            let segments = segments_at(expr, &cursor[..depth]);

            let Some(segment) = segments.get(cursor[depth]) else {
                if depth == 0 {
                    if output.is_empty() {
                        return Step::Finished(None);
                    }
                    return Step::Finished(Some(ResolvedEntry::new(mem::take(output), *cost)));
                }
                // Default fully expanded; the reference owning it is done.
                cursor.pop();
                cursor[depth - 1] += 1;
                continue;
            };

            match segment {
                Segment::Literal(text) => {
                    output.push_str(text);
                    cursor[depth] += 1;
                }
                Segment::Reference(reference) => match self.lookup(cache, active, &reference.key) {
                    Lookup::Pending(dep) => return Step::Blocked(dep),
                    Lookup::Resolved(entry) if entry.is_blown_up(bound) => {
                        tracing::warn!(
                            key = self.describe(*key),
                            reference = %reference.key,
                            "referenced property exceeded the expansion ceiling, \
                             leaving value unexpanded"
                        );
                        return Step::Finished(Some(ResolvedEntry::new(raw.as_str(), bound)));
                    }
                    Lookup::Resolved(entry) => {
                        output.push_str(&entry.value);
                        *cost = cost.saturating_add(entry.expansion_cost).saturating_add(1);
                        if *cost >= bound {
                            tracing::warn!(
                                key = self.describe(*key),
                                cost = *cost,
                                bound,
                                "property expansion exceeded the reference ceiling, \
                                 leaving value unexpanded"
                            );
                            return Step::Finished(Some(ResolvedEntry::new(raw.as_str(), bound)));
                        }
                        cursor[depth] += 1;
                    }
                    Lookup::Unresolved => match reference.default {
                        Some(_) => cursor.push(0),
                        None => {
                            output.push_str(&self.config.syntax.placeholder(&reference.key));
                            cursor[depth] += 1;
                        }
                    },
                },
            }
        }
    }

    fn lookup(&self, cache: &Cache, active: &HashSet<KeyId>, key: &str) -> Lookup {
        if !self.store.has_key(key) {
            return Lookup::Unresolved;
        }
        let Some(id) = self.graph.id(key) else {
            return Lookup::Unresolved;
        };
        match cache.get(&id) {
            Some(Some(entry)) => Lookup::Resolved(entry.clone()),
            Some(None) => Lookup::Unresolved,
            // Only reachable if the store's key set and has_key disagree.
            None if active.contains(&id) => Lookup::Unresolved,
            None => Lookup::Pending(id),
        }
    }

    fn describe(&self, key: Option<KeyId>) -> &str {
        key.map_or("<text>", |id| self.graph.key(id))
    }
}

impl Frame {
    fn new(key: Option<KeyId>, raw: String, config: &ResolverConfig) -> Self {
        let expr = parse_with(&raw, &config.syntax);
        Self {
            key,
            raw,
            expr,
            cursor: smallvec![0],
            output: String::new(),
            cost: 0,
        }
    }
}

/// Segment list reached by following `path` through reference defaults.
fn segments_at<'e>(expr: &'e Expression, path: &[usize]) -> &'e [Segment] {
    let mut segments = expr.segments.as_slice();
    for &i in path {
        segments = match &segments[i] {
            Segment::Reference(r) => match &r.default {
                Some(default) => default.segments.as_slice(),
                None => &[],
            },
            Segment::Literal(_) => &[],
        };
    }
    segments
}
