//! Redirect table construction and lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::RedirectError;

/// A single redirect rule as declared in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectEntry {
    /// Request path that triggers the redirect (exact match).
    pub from: String,
    /// Path the client is sent to.
    pub to: String,
}

impl RedirectEntry {
    /// Create a redirect entry.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// How the builder treats a source path that is declared more than once
/// with different targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The last declaration wins; earlier ones are logged as shadowed.
    #[default]
    LastWins,
    /// Fail the build with [`RedirectError::ConflictingDuplicate`].
    Reject,
}

/// An entry overridden by a later entry with the same source path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shadowed<'a> {
    /// The overridden entry.
    pub entry: &'a RedirectEntry,
    /// The entry that takes effect for the same source path.
    pub winner: &'a RedirectEntry,
}

impl Shadowed<'_> {
    /// Whether the overridden entry pointed somewhere else.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.entry.to != self.winner.to
    }
}

/// Builder collecting redirect entries in declaration order.
#[derive(Debug, Default)]
pub struct RedirectTableBuilder {
    entries: Vec<RedirectEntry>,
    policy: DuplicatePolicy,
}

impl RedirectTableBuilder {
    /// Create an empty builder with [`DuplicatePolicy::LastWins`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate policy.
    pub fn duplicates(&mut self, policy: DuplicatePolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Append a redirect.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.entries.push(RedirectEntry::new(from, to));
        self
    }

    /// Append several redirects, keeping their order.
    pub fn extend<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = RedirectEntry>,
    {
        self.entries.extend(entries);
        self
    }

    /// Validate the entries and build the table.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectError`] for malformed entries, self-loops, cycles, and
    /// (with [`DuplicatePolicy::Reject`]) conflicting duplicates.
    pub fn build(self) -> Result<RedirectTable, RedirectError> {
        let Self { entries, policy } = self;

        let mut index: HashMap<String, usize> = HashMap::with_capacity(entries.len());
        let mut first_declared = Vec::new();

        for (position, entry) in entries.iter().enumerate() {
            validate_entry(entry)?;

            let Some(previous) = index.insert(entry.from.clone(), position) else {
                first_declared.push(position);
                continue;
            };

            let earlier = &entries[previous];
            if earlier.to == entry.to {
                tracing::debug!(from = %entry.from, to = %entry.to, "Duplicate redirect");
                continue;
            }
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(RedirectError::ConflictingDuplicate {
                        from: entry.from.clone(),
                        first: earlier.to.clone(),
                        second: entry.to.clone(),
                    });
                }
                DuplicatePolicy::LastWins => {
                    tracing::warn!(
                        from = %entry.from,
                        shadowed = %earlier.to,
                        target = %entry.to,
                        "Redirect declared twice, later entry wins"
                    );
                }
            }
        }

        let order = first_declared
            .into_iter()
            .map(|position| index[entries[position].from.as_str()])
            .collect();

        let table = RedirectTable {
            entries,
            index,
            order,
        };
        table.check_cycles()?;

        tracing::debug!(
            entries = table.entries.len(),
            effective = table.order.len(),
            "Redirect table built"
        );
        Ok(table)
    }
}

/// Path part of a redirect target or site link: everything before the
/// first `#` or `?`.
///
/// Requests are matched on their path only, so this is what a target is
/// compared against when looking for loops.
#[must_use]
pub fn path_part(target: &str) -> &str {
    target.split(['#', '?']).next().unwrap_or(target)
}

fn validate_entry(entry: &RedirectEntry) -> Result<(), RedirectError> {
    if !entry.from.starts_with('/') || entry.from.contains(['#', '?']) {
        return Err(RedirectError::InvalidSource {
            from: entry.from.clone(),
        });
    }
    if entry.to.is_empty() {
        return Err(RedirectError::EmptyTarget {
            from: entry.from.clone(),
        });
    }
    // `#top` and `?x=1` alone point back at the requested page
    let target = path_part(&entry.to);
    if target.is_empty() || target == entry.from {
        return Err(RedirectError::SelfLoop {
            from: entry.from.clone(),
        });
    }
    Ok(())
}

/// Immutable, validated redirect table.
///
/// Keeps every declared entry (shadowed ones included) so diagnostics can
/// report them, plus an index of the winning entry for each source path.
#[derive(Clone, Debug, Default)]
pub struct RedirectTable {
    entries: Vec<RedirectEntry>,
    /// Source path to position of the winning entry.
    index: HashMap<String, usize>,
    /// Winning entry positions, ordered by first declaration of their source.
    order: Vec<usize>,
}

impl RedirectTable {
    /// Start building a table.
    #[must_use]
    pub fn builder() -> RedirectTableBuilder {
        RedirectTableBuilder::new()
    }

    /// Build a table from entries with the default duplicate policy.
    ///
    /// # Errors
    ///
    /// See [`RedirectTableBuilder::build`].
    pub fn from_entries<I>(entries: I) -> Result<Self, RedirectError>
    where
        I: IntoIterator<Item = RedirectEntry>,
    {
        let mut builder = Self::builder();
        builder.extend(entries);
        builder.build()
    }

    /// Resolve a request path to its redirect target.
    ///
    /// Returns `None` when no redirect applies. Performs exactly one hop.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.resolve_entry(path).map(|entry| entry.to.as_str())
    }

    /// Resolve a request path to the entry that takes effect for it.
    #[must_use]
    pub fn resolve_entry(&self, path: &str) -> Option<&RedirectEntry> {
        self.index.get(path).map(|&position| &self.entries[position])
    }

    /// Follow redirects from `path` until a path with no redirect is reached.
    ///
    /// The returned chain starts with `path` itself and lists targets as
    /// declared. Each hop is looked up by its [`path_part`]. This is a
    /// diagnostic helper; request handling never follows more than one hop.
    #[must_use]
    pub fn trace<'a>(&'a self, path: &'a str) -> Vec<&'a str> {
        let mut chain = vec![path];
        let mut current = path;
        while let Some(next) = self.resolve(path_part(current)) {
            chain.push(next);
            current = next;
        }
        chain
    }

    /// All entries in declaration order, shadowed entries included.
    #[must_use]
    pub fn entries(&self) -> &[RedirectEntry] {
        &self.entries
    }

    /// One entry per distinct source path: the one that takes effect.
    ///
    /// Ordered by the first declaration of each source path.
    pub fn effective(&self) -> impl Iterator<Item = &RedirectEntry> {
        self.order.iter().map(|&position| &self.entries[position])
    }

    /// Entries overridden by a later entry with the same source path.
    pub fn shadowed(&self) -> impl Iterator<Item = Shadowed<'_>> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                let winner = self.index[entry.from.as_str()];
                (winner != position).then(|| Shadowed {
                    entry,
                    winner: &self.entries[winner],
                })
            })
    }

    /// Number of distinct source paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table has no redirects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Reject any chain of effective redirects that returns to a path
    /// already on it.
    fn check_cycles(&self) -> Result<(), RedirectError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            OnChain,
            Done,
        }

        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.index.len());

        for entry in self.effective() {
            let mut chain: Vec<&str> = Vec::new();
            let mut current = entry.from.as_str();

            loop {
                match marks.get(current) {
                    Some(Mark::Done) => break,
                    Some(Mark::OnChain) => {
                        let start = chain.iter().position(|hop| *hop == current).unwrap_or(0);
                        let mut cycle: Vec<String> =
                            chain[start..].iter().map(|hop| (*hop).to_owned()).collect();
                        cycle.push(current.to_owned());
                        return Err(RedirectError::Cycle { chain: cycle });
                    }
                    None => {}
                }
                let Some(next) = self.resolve(current) else {
                    break;
                };
                marks.insert(current, Mark::OnChain);
                chain.push(current);
                current = path_part(next);
            }

            for hop in chain {
                marks.insert(hop, Mark::Done);
            }
        }

        Ok(())
    }
}
