use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::config::{DotPathConfig, Traversal};
use crate::error::{PathError, Result};
use crate::path;
use crate::resolve::{is_falsy, Resolvable};

/// Reads and writes nested values through dotted paths.
///
/// All state lives in the caller's container; `DotPath` only carries its
/// configuration and is cheap to copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotPath {
    config: DotPathConfig,
}

impl DotPath {
    pub fn new(config: DotPathConfig) -> Self {
        Self { config }
    }

    /// Accessor matching the crate-level functions
    pub fn compatible() -> Self {
        Self::new(DotPathConfig::compatible())
    }

    /// Accessor with shallow, bug-compatible reads
    pub fn legacy() -> Self {
        Self::new(DotPathConfig::legacy())
    }

    pub fn config(&self) -> &DotPathConfig {
        &self.config
    }

    /// Resolve `v` against `ctx`: thunks are invoked, literal strings are
    /// coerced when the config asks for it.
    pub fn value<'d>(&self, v: impl Into<Resolvable<'d>>, ctx: &Value) -> Value {
        v.into().resolve_with(ctx, self.config.coerce_numeric_strings)
    }

    /// Read the value at `path`, or resolve `default` if any level is missing.
    ///
    /// A falsy container or an empty path returns the container itself. The
    /// default is only evaluated on a miss.
    pub fn get<'a, 'd>(
        &self,
        container: &'a Value,
        path: &str,
        default: impl Into<Resolvable<'d>>,
    ) -> Cow<'a, Value> {
        if is_falsy(container) {
            return Cow::Borrowed(container);
        }
        let Some(segments) = path::split(path, self.config.separator) else {
            return Cow::Borrowed(container);
        };

        match self.find(container, &segments) {
            Some(found) => Cow::Borrowed(found),
            None => {
                log::trace!("No value at '{path}', resolving default");
                Cow::Owned(self.value(default, container))
            }
        }
    }

    /// Whether `path` resolves to a present (non-null) value.
    pub fn contains(&self, container: &Value, path: &str) -> bool {
        if is_falsy(container) {
            return false;
        }
        path::split(path, self.config.separator)
            .is_some_and(|segments| self.find(container, &segments).is_some())
    }

    /// Write `v` at `path`, creating missing intermediate objects, and hand
    /// the same container back.
    ///
    /// `v` is resolved against the top-level container before anything is
    /// mutated. A falsy container or an empty path is a no-op. Writing
    /// through a scalar is a fault and leaves already-created intermediates
    /// in place.
    pub fn set<'c, 'd>(
        &self,
        container: &'c mut Value,
        path: &str,
        v: impl Into<Resolvable<'d>>,
    ) -> Result<&'c mut Value> {
        if is_falsy(container) {
            return Ok(container);
        }
        let Some(segments) = path::split(path, self.config.separator) else {
            return Ok(container);
        };

        let resolved = self.value(v, container);
        write(container, &segments, resolved, path)?;
        Ok(container)
    }

    /// Read `path`; on a miss resolve `default` once, store it, and return
    /// the stored value.
    ///
    /// The container is mutated exactly when the path was absent. Short
    /// circuits behave like [`get`](Self::get) and never write.
    pub fn remember<'d>(
        &self,
        container: &mut Value,
        path: &str,
        default: impl Into<Resolvable<'d>>,
    ) -> Result<Value> {
        if is_falsy(container) {
            return Ok(container.clone());
        }
        let Some(segments) = path::split(path, self.config.separator) else {
            return Ok(container.clone());
        };

        if let Some(found) = self.find(container, &segments) {
            return Ok(found.clone());
        }

        let resolved = self.value(default, container);
        // Stored through the same resolution `set` applies to literals.
        let stored = self.value(resolved, container);
        log::trace!("Remembering value at '{path}'");
        write(container, &segments, stored.clone(), path)?;
        Ok(stored)
    }

    fn find<'a>(&self, container: &'a Value, segments: &[&str]) -> Option<&'a Value> {
        match self.config.traversal {
            Traversal::Deep => segments
                .iter()
                .try_fold(container, |sub, segment| path::lookup(sub, segment)),
            Traversal::Shallow => {
                let mut sub = container;
                for segment in segments {
                    sub = path::lookup(container, segment)?;
                }
                Some(sub)
            }
        }
    }
}

fn write(container: &mut Value, segments: &[&str], value: Value, path: &str) -> Result<()> {
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut sub = container;
    for segment in parents {
        sub = descend(sub, segment, path)?;
    }
    *slot(sub, last, path)? = value;
    Ok(())
}

/// Step into `segment`, replacing a missing or null level with `{}`.
fn descend<'v>(sub: &'v mut Value, segment: &str, path: &str) -> Result<&'v mut Value> {
    let next = slot(sub, segment, path)?;
    if next.is_null() {
        log::debug!("Creating intermediate object '{segment}' for '{path}'");
        *next = Value::Object(Map::new());
    }
    Ok(next)
}

/// How many `null` holes a single array write may open past the end.
const MAX_ARRAY_PADDING: usize = 1024;

/// Mutable slot for `segment` inside an object or array, created as `Null`
/// when absent. Arrays grow to fit the index, within `MAX_ARRAY_PADDING`.
fn slot<'v>(sub: &'v mut Value, segment: &str, path: &str) -> Result<&'v mut Value> {
    match sub {
        Value::Object(map) => Ok(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let Some(index) = path::parse_index(segment) else {
                log::warn!("Refusing non-index segment '{segment}' on array in '{path}'");
                return Err(PathError::InvalidIndex {
                    path: path.to_string(),
                    segment: segment.to_string(),
                });
            };
            let len = items.len();
            let Some(new_len) = index
                .checked_add(1)
                .filter(|&new_len| new_len <= len.saturating_add(MAX_ARRAY_PADDING + 1))
            else {
                log::warn!("Index '{segment}' in '{path}' is too far past array length {len}");
                return Err(PathError::IndexOutOfRange {
                    path: path.to_string(),
                    segment: segment.to_string(),
                    len,
                });
            };
            if new_len > len {
                if index > len {
                    log::debug!("Padding array from {len} to {new_len} elements for '{path}'");
                }
                items.resize(new_len, Value::Null);
            }
            Ok(&mut items[index])
        }
        other => {
            let found = path::kind_name(other);
            log::warn!("Cannot write '{segment}' of '{path}' into a {found}");
            Err(PathError::NotAContainer {
                path: path.to_string(),
                segment: segment.to_string(),
                found,
            })
        }
    }
}
