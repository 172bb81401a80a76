//! # Context DotPath
//!
//! Compact access to nested `serde_json::Value` trees through dotted paths
//! such as `"server.http.port"`, with lazily computed defaults.
//!
//! ## Operations
//!
//! - **value** - resolve a literal or a deferred computation
//! - **get** - read a nested value, falling back to a default
//! - **set** - write a nested value, creating intermediate objects
//! - **remember** - get, or compute the default once and store it
//!
//! ## Architecture
//!
//! ```text
//! remember ──> get ──> value
//!     │                  ▲
//!     └──────> set ──────┘
//! ```
//!
//! The free functions below use [`DotPathConfig::compatible`]: deep
//! traversal plus numeric-string coercion. Build a [`DotPath`] for other
//! behavior (no coercion, a different separator, shallow legacy reads).
//!
//! ## Example
//!
//! ```rust
//! use context_dotpath::{get, remember, set, Resolvable};
//! use serde_json::json;
//!
//! let mut config = json!({});
//! set(&mut config, "server.port", "8080").unwrap();
//! assert_eq!(config, json!({"server": {"port": 8080}}));
//!
//! let host = get(&config, "server.host", "localhost");
//! assert_eq!(*host, json!("localhost"));
//!
//! let workers = remember(&mut config, "server.workers", Resolvable::lazy(|_| json!(4))).unwrap();
//! assert_eq!(workers, json!(4));
//! assert_eq!(config["server"]["workers"], json!(4));
//! ```

mod accessor;
mod config;
mod error;
mod path;
mod resolve;

use std::borrow::Cow;

use serde_json::Value;

pub use accessor::DotPath;
pub use config::{DotPathConfig, Traversal};
pub use error::{PathError, Result};
pub use resolve::{coerce_numeric, is_falsy, Resolvable};

/// Resolve `v`: thunks are invoked with `ctx`, numeric-looking literal
/// strings become numbers, everything else is returned unchanged.
pub fn value<'d>(v: impl Into<Resolvable<'d>>, ctx: &Value) -> Value {
    DotPath::compatible().value(v, ctx)
}

/// Read the value at `path` inside `container`, or the resolved `default`.
///
/// See [`DotPath::get`].
pub fn get<'a, 'd>(
    container: &'a Value,
    path: &str,
    default: impl Into<Resolvable<'d>>,
) -> Cow<'a, Value> {
    DotPath::compatible().get(container, path, default)
}

/// Write the resolved `v` at `path`, returning the same container.
///
/// See [`DotPath::set`].
pub fn set<'c, 'd>(
    container: &'c mut Value,
    path: &str,
    v: impl Into<Resolvable<'d>>,
) -> Result<&'c mut Value> {
    DotPath::compatible().set(container, path, v)
}

/// Read `path`, storing and returning the resolved `default` on a miss.
///
/// See [`DotPath::remember`].
pub fn remember<'d>(
    container: &mut Value,
    path: &str,
    default: impl Into<Resolvable<'d>>,
) -> Result<Value> {
    DotPath::compatible().remember(container, path, default)
}
