//! Redirect table for legacy site paths.
//!
//! Maps request paths that used to exist on the site to the paths that
//! replaced them. The table is built once from an ordered list of
//! [`RedirectEntry`] values and is immutable afterwards.
//!
//! # Resolution rules
//!
//! - Lookup is an exact string match on [`RedirectEntry::from`]. `/guide` and
//!   `/guide.html` are different keys.
//! - When several entries share a source path, the last one declared wins
//!   (see [`DuplicatePolicy`]).
//! - A target's `#fragment` and `?query` are passed to the client but take no
//!   part in loop detection: `/a -> /a#top` is a self-loop.
//! - Resolution is a single hop. If the target is itself a source path, the
//!   client has to request it again to follow the chain.
//!
//! # Example
//!
//! ```
//! use dojo_redirects::RedirectTable;
//!
//! let mut builder = RedirectTable::builder();
//! builder
//!     .add("/mojo_team_answers", "/mojo-team-answers")
//!     .add("/mojo_team_answers", "/mojo-team-answers.html");
//! let table = builder.build().unwrap();
//!
//! assert_eq!(table.resolve("/mojo_team_answers"), Some("/mojo-team-answers.html"));
//! assert_eq!(table.resolve("/blog"), None);
//! ```

mod error;
mod table;

pub use error::RedirectError;
pub use table::{
    DuplicatePolicy, RedirectEntry, RedirectTable, RedirectTableBuilder, Shadowed, path_part,
};
