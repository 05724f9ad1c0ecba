//! Navigation construction errors.

/// Error returned when a navigation entry is malformed.
///
/// `at` locates the entry, e.g. `sidebar[1].children[0]`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavError {
    /// Entry has no display text.
    #[error("{at}: missing text")]
    MissingText { at: String },

    /// Entry without children has no link.
    #[error("{at}: link item requires `link`")]
    MissingLink { at: String },

    /// `collapsible` set on an entry without children.
    #[error("{at}: `collapsible` only applies to groups")]
    CollapsibleLink { at: String },

    /// Group with neither children nor an index page.
    #[error("{at}: group has no children and no link")]
    EmptyGroup { at: String },

    /// Link is neither site-absolute nor an http(s) URL.
    #[error("{at}: invalid link {path:?}, expected '/...' or an http(s) URL")]
    InvalidPath { at: String, path: String },

    /// Navbar entry with children.
    #[error("{at}: navbar items cannot have children")]
    NestedNavbarItem { at: String },

    /// Locale prefix not of the form `/xx/`.
    #[error("Invalid locale prefix {prefix:?}: must start and end with '/'")]
    InvalidLocale { prefix: String },

    /// Same locale prefix declared twice.
    #[error("Locale {prefix} declared twice")]
    DuplicateLocale { prefix: String },
}
