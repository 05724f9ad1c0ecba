//! Navigation tree for dojo sites.
//!
//! Authors describe the navbar and sidebar in configuration as loosely-typed
//! [`NavEntry`] lists. This crate turns them into a typed tree of
//! [`NavNode`] values, rejecting malformed entries at construction time, and
//! groups the result per locale in a [`Navigation`].
//!
//! The tree is handed to the theme unchanged: declared order is preserved,
//! nothing is sorted or deduplicated.
//!
//! # Example
//!
//! ```
//! use dojo_nav::{NavEntry, NavigationBuilder};
//!
//! let navbar = vec![NavEntry::link("Chris Lattner FAQ", "/general/chris_faqs")];
//! let mut builder = NavigationBuilder::new();
//! builder.defaults(&navbar, &[]);
//! let nav = builder.build().unwrap();
//!
//! let root = nav.for_path("/general/chris_faqs").unwrap();
//! assert_eq!(root.navbar()[0].text, "Chris Lattner FAQ");
//! ```

mod error;
mod navigation;
mod node;

pub use error::NavError;
pub use navigation::{LocaleNavigation, NavLink, Navigation, NavigationBuilder};
pub use node::{GroupNode, LinkNode, NavEntry, NavNode, Walk, build_navbar, build_sidebar, is_external};
