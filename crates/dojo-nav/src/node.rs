//! Navigation nodes and their configuration shape.

use serde::{Deserialize, Serialize};

use crate::NavError;

/// Navigation entry as written in configuration.
///
/// Every field is optional here; [`build_sidebar`] and [`build_navbar`]
/// decide whether the entry is a link or a group and reject the ones that
/// are neither.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavEntry {
    /// Display text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Target path or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Whether a group can be collapsed by the reader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    /// Nested entries. Presence (even empty) makes the entry a group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavEntry>>,
}

impl NavEntry {
    /// Link entry.
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Group entry without an index page.
    pub fn group(text: impl Into<String>, children: Vec<NavEntry>) -> Self {
        Self {
            text: Some(text.into()),
            children: Some(children),
            ..Self::default()
        }
    }
}

/// Clickable leaf of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkNode {
    /// Display text.
    pub text: String,
    /// Target path or URL.
    pub path: String,
}

/// Container of navigation nodes, optionally with its own index page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupNode {
    /// Display text.
    pub text: String,
    /// Index page of the group, if it is clickable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the reader can collapse the group.
    #[serde(default)]
    pub collapsible: bool,
    /// Children in declared order.
    pub children: Vec<NavNode>,
}

/// Node of the navigation tree.
///
/// Built from configuration by [`build_sidebar`] or `TryFrom<&NavEntry>`.
/// `Deserialize` is for reading back serialized trees and skips validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavNode {
    Link(LinkNode),
    Group(GroupNode),
}

impl NavNode {
    /// Create a link node.
    pub fn link(text: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Link(LinkNode {
            text: text.into(),
            path: path.into(),
        })
    }

    /// Create a group node.
    pub fn group(
        text: impl Into<String>,
        path: Option<String>,
        collapsible: bool,
        children: Vec<NavNode>,
    ) -> Self {
        Self::Group(GroupNode {
            text: text.into(),
            path,
            collapsible,
            children,
        })
    }

    /// Display text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Group(group) => &group.text,
        }
    }

    /// Target path, if the node is clickable.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Link(link) => Some(&link.path),
            Self::Group(group) => group.path.as_deref(),
        }
    }

    /// Children in declared order (empty for links).
    #[must_use]
    pub fn children(&self) -> &[NavNode] {
        match self {
            Self::Link(_) => &[],
            Self::Group(group) => &group.children,
        }
    }

    /// Number of levels in this subtree, counting the node itself.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(NavNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Every path in this subtree in declared order, group index pages
    /// included.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.walk().filter_map(NavNode::path)
    }
}

impl TryFrom<&NavEntry> for NavNode {
    type Error = NavError;

    /// Build a single sidebar node. Error locations start at `entry`.
    fn try_from(entry: &NavEntry) -> Result<Self, Self::Error> {
        build_node(entry, "entry")
    }
}

/// Pre-order iterator returned by [`NavNode::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a NavNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a NavNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Whether a link points outside the site.
#[must_use]
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Build the sidebar tree from configuration entries.
///
/// # Errors
///
/// Returns [`NavError`] for the first malformed entry, located relative to
/// `at` (e.g. `sidebar`).
pub fn build_sidebar(entries: &[NavEntry], at: &str) -> Result<Vec<NavNode>, NavError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| build_node(entry, &format!("{at}[{i}]")))
        .collect()
}

/// Build the flat navbar from configuration entries.
///
/// # Errors
///
/// Returns [`NavError::NestedNavbarItem`] for entries with children, and the
/// usual link errors otherwise.
pub fn build_navbar(entries: &[NavEntry], at: &str) -> Result<Vec<LinkNode>, NavError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let at = format!("{at}[{i}]");
            if entry.children.is_some() {
                return Err(NavError::NestedNavbarItem { at });
            }
            build_link(entry, at)
        })
        .collect()
}

fn build_node(entry: &NavEntry, at: &str) -> Result<NavNode, NavError> {
    let Some(children) = &entry.children else {
        return build_link(entry, at.to_owned()).map(NavNode::Link);
    };

    let text = require_text(entry, at)?;
    let path = entry
        .link
        .as_deref()
        .map(|link| require_path(link, at))
        .transpose()?;
    if children.is_empty() && path.is_none() {
        return Err(NavError::EmptyGroup { at: at.to_owned() });
    }
    let children = build_sidebar(children, &format!("{at}.children"))?;

    Ok(NavNode::group(
        text,
        path,
        entry.collapsible.unwrap_or(false),
        children,
    ))
}

fn build_link(entry: &NavEntry, at: String) -> Result<LinkNode, NavError> {
    let text = require_text(entry, &at)?;
    if entry.collapsible.is_some() {
        return Err(NavError::CollapsibleLink { at });
    }
    let Some(link) = entry.link.as_deref() else {
        return Err(NavError::MissingLink { at });
    };
    let path = require_path(link, &at)?;
    Ok(LinkNode { text, path })
}

fn require_text(entry: &NavEntry, at: &str) -> Result<String, NavError> {
    match entry.text.as_deref() {
        Some(text) if !text.trim().is_empty() => Ok(text.to_owned()),
        _ => Err(NavError::MissingText { at: at.to_owned() }),
    }
}

fn require_path(link: &str, at: &str) -> Result<String, NavError> {
    if link.starts_with('/') || is_external(link) {
        Ok(link.to_owned())
    } else {
        Err(NavError::InvalidPath {
            at: at.to_owned(),
            path: link.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(nodes: &[NavNode]) -> Vec<&str> {
        nodes.iter().map(NavNode::text).collect()
    }

    #[test]
    fn test_entry_without_children_is_link() {
        let nodes = build_sidebar(&[NavEntry::link("Guide", "/guide")], "sidebar").unwrap();

        assert_eq!(nodes, vec![NavNode::link("Guide", "/guide")]);
    }

    #[test]
    fn test_entry_with_children_is_group() {
        let entry = NavEntry {
            text: Some("Guides".to_owned()),
            link: Some("/guides/".to_owned()),
            collapsible: Some(true),
            children: Some(vec![NavEntry::link("Intro", "/guides/intro")]),
        };

        let nodes = build_sidebar(&[entry], "sidebar").unwrap();

        assert_eq!(
            nodes,
            vec![NavNode::group(
                "Guides",
                Some("/guides/".to_owned()),
                true,
                vec![NavNode::link("Intro", "/guides/intro")],
            )]
        );
    }

    #[test]
    fn test_children_keep_declared_order() {
        let entry = NavEntry::group(
            "Group",
            vec![
                NavEntry::link("X", "/x"),
                NavEntry::link("Y", "/y"),
                NavEntry::link("Z", "/z"),
            ],
        );

        let nodes = build_sidebar(&[entry], "sidebar").unwrap();

        assert_eq!(texts(nodes[0].children()), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_unsorted_order_is_not_sorted() {
        let entries = vec![
            NavEntry::link("Zeta", "/zeta"),
            NavEntry::link("Alpha", "/alpha"),
            NavEntry::link("Mu", "/mu"),
        ];

        let nodes = build_sidebar(&entries, "sidebar").unwrap();

        assert_eq!(texts(&nodes), vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_missing_text_rejected() {
        let entry = NavEntry {
            link: Some("/guide".to_owned()),
            ..NavEntry::default()
        };

        let err = build_sidebar(&[entry], "sidebar").unwrap_err();

        assert_eq!(
            err,
            NavError::MissingText {
                at: "sidebar[0]".to_owned()
            }
        );
    }

    #[test]
    fn test_blank_text_rejected() {
        let err = build_sidebar(&[NavEntry::link("  ", "/guide")], "sidebar").unwrap_err();

        assert!(matches!(err, NavError::MissingText { .. }), "got {err:?}");
    }

    #[test]
    fn test_text_kept_as_written() {
        let nodes = build_sidebar(&[NavEntry::link(" 🔥 Mojo ", "/guide")], "sidebar").unwrap();

        assert_eq!(nodes[0].text(), " 🔥 Mojo ");
    }

    #[test]
    fn test_link_without_path_rejected() {
        let entry = NavEntry {
            text: Some("Orphan".to_owned()),
            ..NavEntry::default()
        };

        let err = build_sidebar(&[NavEntry::link("Ok", "/ok"), entry], "sidebar").unwrap_err();

        assert_eq!(
            err,
            NavError::MissingLink {
                at: "sidebar[1]".to_owned()
            }
        );
    }

    #[test]
    fn test_nested_error_location() {
        let entries = vec![NavEntry::group(
            "Outer",
            vec![NavEntry::group(
                "Inner",
                vec![NavEntry::link("Bad", "relative")],
            )],
        )];

        let err = build_sidebar(&entries, "sidebar").unwrap_err();

        assert_eq!(
            err,
            NavError::InvalidPath {
                at: "sidebar[0].children[0].children[0]".to_owned(),
                path: "relative".to_owned(),
            }
        );
    }

    #[test]
    fn test_collapsible_link_rejected() {
        let entry = NavEntry {
            collapsible: Some(true),
            ..NavEntry::link("Guide", "/guide")
        };

        let err = build_sidebar(&[entry], "sidebar").unwrap_err();

        assert!(matches!(err, NavError::CollapsibleLink { .. }), "got {err:?}");
    }

    #[test]
    fn test_empty_group_rejected() {
        let err = build_sidebar(&[NavEntry::group("Empty", vec![])], "sidebar").unwrap_err();

        assert!(matches!(err, NavError::EmptyGroup { .. }), "got {err:?}");
    }

    #[test]
    fn test_empty_group_with_index_page_allowed() {
        let entry = NavEntry {
            link: Some("/blog/".to_owned()),
            ..NavEntry::group("Blog", vec![])
        };

        let nodes = build_sidebar(&[entry], "sidebar").unwrap();

        assert_eq!(nodes[0].path(), Some("/blog/"));
        assert!(nodes[0].children().is_empty());
    }

    #[test]
    fn test_external_links_allowed() {
        let nodes = build_sidebar(
            &[NavEntry::link("Modular", "https://www.modular.com")],
            "sidebar",
        )
        .unwrap();

        assert_eq!(nodes[0].path(), Some("https://www.modular.com"));
        assert!(is_external("https://www.modular.com"));
        assert!(!is_external("/guide"));
    }

    #[test]
    fn test_navbar_rejects_children() {
        let entries = vec![
            NavEntry::link("Home", "/"),
            NavEntry::group("Guides", vec![NavEntry::link("Intro", "/intro")]),
        ];

        let err = build_navbar(&entries, "navbar").unwrap_err();

        assert_eq!(
            err,
            NavError::NestedNavbarItem {
                at: "navbar[1]".to_owned()
            }
        );
    }

    #[test]
    fn test_navbar_builds_links() {
        let navbar = build_navbar(
            &[NavEntry::link("Chris Lattner FAQ", "/general/chris_faqs")],
            "navbar",
        )
        .unwrap();

        assert_eq!(
            navbar,
            vec![LinkNode {
                text: "Chris Lattner FAQ".to_owned(),
                path: "/general/chris_faqs".to_owned(),
            }]
        );
    }

    #[test]
    fn test_depth() {
        let tree = NavNode::group(
            "A",
            None,
            false,
            vec![
                NavNode::link("B", "/b"),
                NavNode::group(
                    "C",
                    None,
                    false,
                    vec![NavNode::group("D", None, false, vec![NavNode::link("E", "/e")])],
                ),
            ],
        );

        assert_eq!(NavNode::link("x", "/x").depth(), 1);
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = NavNode::group(
            "A",
            Some("/a/".to_owned()),
            false,
            vec![
                NavNode::group("B", None, false, vec![NavNode::link("C", "/c")]),
                NavNode::link("D", "/d"),
            ],
        );

        let visited: Vec<_> = tree.walk().map(NavNode::text).collect();
        let paths: Vec<_> = tree.links().collect();

        assert_eq!(visited, vec!["A", "B", "C", "D"]);
        assert_eq!(paths, vec!["/a/", "/c", "/d"]);
    }

    #[test]
    fn test_try_from_entry() {
        let node = NavNode::try_from(&NavEntry::group(
            "Guides",
            vec![NavEntry::link("Intro", "/guides/intro")],
        ))
        .unwrap();
        assert_eq!(node.links().collect::<Vec<_>>(), vec!["/guides/intro"]);

        let err = NavNode::try_from(&NavEntry::group(
            "Guides",
            vec![NavEntry {
                text: Some("Intro".to_owned()),
                ..NavEntry::default()
            }],
        ))
        .unwrap_err();
        assert_eq!(
            err,
            NavError::MissingLink {
                at: "entry.children[0]".to_owned()
            }
        );
    }

    #[test]
    fn test_json_uses_kind_tag() {
        let node = NavNode::group(
            "Guides",
            None,
            true,
            vec![NavNode::link("Intro", "/intro")],
        );

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["kind"], "group");
        assert_eq!(json["collapsible"], true);
        assert!(json.get("path").is_none());
        assert_eq!(json["children"][0]["kind"], "link");
        assert_eq!(json["children"][0]["path"], "/intro");
    }

    #[test]
    fn test_json_roundtrip_preserves_tree() {
        let tree = vec![
            NavNode::link("Home", "/"),
            NavNode::group(
                "Guides",
                Some("/guides/".to_owned()),
                true,
                vec![
                    NavNode::link("Z", "/z"),
                    NavNode::group("Inner", None, false, vec![NavNode::link("A", "/a")]),
                ],
            ),
        ];

        let json = serde_json::to_string(&tree).unwrap();
        let back: Vec<NavNode> = serde_json::from_str(&json).unwrap();

        assert_eq!(back, tree);
    }

    #[test]
    fn test_entry_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            sidebar: Vec<NavEntry>,
        }

        let doc: Doc = toml::from_str(
            r#"
[[sidebar]]
text = "Guides"
collapsible = true
children = [
    { text = "Intro", link = "/guides/intro" },
    { text = "Setup", link = "/guides/setup" },
]
"#,
        )
        .unwrap();

        let nodes = build_sidebar(&doc.sidebar, "sidebar").unwrap();

        assert_eq!(texts(nodes[0].children()), vec!["Intro", "Setup"]);
    }

    #[test]
    fn test_entry_rejects_unknown_fields() {
        let result: Result<NavEntry, _> =
            serde_json::from_str(r#"{"text": "Guide", "href": "/guide"}"#);

        assert!(result.is_err());
    }
}
