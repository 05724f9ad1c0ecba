//! Index of content pages found in the docs source directory.
//!
//! Pages map to URL paths the way the site generator publishes them:
//!
//! - `guide.md` -> `/guide`
//! - `general/chris_faqs.md` -> `/general/chris_faqs`
//! - `index.md`, `README.md` -> `/`
//! - `blog/README.md` -> `/blog/`
//!
//! Hidden files and directories (including `.vuepress`) are skipped.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Set of URL paths that have a content page behind them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentIndex {
    paths: BTreeSet<String>,
}

impl ContentIndex {
    /// Walk `source_dir` and index every markdown page.
    ///
    /// Returns an empty index if the directory doesn't exist.
    #[must_use]
    pub fn scan(source_dir: &Path) -> Self {
        let mut index = Self::default();
        if source_dir.exists() {
            index.scan_directory(source_dir, "");
        }
        tracing::debug!(
            source_dir = %source_dir.display(),
            pages = index.paths.len(),
            "Content scan completed"
        );
        index
    }

    /// Build an index from already-known URL paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Indexed URL paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Number of indexed pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no page was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether a site link points at an indexed page.
    ///
    /// Ignores `#fragment` and `?query`, accepts the `.html` and `.md` forms
    /// of a page, and `/dir` for a directory index published at `/dir/`.
    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        let path = link.split(['#', '?']).next().unwrap_or_default();
        let path = path
            .strip_suffix(".html")
            .or_else(|| path.strip_suffix(".md"))
            .unwrap_or(path);
        let path = match path
            .strip_suffix("index")
            .or_else(|| path.strip_suffix("README"))
        {
            Some(dir) if dir.ends_with('/') => dir,
            _ => path,
        };

        if self.paths.contains(path) {
            return true;
        }
        !path.ends_with('/') && self.paths.contains(&format!("{path}/"))
    }

    fn scan_directory(&mut self, dir_path: &Path, url_prefix: &str) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                self.scan_directory(&entry.path(), &format!("{url_prefix}/{name}"));
            } else if let Some(stem) = name.strip_suffix(".md") {
                self.paths.insert(page_url(url_prefix, stem));
            }
        }
    }
}

/// URL of a page given its directory URL and file stem.
fn page_url(url_prefix: &str, stem: &str) -> String {
    if stem.eq_ignore_ascii_case("index") || stem.eq_ignore_ascii_case("readme") {
        format!("{url_prefix}/")
    } else {
        format!("{url_prefix}/{stem}")
    }
}
