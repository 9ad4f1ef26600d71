//! Deny-list and candidate rules for the directory walk.

use crate::config::Config;
use crate::error::Result;
use crate::program::SOURCE_EXTENSION;
use globset::GlobSet;
use std::collections::HashSet;
use std::path::{Component, Path};

/// Prefix of files that are package markers or dunder modules, never programs.
const RESERVED_PREFIX: &str = "__";

/// Decides which directories are walked and which files are inspected.
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignore_dirs: HashSet<String>,
    ignore_globs: GlobSet,
    skip_hidden_dirs: bool,
}

impl PathFilter {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            ignore_dirs: config.ignore_dirs.iter().cloned().collect(),
            ignore_globs: config.ignore_globset()?,
            skip_hidden_dirs: config.skip_hidden_dirs,
        })
    }

    /// Whether a directory with this name is pruned from the walk.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        (self.skip_hidden_dirs && name.starts_with('.'))
            || self.ignore_dirs.contains(name)
            || self.ignore_globs.is_match(name)
    }

    /// Whether a file with this name may be a program.
    pub fn is_candidate_file(&self, name: &str) -> bool {
        !name.starts_with(RESERVED_PREFIX)
            && Path::new(name)
                .extension()
                .is_some_and(|ext| ext == SOURCE_EXTENSION)
    }

    /// Whether any directory between the walk root and `relative` is pruned.
    ///
    /// `relative` is a file path relative to the walk root; its final
    /// component (the file name) is not checked.
    pub fn has_ignored_segment(&self, relative: &Path) -> bool {
        let Some(parent) = relative.parent() else {
            return false;
        };
        parent.components().any(|component| match component {
            Component::Normal(name) => self.is_ignored_dir(&name.to_string_lossy()),
            _ => false,
        })
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            ignore_dirs: Config::default().ignore_dirs.into_iter().collect(),
            ignore_globs: GlobSet::empty(),
            skip_hidden_dirs: true,
        }
    }
}
