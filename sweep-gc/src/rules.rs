//! Exclusion rules protecting output paths from removal.
//!
//! The syntax follows `.gitignore` loosely:
//!
//! - `/pattern` is anchored at the output root and matched against the whole
//!   relative path (`/static/*`, `/CNAME`),
//! - `pattern/` only matches directories, which are then never entered
//!   (`.git/`, `drafts/`),
//! - anything else is matched against basenames anywhere (`*.bak`, `draft*`).
//!
//! An anchored pattern with a trailing slash (`/assets/`) is anchored and
//! directory-only. Directories are tested with a trailing `/` appended, so
//! `draft*` and `/static/*` protect directories while `old` and `/static`
//! only match files. Globs use shell semantics where `*` also matches `/`.

use std::path::{Component, Path};

use globset::{GlobBuilder, GlobMatcher};

/// What kind of directory entry is being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Glob(GlobMatcher),
    // Not a valid glob; compared as plain text.
    Literal,
}

impl Pattern {
    fn new(pattern: &str) -> Self {
        let matcher = match compile(pattern) {
            Ok(glob) => Matcher::Glob(glob),
            // An unclosed `[` is an ordinary character in shell globs.
            Err(e) => match compile(&escape_unclosed_brackets(pattern)) {
                Ok(glob) => Matcher::Glob(glob),
                Err(_) => {
                    tracing::warn!(
                        "ignore pattern '{}' is not a valid glob ({}), matching it literally",
                        pattern,
                        e
                    );
                    Matcher::Literal
                }
            },
        };
        Self {
            source: pattern.to_string(),
            matcher,
        }
    }

    /// The pattern text, without any leading or trailing `/` markers.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn is_match(&self, candidate: &str) -> bool {
        match &self.matcher {
            Matcher::Glob(glob) => glob.is_match(candidate),
            Matcher::Literal => self.source == candidate,
        }
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(false)
        .build()
        .map(|glob| glob.compile_matcher())
}

/// Rewrite every `[` that has no later `]` as the class `[[]`.
fn escape_unclosed_brackets(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for (i, c) in pattern.char_indices() {
        if c == '[' && !pattern[i + 1..].contains(']') {
            escaped.push_str("[[]");
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// A single parsed exclusion pattern.
#[derive(Debug, Clone)]
pub enum ExclusionRule {
    /// Leading `/`: matched against the path relative to the output root.
    Anchored { pattern: Pattern, dir_only: bool },
    /// Trailing `/`: matched against directory names.
    DirOnly(Pattern),
    /// Matched against file names, and directory names followed by `/`,
    /// anywhere in the tree.
    Basename(Pattern),
}

impl ExclusionRule {
    /// Parse one pattern. Never fails; see [`ExclusionRules`].
    pub fn parse(pattern: &str) -> Self {
        if let Some(rest) = pattern.strip_prefix('/') {
            match rest.strip_suffix('/') {
                Some(body) => Self::Anchored {
                    pattern: Pattern::new(body),
                    dir_only: true,
                },
                None => Self::Anchored {
                    pattern: Pattern::new(rest),
                    dir_only: false,
                },
            }
        } else if let Some(body) = pattern.strip_suffix('/') {
            Self::DirOnly(Pattern::new(body))
        } else {
            Self::Basename(Pattern::new(pattern))
        }
    }

    /// Test an entry given its path relative to the output root.
    pub fn matches(&self, relative: &Path, kind: EntryKind) -> bool {
        match (self, kind) {
            (Self::Anchored { pattern, dir_only }, EntryKind::File) => {
                !dir_only && pattern.is_match(&slash_path(relative))
            }
            (Self::Anchored { pattern, dir_only: true }, EntryKind::Dir) => {
                pattern.is_match(&slash_path(relative))
            }
            (Self::Anchored { pattern, dir_only: false }, EntryKind::Dir) => {
                pattern.is_match(&format!("{}/", slash_path(relative)))
            }
            (Self::DirOnly(pattern), EntryKind::Dir) => pattern.is_match(&basename(relative)),
            (Self::DirOnly(_), EntryKind::File) => false,
            (Self::Basename(pattern), EntryKind::File) => pattern.is_match(&basename(relative)),
            (Self::Basename(pattern), EntryKind::Dir) => {
                pattern.is_match(&format!("{}/", basename(relative)))
            }
        }
    }
}

/// The ordered set of exclusion rules from `output_ignore`.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRules {
    /// Parse every pattern once, keeping their order.
    pub fn parse<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rules: patterns
                .into_iter()
                .map(|p| ExclusionRule::parse(p.as_ref()))
                .collect(),
        }
    }

    /// Whether the entry at `relative` (relative to the output root) is
    /// protected. The first matching rule wins.
    pub fn is_excluded(&self, relative: &Path, kind: EntryKind) -> bool {
        self.rules.iter().any(|rule| rule.matches(relative, kind))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn basename(relative: &Path) -> String {
    relative
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Render a relative path with `/` separators regardless of platform.
fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excluded(patterns: &[&str], path: &str, kind: EntryKind) -> bool {
        ExclusionRules::parse(patterns).is_excluded(Path::new(path), kind)
    }

    #[test]
    fn test_parse_tags_rule_kinds() {
        assert!(matches!(
            ExclusionRule::parse("/CNAME"),
            ExclusionRule::Anchored { dir_only: false, .. }
        ));
        assert!(matches!(
            ExclusionRule::parse("/assets/"),
            ExclusionRule::Anchored { dir_only: true, .. }
        ));
        assert!(matches!(ExclusionRule::parse(".git/"), ExclusionRule::DirOnly(_)));
        assert!(matches!(ExclusionRule::parse("*.bak"), ExclusionRule::Basename(_)));
    }

    #[test]
    fn test_basename_rule_matches_files_anywhere() {
        assert!(excluded(&["*.bak"], "d.bak", EntryKind::File));
        assert!(excluded(&["*.bak"], "deep/er/d.bak", EntryKind::File));
        assert!(!excluded(&["*.bak"], "d.html", EntryKind::File));
    }

    #[test]
    fn test_basename_rule_matches_directories_with_trailing_slash() {
        assert!(excluded(&["draft*"], "drafts", EntryKind::Dir));
        assert!(excluded(&["draft*"], "blog/drafts", EntryKind::Dir));
        assert!(excluded(&["*"], "anything", EntryKind::Dir));
        assert!(!excluded(&["old"], "old", EntryKind::Dir));
        assert!(excluded(&["old"], "old", EntryKind::File));
    }

    #[test]
    fn test_dir_rule_only_matches_directories() {
        assert!(excluded(&[".git/"], ".git", EntryKind::Dir));
        assert!(excluded(&[".git/"], "nested/.git", EntryKind::Dir));
        assert!(!excluded(&[".git/"], ".git", EntryKind::File));
    }

    #[test]
    fn test_anchored_rule_is_relative_to_output_root() {
        assert!(excluded(&["/CNAME"], "CNAME", EntryKind::File));
        assert!(!excluded(&["/CNAME"], "blog/CNAME", EntryKind::File));
    }

    #[test]
    fn test_anchored_rule_without_slash_does_not_protect_directory() {
        assert!(!excluded(&["/static"], "static", EntryKind::Dir));
        assert!(excluded(&["/static"], "static", EntryKind::File));
        assert!(excluded(&["/static/*"], "static", EntryKind::Dir));
    }

    #[test]
    fn test_anchored_star_crosses_separators() {
        assert!(excluded(&["/static/*"], "static/css/site.css", EntryKind::File));
        assert!(!excluded(&["/static/*"], "blog/static/site.css", EntryKind::File));
    }

    #[test]
    fn test_anchored_dir_rule() {
        assert!(excluded(&["/assets/"], "assets", EntryKind::Dir));
        assert!(!excluded(&["/assets/"], "blog/assets", EntryKind::Dir));
        assert!(!excluded(&["/assets/"], "assets", EntryKind::File));
    }

    #[test]
    fn test_unclosed_bracket_is_a_literal_character() {
        assert!(excluded(&["[draft"], "[draft", EntryKind::File));
        assert!(!excluded(&["[draft"], "d", EntryKind::File));
        assert!(excluded(&["[draft*"], "[drafts", EntryKind::File));
        assert!(!excluded(&["[draft*"], "drafts", EntryKind::File));
    }

    #[test]
    fn test_escape_unclosed_brackets_keeps_closed_classes() {
        assert_eq!(escape_unclosed_brackets("[draft*"), "[[]draft*");
        assert_eq!(escape_unclosed_brackets("[ab]x["), "[ab]x[[]");
        assert_eq!(escape_unclosed_brackets("*.bak"), "*.bak");
    }

    #[test]
    fn test_any_rule_matching_excludes() {
        let rules = ExclusionRules::parse(["*.bak", "/keep.html", "tmp/"]);

        assert_eq!(rules.len(), 3);
        assert!(rules.is_excluded(Path::new("keep.html"), EntryKind::File));
        assert!(rules.is_excluded(Path::new("a/b/tmp"), EntryKind::Dir));
        assert!(!rules.is_excluded(Path::new("index.html"), EntryKind::File));
    }

    #[test]
    fn test_no_rules_excludes_nothing() {
        let rules = ExclusionRules::default();
        assert!(rules.is_empty());
        assert!(!rules.is_excluded(Path::new("anything"), EntryKind::File));
    }
}
