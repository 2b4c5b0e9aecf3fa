//! Exclusion patterns for analyzed paths.
//!
//! Patterns follow the analyzer's conventions:
//! - a leading `/` matches at any depth: `/gen/` becomes `**/gen/**`
//! - a trailing `/` excludes everything below the directory
//! - a path-like pattern without wildcards excludes the subtree below it
//! - a bare name (no `/`) matches that name at any depth, and everything below it

use super::records::split_class_path;
use super::schema::{EntityRecord, NodeKind};
use crate::utils::config::DEFAULT_EXCLUSIONS;
use crate::utils::error::ParseError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;

/// Compiled set of exclusion globs
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl ExclusionSet {
    /// Compile user patterns together with the default exclusions
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ParseError> {
        let defaults = DEFAULT_EXCLUSIONS.iter().map(|p| p.to_string());
        Self::compile(defaults.chain(patterns.iter().map(|p| p.as_ref().to_string())))
    }

    /// Compile only the given patterns, without defaults
    pub fn without_defaults<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ParseError> {
        Self::compile(patterns.iter().map(|p| p.as_ref().to_string()))
    }

    fn compile(raw: impl Iterator<Item = String>) -> Result<Self, ParseError> {
        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::new();

        for pattern in raw {
            let trimmed = pattern.trim();
            if trimmed.is_empty() {
                continue;
            }
            for normalized in normalize_pattern(trimmed) {
                let glob = GlobBuilder::new(&normalized)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| ParseError::InvalidPattern {
                        pattern: trimmed.to_string(),
                        reason: e.to_string(),
                    })?;
                builder.add(glob);
                patterns.push(normalized);
            }
        }

        let set = builder.build().map_err(|e| ParseError::InvalidPattern {
            pattern: patterns.join(","),
            reason: e.to_string(),
        })?;

        debug!("Compiled exclusions: {:?}", patterns);
        Ok(Self { patterns, set })
    }

    /// Normalized glob patterns in effect
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether a relative path is excluded.
    ///
    /// A class path in `file.(Class)` form is excluded together with its
    /// owning file.
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let path = relative_path.replace('\\', "/");
        self.set.is_match(owning_file(&path)) || self.set.is_match(&path)
    }

    /// Whether a record is excluded, matching classes by their owning file
    pub fn is_record_excluded(&self, record: &EntityRecord) -> bool {
        if record.kind != NodeKind::Class {
            return self.is_excluded(&record.relative_path);
        }
        match split_class_path(&record.relative_path) {
            Ok(class) => {
                self.is_excluded(&class.file_segments.join("/"))
                    || self.is_excluded(&record.relative_path)
            }
            Err(_) => self.is_excluded(&record.relative_path),
        }
    }

    /// Drop excluded records, returning the kept ones
    pub fn filter(&self, records: Vec<EntityRecord>) -> Vec<EntityRecord> {
        if self.is_empty() {
            return records;
        }

        let before = records.len();
        let kept: Vec<EntityRecord> = records
            .into_iter()
            .filter(|record| !self.is_record_excluded(record))
            .collect();

        debug!("Excluded {} of {} records", before - kept.len(), before);
        kept
    }
}

/// File part of a `file.(Class)` path, or the path itself
fn owning_file(path: &str) -> &str {
    path.strip_suffix(')')
        .and_then(|p| p.rfind(".("))
        .map_or(path, |open| &path[..open])
}

/// Turn one user pattern into the globs it stands for
fn normalize_pattern(pattern: &str) -> Vec<String> {
    let mut clean = pattern.replace('\\', "/");

    if !clean.contains('/') {
        return vec![format!("**/{}", clean), format!("**/{}/**", clean)];
    }

    if clean.starts_with('/') {
        clean = format!("**{}", clean);
    }
    if clean.ends_with('/') {
        clean.push_str("**");
    } else if !clean.contains('*') {
        clean.push_str("/**");
    }

    vec![clean]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Metrics;

    #[test]
    fn test_normalize_pattern() {
        assert_eq!(normalize_pattern("/gen/"), vec!["**/gen/**"]);
        assert_eq!(normalize_pattern("internal/mocks"), vec!["internal/mocks/**"]);
        assert_eq!(normalize_pattern("**/*_test.go"), vec!["**/*_test.go"]);
        assert_eq!(normalize_pattern("testdata"), vec!["**/testdata", "**/testdata/**"]);
    }

    #[test]
    fn test_default_excludes_vendor() {
        let set = ExclusionSet::new::<&str>(&[]).unwrap();
        assert!(set.is_excluded("vendor/github.com/x/y.go"));
        assert!(set.is_excluded("cmd/vendor/z.go.(Z)"));
        assert!(!set.is_excluded("cmd/main.go"));
    }

    #[test]
    fn test_without_defaults_keeps_vendor() {
        let set = ExclusionSet::without_defaults::<&str>(&[]).unwrap();
        assert!(!set.is_excluded("vendor/a.go"));
    }

    #[test]
    fn test_wildcard_respects_separator() {
        let set = ExclusionSet::without_defaults(&["*.pb.go"]).unwrap();
        assert!(set.is_excluded("api/v1/service.pb.go"));
        assert!(!set.is_excluded("api/v1/service.go"));
    }

    #[test]
    fn test_filter_records() {
        let set = ExclusionSet::new(&["/gen/"]).unwrap();
        let records = vec![
            EntityRecord::new("gen/a.go", NodeKind::File, Metrics::default()),
            EntityRecord::new("src/gen/b.go", NodeKind::File, Metrics::default()),
            EntityRecord::new("src/c.go", NodeKind::File, Metrics::default()),
        ];

        let kept = set.filter(records);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].relative_path, "src/c.go");
    }

    #[test]
    fn test_classes_follow_their_file() {
        let set = ExclusionSet::without_defaults(&["*_test.go"]).unwrap();
        assert!(set.is_excluded("pkg/a_test.go"));
        assert!(set.is_excluded("pkg/a_test.go.(Suite)"));
        assert!(!set.is_excluded("pkg/a.go.(Server)"));

        let records = vec![
            EntityRecord::new("pkg/a_test.go", NodeKind::File, Metrics::default()),
            EntityRecord::new("pkg/a_test.go.(Suite)", NodeKind::Class, Metrics::default()),
            EntityRecord::new("pkg/b_test.go/Helper", NodeKind::Class, Metrics::default()),
            EntityRecord::new("pkg/a.go", NodeKind::File, Metrics::default()),
            EntityRecord::new("pkg/a.go.(Server)", NodeKind::Class, Metrics::default()),
        ];

        let kept: Vec<String> = set
            .filter(records)
            .into_iter()
            .map(|record| record.relative_path)
            .collect();

        assert_eq!(kept, vec!["pkg/a.go", "pkg/a.go.(Server)"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            ExclusionSet::without_defaults(&["src/[a"]),
            Err(ParseError::InvalidPattern { .. })
        ));
    }
}
