//! Structural layer matching.
//!
//! Decides which [`Category`] a declaring type belongs to from its package
//! path. `dao` and `service` must be the second package segment
//! (`com.dao.UserDao`); the remaining layers may appear as any package segment
//! after the first (`com.acme.web.controller.UserController`).

use super::rules::Category;

/// Where a layer's package segment may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRule {
    /// Exactly at this zero-based package index.
    At(usize),
    /// At any package index from 1 onward.
    Anywhere,
}

impl SegmentRule {
    fn matches(self, packages: &[&str], segment: &str) -> bool {
        match self {
            Self::At(index) => packages.get(index).is_some_and(|p| *p == segment),
            Self::Anywhere => packages.iter().skip(1).any(|p| *p == segment),
        }
    }
}

/// Ordered list of layer patterns; the first match wins.
#[derive(Debug, Clone)]
pub struct CategoryMatcher {
    patterns: Vec<(Category, String, SegmentRule)>,
}

impl Default for CategoryMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryMatcher {
    /// Matcher with the standard layer patterns.
    pub fn new() -> Self {
        let mut matcher = Self::empty();
        matcher = matcher
            .with_pattern(Category::Dao, "dao", SegmentRule::At(1))
            .with_pattern(Category::Service, "service", SegmentRule::At(1));
        for category in [
            Category::Controller,
            Category::Api,
            Category::Mapper,
            Category::Task,
            Category::Queue,
            Category::Manager,
        ] {
            matcher = matcher.with_pattern(category, category.as_str(), SegmentRule::Anywhere);
        }
        matcher
    }

    /// Matcher with no patterns.
    pub fn empty() -> Self {
        Self { patterns: Vec::new() }
    }

    /// Append a pattern matching `segment` under `rule`.
    pub fn with_pattern(mut self, category: Category, segment: impl Into<String>, rule: SegmentRule) -> Self {
        self.patterns.push((category, segment.into(), rule));
        self
    }

    /// Category of a fully qualified type path such as `com.acme.dao.UserDao`.
    pub fn resolve(&self, type_path: &str) -> Option<Category> {
        let segments: Vec<&str> = type_path.split('.').collect();
        let (_, packages) = segments.split_last()?;
        if packages.is_empty() {
            return None;
        }

        self.patterns
            .iter()
            .find(|(_, segment, rule)| rule.matches(packages, segment))
            .map(|(category, _, _)| *category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dao_must_be_second_segment() {
        let matcher = CategoryMatcher::new();
        assert_eq!(matcher.resolve("com.dao.UserDao"), Some(Category::Dao));
        assert_eq!(matcher.resolve("com.dao.user.UserDao"), Some(Category::Dao));
        assert_eq!(matcher.resolve("com.acme.dao.UserDao"), None);
    }

    #[test]
    fn test_service_must_be_second_segment() {
        let matcher = CategoryMatcher::new();
        assert_eq!(matcher.resolve("com.service.OrderService"), Some(Category::Service));
        assert_eq!(matcher.resolve("com.acme.service.OrderService"), None);
    }

    #[test]
    fn test_anywhere_layers() {
        let matcher = CategoryMatcher::new();
        assert_eq!(
            matcher.resolve("com.acme.web.controller.UserController"),
            Some(Category::Controller)
        );
        assert_eq!(matcher.resolve("com.api.Gateway"), Some(Category::Api));
        assert_eq!(matcher.resolve("a.b.mapper.x.RowMapper"), Some(Category::Mapper));
        assert_eq!(matcher.resolve("a.task.Nightly"), Some(Category::Task));
        assert_eq!(matcher.resolve("a.b.queue.Consumer"), Some(Category::Queue));
        assert_eq!(matcher.resolve("a.manager.CacheManager"), Some(Category::Manager));
    }

    #[test]
    fn test_first_segment_never_matches() {
        let matcher = CategoryMatcher::new();
        assert_eq!(matcher.resolve("controller.x.Thing"), None);
    }

    #[test]
    fn test_type_name_is_not_a_package() {
        let matcher = CategoryMatcher::new();
        assert_eq!(matcher.resolve("com.acme.controller"), None);
        assert_eq!(matcher.resolve("Controller"), None);
    }

    #[test]
    fn test_first_pattern_wins() {
        let matcher = CategoryMatcher::new();
        assert_eq!(matcher.resolve("com.dao.api.UserDao"), Some(Category::Dao));
    }

    #[test]
    fn test_custom_pattern() {
        let matcher = CategoryMatcher::empty().with_pattern(Category::Dao, "repository", SegmentRule::Anywhere);
        assert_eq!(matcher.resolve("com.acme.repository.UserRepository"), Some(Category::Dao));
        assert_eq!(matcher.resolve("com.dao.UserDao"), None);
    }
}
