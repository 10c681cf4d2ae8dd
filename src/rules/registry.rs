use std::collections::HashSet;
use std::sync::Arc;

use crate::rules::builtin::{LineLengthRule, TabCharacterRule, TrailingWhitespaceRule};
use crate::rules::Rule;

/// The ordered, de-duplicated active rule set for a run.
///
/// Declaration order is significant: it is the tie-break for violations
/// reported on the same line. Registration de-duplicates by rule name;
/// the first registration wins.
#[derive(Debug, Default, Clone)]
pub struct RuleSet {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in text rules.
    pub fn with_builtin_rules() -> Self {
        let mut set = Self::new();
        set.register(Arc::new(LineLengthRule::default()));
        set.register(Arc::new(TrailingWhitespaceRule));
        set.register(Arc::new(TabCharacterRule));
        set
    }

    /// Register a rule, ignoring it if one with the same name exists.
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        if self.contains(rule.name()) {
            return;
        }
        self.rules.push(rule);
    }

    /// All rules in declaration order.
    pub fn all(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Get a rule by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.iter().find(|r| r.name() == name).cloned()
    }

    /// Check if a rule exists.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name() == name)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Create a new set containing only rules with the given names,
    /// preserving this set's order. Unknown names are silently ignored.
    pub fn filter_by_names(&self, names: &[String]) -> Self {
        let name_set: HashSet<&str> = names.iter().map(|s| s.as_str()).collect();
        let rules = self
            .rules
            .iter()
            .filter(|r| name_set.contains(r.name()))
            .cloned()
            .collect();
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::parse::ParsedSource;
    use crate::rules::finding::RawFinding;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct NamedRule(&'static str);

    #[async_trait]
    impl Rule for NamedRule {
        fn name(&self) -> &str {
            self.0
        }
        fn priority(&self) -> u8 {
            3
        }
        async fn evaluate(&self, _file: &ParsedSource) -> Result<Vec<RawFinding>, RuleError> {
            Ok(vec![])
        }
    }

    // ==================== Registration Tests ====================

    #[test]
    fn register_adds_single_rule() {
        let mut set = RuleSet::new();
        set.register(Arc::new(NamedRule("A")));
        assert_eq!(set.len(), 1);
        assert!(set.contains("A"));
    }

    #[test]
    fn register_preserves_order() {
        let mut set = RuleSet::new();
        set.register(Arc::new(NamedRule("B")));
        set.register(Arc::new(NamedRule("A")));
        set.register(Arc::new(NamedRule("C")));

        let names: Vec<&str> = set.all().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn register_deduplicates_by_name_first_wins() {
        let mut set = RuleSet::new();
        set.register(Arc::new(NamedRule("A")));
        set.register(Arc::new(NamedRule("A")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_set_reports_empty() {
        let set = RuleSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.all().is_empty());
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn get_returns_registered_rule() {
        let mut set = RuleSet::new();
        set.register(Arc::new(NamedRule("A")));
        assert_eq!(set.get("A").unwrap().name(), "A");
        assert!(set.get("missing").is_none());
    }

    // ==================== filter_by_names Tests ====================

    #[test]
    fn filter_by_names_keeps_order_and_drops_unknown() {
        let mut set = RuleSet::new();
        set.register(Arc::new(NamedRule("A")));
        set.register(Arc::new(NamedRule("B")));
        set.register(Arc::new(NamedRule("C")));

        let filtered =
            set.filter_by_names(&["C".to_string(), "A".to_string(), "nope".to_string()]);
        let names: Vec<&str> = filtered.all().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    // ==================== Builtin Rules Tests ====================

    #[test]
    fn with_builtin_rules_registers_the_text_rules() {
        let set = RuleSet::with_builtin_rules();
        assert!(set.contains("LineLength"));
        assert!(set.contains("TrailingWhitespace"));
        assert!(set.contains("TabCharacter"));
    }
}
