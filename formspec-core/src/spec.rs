// Form specification

use crate::{Form, Rule, RuleFn, ValidationResult};
use formspec_log::debug;

/// Ordered set of field rules describing one form.
///
/// Rules run in the order they were attached, and errors are reported in
/// the same order. Rules are only ever appended.
///
/// `Clone` derives a new specification: the rule list is copied, each rule's
/// flags and messages are copied, and rule functions and filters are
/// shared. Attaching to, or reconfiguring a rule of, one copy never affects
/// the other.
///
/// ```
/// use formspec_core::{rules, Formspec, FormData};
///
/// let mut sign_in = Formspec::new();
/// sign_in.rule("password", rules::required());
///
/// let mut sign_up = sign_in.clone();
/// sign_up.rule("password_confirmation", rules::equal_to_field("password"));
///
/// let form = FormData::new().with("password", "hoge");
/// assert!(sign_in.validate(&form).ok);
/// assert!(!sign_up.validate(&form).ok);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Formspec {
    rules: Vec<Rule>,
}

impl Formspec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a rule for `field` and return it for further configuration.
    ///
    /// ```
    /// use formspec_core::{rules, Formspec};
    ///
    /// let mut spec = Formspec::new();
    /// spec.rule("age", rules::int()).message("must be integer. ok?").allow_blank();
    /// spec.rule("nick", rules::required()).full_message("Please enter your cool nick.");
    /// assert_eq!(spec.len(), 2);
    /// ```
    pub fn rule(&mut self, field: impl Into<String>, rule_fn: RuleFn) -> &mut Rule {
        self.push(Rule::new(field, rule_fn))
    }

    /// Register an already built rule and return it.
    pub fn push(&mut self, rule: Rule) -> &mut Rule {
        debug!(target: "formspec::spec", "attached rule #{} for field '{}'", self.rules.len(), rule.field());
        let index = self.rules.len();
        self.rules.push(rule);
        &mut self.rules[index]
    }

    /// Builder-style `push`
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    /// Validate a form against every rule.
    ///
    /// Never stops early: every failing rule contributes one error.
    pub fn validate(&self, form: &dyn Form) -> ValidationResult {
        let errors: Vec<_> = self
            .rules
            .iter()
            .filter_map(|rule| rule.call(form).err())
            .collect();

        debug!(
            target: "formspec::spec",
            "validated {} rules, {} failed",
            self.rules.len(),
            errors.len()
        );

        ValidationResult::from_errors(errors)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Mutable access to an attached rule by position.
    pub fn rule_mut(&mut self, index: usize) -> Option<&mut Rule> {
        self.rules.get_mut(index)
    }

    /// Field names in attachment order, one entry per rule.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Extend<Rule> for Formspec {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        for rule in iter {
            self.push(rule);
        }
    }
}

impl FromIterator<Rule> for Formspec {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut spec = Self::new();
        spec.extend(iter);
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormData, rule_fn, rules};

    #[test]
    fn test_basic() {
        let mut spec = Formspec::new();
        spec.rule("name", rules::required());
        spec.rule("nick", rules::required())
            .full_message("Please enter your cool nick.");
        spec.rule("goodpoint", rules::required())
            .message("must not be blank.");

        let result = spec.validate(&FormData::new());

        assert!(!result.ok);
        assert_eq!(
            result.messages(),
            vec![
                "name is required.",
                "Please enter your cool nick.",
                "goodpoint must not be blank."
            ]
        );
    }

    #[test]
    fn test_empty_spec_passes() {
        let result = Formspec::new().validate(&FormData::new());
        assert!(result.ok);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_multiple_rules_on_one_field_all_report() {
        let mut spec = Formspec::new();
        spec.rule("age", rules::int());
        spec.rule("age", rules::min_len(3));

        let result = spec.validate(&FormData::new().with("age", "x"));
        assert_eq!(result.field_errors("age").len(), 2);
    }

    #[test]
    fn test_clone_isolation() {
        let mut base = Formspec::new();
        base.rule("password", rules::required())
            .full_message("password is required");

        let mut derived = base.clone();
        derived.rule("password_confirmation", rules::required());
        derived.rule("password_confirmation", rules::equal_to_field("password"))
            .allow_blank();

        assert_eq!(base.len(), 1);
        assert_eq!(derived.len(), 3);
        assert_eq!(base.fields().collect::<Vec<_>>(), vec!["password"]);

        let form = FormData::new().with("password", "hoge");
        assert!(base.validate(&form).ok);

        let result = derived.validate(&form);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "password_confirmation");

        let mismatched = form.clone().with("password_confirmation", "hoge_different");
        assert!(!derived.validate(&mismatched).ok);

        let matched = form.with("password_confirmation", "hoge");
        assert!(derived.validate(&matched).ok);
    }

    #[test]
    fn test_reconfiguring_cloned_rule_leaves_source_alone() {
        let mut base = Formspec::new();
        base.rule("name", rules::required());

        let mut derived = base.clone();
        derived.rule_mut(0).unwrap().allow_blank();

        assert!(!base.validate(&FormData::new()).ok);
        assert!(derived.validate(&FormData::new()).ok);
    }

    #[test]
    fn test_push_and_collect() {
        let spec: Formspec = vec![
            Rule::new("a", rules::required()),
            Rule::new("b", rule_fn(|_, _| Ok(()))),
        ]
        .into_iter()
        .collect();

        assert_eq!(spec.fields().collect::<Vec<_>>(), vec!["a", "b"]);

        let spec = spec.with_rule(Rule::new("c", rules::required()));
        assert_eq!(spec.len(), 3);
    }
}
