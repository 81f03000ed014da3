//! Directive resolution
//!
//! Reconciles a field's existing tags with a [`DirectiveSet`]. Directives are
//! applied in a fixed order: delete, then add, then overwrite. A key deleted
//! first can therefore be re-added in the same run, and add/overwrite always
//! see the post-delete state.
//!
//! Add and overwrite are deliberately asymmetric: add creates missing keys,
//! overwrite only ever touches keys that already exist.

use tracing::{debug, warn};

use super::DirectiveSet;
use crate::case::CaseStyle;
use crate::tags::{TagMap, is_valid_value};
use crate::ui::Prompt;

/// How ambiguous updates are decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionPolicy {
    /// Never prompt; add never replaces an existing value
    #[default]
    Silent,
    /// Ask before ambiguous changes and for values of new keys
    Interactive,
    /// Apply every change without asking
    Forced,
}

impl InteractionPolicy {
    /// Build the policy from CLI flags. `force` wins over `interactive`.
    #[must_use]
    pub const fn from_flags(interactive: bool, force: bool) -> Self {
        if force {
            Self::Forced
        } else if interactive {
            Self::Interactive
        } else {
            Self::Silent
        }
    }
}

/// Configuration for one resolution, passed explicitly rather than read from
/// global state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    pub case_style: CaseStyle,
    pub policy: InteractionPolicy,
}

impl ResolveOptions {
    #[must_use]
    pub const fn new(case_style: CaseStyle, policy: InteractionPolicy) -> Self {
        Self { case_style, policy }
    }
}

/// Result of resolving directives for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub tags: TagMap,
    pub changed: bool,
}

/// Apply `directives` to `tags` for the field named `identifier`.
///
/// `prompt` is only consulted under [`InteractionPolicy::Interactive`].
/// Resolution never fails; unreadable input counts as an empty answer.
///
/// # Examples
/// ```
/// use gotag::directives::{DirectiveSet, InteractionPolicy, ResolveOptions, resolve};
/// use gotag::case::CaseStyle;
/// use gotag::tags::{TagMap, encode};
/// use gotag::ui::ScriptedPrompt;
///
/// let directives = DirectiveSet::from_flags(&["json".into()], &[], &[]).unwrap();
/// let options = ResolveOptions::new(CaseStyle::Snake, InteractionPolicy::Forced);
/// let resolution = resolve(TagMap::new(), &directives, "UserID", &options, &mut ScriptedPrompt::closed());
///
/// assert!(resolution.changed);
/// assert_eq!(encode(&resolution.tags), r#"json:"user_id""#);
/// ```
pub fn resolve(
    mut tags: TagMap,
    directives: &DirectiveSet,
    identifier: &str,
    options: &ResolveOptions,
    prompt: &mut dyn Prompt,
) -> Resolution {
    let default_value = options.case_style.default_value(identifier);
    let mut changed = false;

    changed |= apply_deletes(&mut tags, &directives.delete, identifier);
    changed |= apply_adds(&mut tags, &directives.add, identifier, &default_value, options.policy, prompt);

    for (key, explicit) in &directives.overwrite {
        changed |= apply_overwrite(
            &mut tags,
            key,
            explicit.as_deref(),
            identifier,
            &default_value,
            options.policy,
            prompt,
        );
    }

    Resolution { tags, changed }
}

fn apply_deletes(tags: &mut TagMap, keys: &[String], identifier: &str) -> bool {
    let mut changed = false;
    for key in keys {
        if tags.remove(key).is_some() {
            debug!(field = identifier, key = key.as_str(), "deleted tag");
            changed = true;
        }
    }
    changed
}

fn apply_adds(
    tags: &mut TagMap,
    keys: &[String],
    identifier: &str,
    default_value: &str,
    policy: InteractionPolicy,
    prompt: &mut dyn Prompt,
) -> bool {
    let mut changed = false;

    for key in keys {
        match tags.get(key) {
            None => {
                let value = if policy == InteractionPolicy::Interactive {
                    let answer = prompt.ask(
                        &format!("Enter value for new tag '{key}' in field '{identifier}'"),
                        default_value,
                    );
                    if answer.is_empty() {
                        default_value.to_string()
                    } else if !is_valid_value(&answer) {
                        warn!(
                            field = identifier,
                            key = key.as_str(),
                            answer = answer.as_str(),
                            "tag values cannot contain '\"', using the default"
                        );
                        default_value.to_string()
                    } else {
                        answer
                    }
                } else {
                    default_value.to_string()
                };

                debug!(field = identifier, key = key.as_str(), value = value.as_str(), "added tag");
                tags.insert(key.as_str(), value);
                changed = true;
            }
            Some(current) if current == default_value => {}
            Some(current) => {
                let update = match policy {
                    InteractionPolicy::Forced => true,
                    InteractionPolicy::Interactive => prompt.confirm(&format!(
                        "Field '{identifier}': tag '{key}' value is '{current}'. Update to '{default_value}'?"
                    )),
                    InteractionPolicy::Silent => false,
                };

                if update {
                    debug!(field = identifier, key = key.as_str(), value = default_value, "reset tag to default");
                    tags.insert(key.as_str(), default_value);
                    changed = true;
                }
            }
        }
    }

    changed
}

fn apply_overwrite(
    tags: &mut TagMap,
    key: &str,
    explicit: Option<&str>,
    identifier: &str,
    default_value: &str,
    policy: InteractionPolicy,
    prompt: &mut dyn Prompt,
) -> bool {
    let Some(current) = tags.get(key) else {
        return false;
    };

    let target = explicit.unwrap_or(default_value);

    if policy == InteractionPolicy::Interactive
        && explicit.is_none()
        && current != default_value
        && !prompt.confirm(&format!(
            "Field '{identifier}': tag '{key}' value is '{current}'. Overwrite with default '{default_value}'?"
        ))
    {
        return false;
    }

    if current == target {
        return false;
    }

    debug!(field = identifier, key, value = target, "overwrote tag");
    tags.insert(key, target);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{decode, encode};
    use crate::ui::ScriptedPrompt;

    fn directives(add: &[&str], delete: &[&str], overwrite: &[&str]) -> DirectiveSet {
        let owned = |values: &[&str]| values.iter().map(ToString::to_string).collect::<Vec<_>>();
        DirectiveSet::from_flags(&owned(add), &owned(delete), &owned(overwrite)).unwrap()
    }

    fn run(
        tag: &str,
        set: &DirectiveSet,
        identifier: &str,
        policy: InteractionPolicy,
        prompt: &mut ScriptedPrompt,
    ) -> (String, bool) {
        let options = ResolveOptions::new(CaseStyle::LowerCamel, policy);
        let resolution = resolve(decode(tag), set, identifier, &options, prompt);
        (encode(&resolution.tags), resolution.changed)
    }

    fn forced(tag: &str, set: &DirectiveSet, identifier: &str) -> (String, bool) {
        run(tag, set, identifier, InteractionPolicy::Forced, &mut ScriptedPrompt::closed())
    }

    #[test]
    fn test_policy_from_flags() {
        assert_eq!(InteractionPolicy::from_flags(false, false), InteractionPolicy::Silent);
        assert_eq!(InteractionPolicy::from_flags(true, false), InteractionPolicy::Interactive);
        assert_eq!(InteractionPolicy::from_flags(false, true), InteractionPolicy::Forced);
        assert_eq!(InteractionPolicy::from_flags(true, true), InteractionPolicy::Forced);
    }

    #[test]
    fn test_add_to_untagged_field() {
        let (tag, changed) = forced("", &directives(&["json"], &[], &[]), "Name");
        assert_eq!(tag, r#"json:"name""#);
        assert!(changed);
    }

    #[test]
    fn test_add_multiple_is_sorted() {
        let (tag, changed) = forced("", &directives(&["json", "xml", "db"], &[], &[]), "Name");
        assert_eq!(tag, r#"db:"name" json:"name" xml:"name""#);
        assert!(changed);
    }

    #[test]
    fn test_add_is_idempotent() {
        let set = directives(&["json"], &[], &[]);
        let (first, _) = forced("", &set, "Name");
        let (second, changed) = forced(&first, &set, "Name");
        assert_eq!(first, second);
        assert!(!changed);
    }

    #[test]
    fn test_add_existing_default_never_prompts() {
        let set = directives(&["json"], &[], &[]);
        for policy in [
            InteractionPolicy::Silent,
            InteractionPolicy::Interactive,
            InteractionPolicy::Forced,
        ] {
            let mut prompt = ScriptedPrompt::new(["y"]);
            let (tag, changed) = run(r#"json:"name""#, &set, "Name", policy, &mut prompt);
            assert_eq!(tag, r#"json:"name""#);
            assert!(!changed);
            assert!(prompt.questions.is_empty());
        }
    }

    #[test]
    fn test_add_existing_different_value_silent_keeps_value() {
        let (tag, changed) = run(
            r#"json:"custom""#,
            &directives(&["json"], &[], &[]),
            "Name",
            InteractionPolicy::Silent,
            &mut ScriptedPrompt::closed(),
        );
        assert_eq!(tag, r#"json:"custom""#);
        assert!(!changed);
    }

    #[test]
    fn test_add_existing_different_value_forced_resets() {
        let (tag, changed) = forced(r#"json:"custom""#, &directives(&["json"], &[], &[]), "Name");
        assert_eq!(tag, r#"json:"name""#);
        assert!(changed);
    }

    #[test]
    fn test_add_existing_different_value_interactive_confirmed() {
        let mut prompt = ScriptedPrompt::new(["yes"]);
        let (tag, changed) = run(
            r#"json:"custom""#,
            &directives(&["json"], &[], &[]),
            "Name",
            InteractionPolicy::Interactive,
            &mut prompt,
        );
        assert_eq!(tag, r#"json:"name""#);
        assert!(changed);
        assert_eq!(prompt.questions.len(), 1);
        assert!(prompt.questions[0].contains("'custom'"));
    }

    #[test]
    fn test_add_existing_different_value_interactive_declined() {
        let mut prompt = ScriptedPrompt::new(["n"]);
        let (tag, changed) = run(
            r#"json:"custom""#,
            &directives(&["json"], &[], &[]),
            "Name",
            InteractionPolicy::Interactive,
            &mut prompt,
        );
        assert_eq!(tag, r#"json:"custom""#);
        assert!(!changed);
    }

    #[test]
    fn test_add_missing_interactive_uses_answer() {
        let mut prompt = ScriptedPrompt::new(["full_name"]);
        let (tag, changed) = run(
            "",
            &directives(&["json"], &[], &[]),
            "Name",
            InteractionPolicy::Interactive,
            &mut prompt,
        );
        assert_eq!(tag, r#"json:"full_name""#);
        assert!(changed);
        assert!(prompt.questions[0].contains("'json'"));
    }

    #[test]
    fn test_add_missing_interactive_empty_answer_uses_default() {
        let mut prompt = ScriptedPrompt::new([""]);
        let (tag, _) = run(
            "",
            &directives(&["json"], &[], &[]),
            "Name",
            InteractionPolicy::Interactive,
            &mut prompt,
        );
        assert_eq!(tag, r#"json:"name""#);
    }

    #[test]
    fn test_add_missing_interactive_quote_in_answer_uses_default() {
        let mut prompt = ScriptedPrompt::new([r#"a"b"#]);
        let (tag, changed) = run(
            "",
            &directives(&["json"], &[], &[]),
            "Name",
            InteractionPolicy::Interactive,
            &mut prompt,
        );
        assert_eq!(tag, r#"json:"name""#);
        assert!(changed);
        assert_eq!(decode(&tag).get("json"), Some("name"));
    }

    #[test]
    fn test_add_missing_interactive_closed_input_uses_default() {
        let (tag, changed) = run(
            "",
            &directives(&["json", "xml"], &[], &[]),
            "UserName",
            InteractionPolicy::Interactive,
            &mut ScriptedPrompt::closed(),
        );
        assert_eq!(tag, r#"json:"userName" xml:"userName""#);
        assert!(changed);
    }

    #[test]
    fn test_forced_never_prompts() {
        let mut prompt = ScriptedPrompt::new(["other"]);
        run(
            r#"json:"custom" xml:"custom""#,
            &directives(&["json", "db"], &[], &["xml"]),
            "Name",
            InteractionPolicy::Forced,
            &mut prompt,
        );
        assert!(prompt.questions.is_empty());
    }

    #[test]
    fn test_delete_removes_key() {
        let (tag, changed) = forced(r#"json:"age" xml:"age""#, &directives(&[], &["xml"], &[]), "Age");
        assert_eq!(tag, r#"json:"age""#);
        assert!(changed);
    }

    #[test]
    fn test_delete_absent_key_is_unchanged() {
        let (tag, changed) = forced(r#"json:"age""#, &directives(&[], &["xml"], &[]), "Age");
        assert_eq!(tag, r#"json:"age""#);
        assert!(!changed);
    }

    #[test]
    fn test_delete_last_key_empties_tag() {
        let (tag, changed) = forced(r#"json:"age""#, &directives(&[], &["json"], &[]), "Age");
        assert_eq!(tag, "");
        assert!(changed);
    }

    #[test]
    fn test_delete_then_add_recreates_with_default() {
        let (tag, changed) = run(
            r#"json:"custom""#,
            &directives(&["json"], &["json"], &[]),
            "Name",
            InteractionPolicy::Silent,
            &mut ScriptedPrompt::closed(),
        );
        assert_eq!(tag, r#"json:"name""#);
        assert!(changed);
    }

    #[test]
    fn test_overwrite_with_explicit_value() {
        let (tag, changed) = forced(r#"json:"name""#, &directives(&[], &[], &["json=full_name"]), "Name");
        assert_eq!(tag, r#"json:"full_name""#);
        assert!(changed);
    }

    #[test]
    fn test_overwrite_never_creates_keys() {
        let (tag, changed) = forced("", &directives(&[], &[], &["json=foo"]), "Name");
        assert_eq!(tag, "");
        assert!(!changed);
    }

    #[test]
    fn test_overwrite_same_value_is_unchanged() {
        let (tag, changed) = forced(r#"json:"name""#, &directives(&[], &[], &["json=name"]), "Name");
        assert_eq!(tag, r#"json:"name""#);
        assert!(!changed);
    }

    #[test]
    fn test_overwrite_default_silent_applies() {
        let (tag, changed) = run(
            r#"json:"custom""#,
            &directives(&[], &[], &["json"]),
            "FirstName",
            InteractionPolicy::Silent,
            &mut ScriptedPrompt::closed(),
        );
        assert_eq!(tag, r#"json:"firstName""#);
        assert!(changed);
    }

    #[test]
    fn test_overwrite_default_interactive_declined() {
        let mut prompt = ScriptedPrompt::new(["no"]);
        let (tag, changed) = run(
            r#"json:"custom""#,
            &directives(&[], &[], &["json"]),
            "FirstName",
            InteractionPolicy::Interactive,
            &mut prompt,
        );
        assert_eq!(tag, r#"json:"custom""#);
        assert!(!changed);
        assert_eq!(prompt.questions.len(), 1);
    }

    #[test]
    fn test_overwrite_default_interactive_confirmed() {
        let mut prompt = ScriptedPrompt::new(["y"]);
        let (tag, changed) = run(
            r#"json:"custom""#,
            &directives(&[], &[], &["json"]),
            "FirstName",
            InteractionPolicy::Interactive,
            &mut prompt,
        );
        assert_eq!(tag, r#"json:"firstName""#);
        assert!(changed);
    }

    #[test]
    fn test_overwrite_explicit_interactive_does_not_prompt() {
        let mut prompt = ScriptedPrompt::closed();
        let (tag, changed) = run(
            r#"json:"custom""#,
            &directives(&[], &[], &["json=id"]),
            "Name",
            InteractionPolicy::Interactive,
            &mut prompt,
        );
        assert_eq!(tag, r#"json:"id""#);
        assert!(changed);
        assert!(prompt.questions.is_empty());
    }

    #[test]
    fn test_embedded_field_defaults_to_empty_value() {
        let (tag, changed) = forced("", &directives(&["json"], &[], &[]), "");
        assert_eq!(tag, r#"json:"""#);
        assert!(changed);
    }

    #[test]
    fn test_case_style_drives_default() {
        let options = ResolveOptions::new(CaseStyle::Kebab, InteractionPolicy::Forced);
        let resolution = resolve(
            TagMap::new(),
            &directives(&["yaml"], &[], &[]),
            "CreatedAt",
            &options,
            &mut ScriptedPrompt::closed(),
        );
        assert_eq!(resolution.tags.get("yaml"), Some("created-at"));
    }
}
