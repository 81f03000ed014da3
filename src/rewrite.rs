//! Per-field tag rewriting
//!
//! Glue between a [`FieldDescriptor`] and the directive resolver: decode the
//! field's tag, resolve the directives, encode the result and store it back.

use crate::directives::{DirectiveSet, ResolveOptions, resolve};
use crate::source::FieldDescriptor;
use crate::tags::{decode, encode};
use crate::ui::Prompt;

/// Apply `directives` to one field.
///
/// The field's tag is always replaced by its canonical encoding; an empty
/// result removes the tag annotation instead of writing an empty tag.
/// Returns `true` when a directive changed the tag's contents.
///
/// # Examples
/// ```
/// use gotag::directives::{DirectiveSet, InteractionPolicy, ResolveOptions};
/// use gotag::rewrite::rewrite_field;
/// use gotag::source::FieldDescriptor;
/// use gotag::ui::ScriptedPrompt;
///
/// let mut field = FieldDescriptor::new("Name", None);
/// let directives = DirectiveSet::from_flags(&["json".into()], &[], &[]).unwrap();
/// let options = ResolveOptions { policy: InteractionPolicy::Forced, ..Default::default() };
///
/// assert!(rewrite_field(&mut field, &directives, &options, &mut ScriptedPrompt::closed()));
/// assert_eq!(field.tag(), Some(r#"json:"name""#));
/// ```
pub fn rewrite_field(
    field: &mut FieldDescriptor,
    directives: &DirectiveSet,
    options: &ResolveOptions,
    prompt: &mut dyn Prompt,
) -> bool {
    let current = decode(field.tag().unwrap_or_default());
    let resolution = resolve(current, directives, field.name(), options, prompt);

    let encoded = encode(&resolution.tags);
    field.set_tag((!encoded.is_empty()).then_some(encoded));
    resolution.changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directives::InteractionPolicy;
    use crate::ui::ScriptedPrompt;

    fn forced() -> ResolveOptions {
        ResolveOptions {
            policy: InteractionPolicy::Forced,
            ..ResolveOptions::default()
        }
    }

    fn directives(add: &[&str], delete: &[&str], overwrite: &[&str]) -> DirectiveSet {
        let owned = |values: &[&str]| values.iter().map(ToString::to_string).collect::<Vec<_>>();
        DirectiveSet::from_flags(&owned(add), &owned(delete), &owned(overwrite)).unwrap()
    }

    fn rewrite(name: &str, tag: Option<&str>, set: &DirectiveSet) -> (Option<String>, bool) {
        let mut field = FieldDescriptor::new(name, tag.map(ToString::to_string));
        let changed = rewrite_field(&mut field, set, &forced(), &mut ScriptedPrompt::closed());
        (field.tag().map(ToString::to_string), changed)
    }

    #[test]
    fn test_add_to_untagged_field() {
        let (tag, changed) = rewrite("Name", None, &directives(&["json"], &[], &[]));
        assert_eq!(tag.as_deref(), Some(r#"json:"name""#));
        assert!(changed);
    }

    #[test]
    fn test_delete_one_of_two() {
        let (tag, changed) = rewrite("Age", Some(r#"json:"age" xml:"age""#), &directives(&[], &["xml"], &[]));
        assert_eq!(tag.as_deref(), Some(r#"json:"age""#));
        assert!(changed);
    }

    #[test]
    fn test_overwrite_explicit() {
        let (tag, _) = rewrite("Name", Some(r#"json:"name""#), &directives(&[], &[], &["json=full_name"]));
        assert_eq!(tag.as_deref(), Some(r#"json:"full_name""#));
    }

    #[test]
    fn test_add_several_sorted() {
        let (tag, _) = rewrite("Name", None, &directives(&["json", "xml", "db"], &[], &[]));
        assert_eq!(tag.as_deref(), Some(r#"db:"name" json:"name" xml:"name""#));
    }

    #[test]
    fn test_rerun_is_unchanged() {
        let (tag, changed) = rewrite("Name", Some(r#"json:"name""#), &directives(&["json"], &[], &[]));
        assert_eq!(tag.as_deref(), Some(r#"json:"name""#));
        assert!(!changed);
    }

    #[test]
    fn test_deleting_last_key_clears_tag() {
        let (tag, changed) = rewrite("Name", Some(r#"json:"name""#), &directives(&[], &["json"], &[]));
        assert_eq!(tag, None);
        assert!(changed);
    }

    #[test]
    fn test_unchanged_field_is_canonicalized_but_not_reported() {
        let (tag, changed) = rewrite("Name", Some(r#"xml:"name"   json:"name""#), &directives(&[], &["db"], &[]));
        assert_eq!(tag.as_deref(), Some(r#"json:"name" xml:"name""#));
        assert!(!changed);
    }

    #[test]
    fn test_unsorted_tag_is_canonicalized_when_changed() {
        let (tag, changed) = rewrite("ID", Some(r#"xml:"id" json:"id""#), &directives(&["db"], &[], &[]));
        assert_eq!(tag.as_deref(), Some(r#"db:"id" json:"id" xml:"id""#));
        assert!(changed);
    }
}
