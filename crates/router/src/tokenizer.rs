//! Word tokenization shared by index construction and query processing.
//!
//! Every comparison in the router goes through this module so that catalog
//! text and query text are normalized identically: Unicode word segmentation,
//! split on any non-alphanumeric character, full Unicode lowercasing.

use unicode_segmentation::UnicodeSegmentation;

/// Suffixes whose trailing `es` is dropped when folding plurals.
const ES_SUFFIXES: &[&str] = &["sses", "xes", "ches", "shes"];

/// Lowercased alphanumeric runs of `text`, in order.
///
/// Punctuation, whitespace, `_` and `-` are all separators, so
/// `apply_patch`, `apply-patch` and `Apply Patch` yield the same words.
pub fn words(text: &str) -> Vec<String> {
    // Lowercase first: some mappings emit combining marks that must act as separators.
    let lowered = text.to_lowercase();
    lowered
        .unicode_words()
        .flat_map(|word| word.split(|c: char| !c.is_alphanumeric()))
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Index/query terms: [`words`] with light plural folding applied.
pub fn tokenize(text: &str) -> Vec<String> {
    words(text).into_iter().map(fold_plural).collect()
}

/// Normalized identity for tool and parameter names.
pub fn name_key(text: &str) -> String {
    words(text).join("_")
}

/// Collapse common English plural endings onto the singular form.
///
/// Words of three characters or fewer are left untouched, so `cfg` and `ids`
/// survive; `deps` folds to `dep` on both the catalog and the query side.
pub fn fold_plural(word: String) -> String {
    let len = word.chars().count();

    if len > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if ES_SUFFIXES
        .iter()
        .any(|suffix| len > suffix.len() + 1 && word.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }
    if len > 3
        && word.ends_with('s')
        && !(word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
    {
        return word[..word.len() - 1].to_string();
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,.;  ").is_empty());
    }

    #[test]
    fn splits_on_punctuation_and_separators() {
        assert_eq!(words("apply_patch"), vec!["apply", "patch"]);
        assert_eq!(words("apply-patch"), vec!["apply", "patch"]);
        assert_eq!(words("Show me: the IMPORTS!"), vec!["show", "me", "the", "imports"]);
        assert_eq!(words("src/lib.rs"), vec!["src", "lib", "rs"]);
    }

    #[test]
    fn lowercases_non_ascii() {
        assert_eq!(words("ÜBER Straße"), vec!["über", "straße"]);
    }

    #[test]
    fn folds_plurals() {
        assert_eq!(tokenize("dependencies"), vec!["dependency"]);
        assert_eq!(tokenize("classes"), vec!["class"]);
        assert_eq!(tokenize("imports callers"), vec!["import", "caller"]);
        assert_eq!(tokenize("anchors anchor"), vec!["anchor", "anchor"]);
    }

    #[test]
    fn leaves_short_and_latinate_words_alone() {
        assert_eq!(tokenize("cfg is ids"), vec!["cfg", "is", "ids"]);
        assert_eq!(tokenize("deps"), vec!["dep"]);
        assert_eq!(tokenize("status analysis class"), vec!["status", "analysis", "class"]);
    }

    #[test]
    fn name_key_unifies_spelling_variants() {
        assert_eq!(name_key("apply_patch"), "apply_patch");
        assert_eq!(name_key("Apply Patch"), "apply_patch");
        assert_eq!(name_key(" apply-patch "), "apply_patch");
        assert_eq!(name_key("SkElEtOn"), "skeleton");
        assert_eq!(name_key(""), "");
    }

    proptest! {
        #[test]
        fn tokens_are_lowercase_alphanumeric(text in "\\PC{0,64}") {
            for token in tokenize(&text) {
                prop_assert!(!token.is_empty());
                prop_assert!(token.chars().all(char::is_alphanumeric));
                prop_assert_eq!(token.to_lowercase(), token.clone());
            }
        }

        #[test]
        fn tokenization_is_deterministic(text in "\\PC{0,64}") {
            prop_assert_eq!(tokenize(&text), tokenize(&text));
        }

        #[test]
        fn separators_do_not_change_words(
            left in "[a-z]{1,12}",
            right in "[a-z]{1,12}",
            sep in "[ _./:-]{1,3}",
        ) {
            let joined = format!("{left}{sep}{right}");
            prop_assert_eq!(words(&joined), vec![left.clone(), right.clone()]);
        }
    }
}
