//! Helper macros and small functions shared across the crate.
//!
//! - Builder-style `with_*` setters generated by [`with_field_fn!`].
//! - Case folding used for every case-insensitive name comparison
//!   ([`fold_case`]).
//! - Sorted, de-duplicated string lists for reports ([`sorted_unique`]).

use itertools::Itertools;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}
pub use with_field_fn;

/// Normalises a target or sample name for case-insensitive comparison.
pub fn fold_case<S: AsRef<str>>(name: S) -> String {
    name.as_ref().to_lowercase()
}

/// Collects names into a sorted list without duplicates.
pub fn sorted_unique<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    names.into_iter().map_into().sorted().dedup().collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case("GaPdH"), "gapdh");
        assert_eq!(fold_case("gapdh"), fold_case("GAPDH"));
        assert_eq!(fold_case(""), "");
    }

    #[test]
    fn test_sorted_unique() {
        assert_eq!(sorted_unique(["s2", "s1", "s2"]), vec!["s1", "s2"]);
        assert!(sorted_unique(Vec::<String>::new()).is_empty());
    }
}
