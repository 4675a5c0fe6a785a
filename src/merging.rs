//! Flattening advanced groups into disjoint synonym classes
//!
//! Advanced tables may list a token in several groups. Matching needs each
//! token in exactly one class, so overlapping groups are merged: groups that
//! share a token, directly or through a chain of groups, end up in the same
//! class. `[st, street]` and `[st, str]` collapse into `[st, str, street]`.
//!
//! Groups flagged `skipBoundaries` or `skipDiacriticStripping` are compared
//! under their own rules downstream and are left out of the merge.

mod disjoint_set;

pub use disjoint_set::DisjointSet;

use crate::tables::{AdvancedGroup, FlatGroup};
use std::collections::BTreeMap;

/// Merge overlapping groups into disjoint flat groups.
///
/// Members of each class are ordered by length, ties in lexical order.
/// Classes come out in a stable but otherwise meaningless order.
#[tracing::instrument(level = "debug", skip_all, fields(groups = groups.len()))]
pub fn flatten(groups: &[AdvancedGroup]) -> Vec<FlatGroup> {
    let mergeable: Vec<&AdvancedGroup> = groups.iter().filter(|g| !g.skips_merge()).collect();

    // Sorted universe of distinct tokens; a token's index is its position.
    let mut universe: Vec<&str> = mergeable
        .iter()
        .flat_map(|g| g.tokens.iter().map(String::as_str))
        .collect();
    universe.sort_unstable();
    universe.dedup();

    let index_of = |token: &str| universe.binary_search(&token).ok();

    let mut sets = DisjointSet::new(universe.len());
    for group in &mergeable {
        let Some((anchor, rest)) = group.tokens.split_first() else {
            continue;
        };
        let Some(anchor) = index_of(anchor) else {
            continue;
        };
        for token in rest {
            if let Some(other) = index_of(token) {
                sets.union(anchor, other);
            }
        }
    }

    let mut classes: BTreeMap<usize, FlatGroup> = BTreeMap::new();
    for (index, token) in universe.iter().enumerate() {
        classes
            .entry(sets.find(index))
            .or_default()
            .push((*token).to_string());
    }

    tracing::debug!(
        skipped = groups.len() - mergeable.len(),
        tokens = universe.len(),
        classes = classes.len(),
        "flattened token groups"
    );

    classes
        .into_values()
        .map(|mut members| {
            members.sort_by_key(|t| t.chars().count());
            members
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn group(tokens: &[&str]) -> AdvancedGroup {
        AdvancedGroup::from_tokens(tokens.iter().copied())
    }

    fn as_sets(groups: Vec<FlatGroup>) -> BTreeSet<BTreeSet<String>> {
        groups.into_iter().map(|g| g.into_iter().collect()).collect()
    }

    fn set(tokens: &[&str]) -> BTreeSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_chained_groups_merge() {
        let flat = flatten(&[group(&["a", "b"]), group(&["b", "c"])]);
        assert_eq!(flat.len(), 1);
        assert_eq!(as_sets(flat), BTreeSet::from([set(&["a", "b", "c"])]));
    }

    #[test]
    fn test_disjoint_groups_stay_apart() {
        let flat = flatten(&[group(&["a", "b"]), group(&["c", "d"])]);
        assert_eq!(
            as_sets(flat),
            BTreeSet::from([set(&["a", "b"]), set(&["c", "d"])])
        );
    }

    #[test]
    fn test_merges_through_non_anchor_tokens() {
        // "x" and "z" never share a group; "y" links them.
        let flat = flatten(&[
            group(&["x", "y"]),
            group(&["w", "z"]),
            group(&["q", "y", "z"]),
        ]);
        assert_eq!(as_sets(flat), BTreeSet::from([set(&["q", "w", "x", "y", "z"])]));
    }

    #[test]
    fn test_members_sorted_by_length_then_lexically() {
        let flat = flatten(&[group(&["street", "st"]), group(&["str", "st"])]);
        assert_eq!(flat, vec![vec!["st", "str", "street"]]);

        let flat = flatten(&[group(&["bb", "aa", "c"])]);
        assert_eq!(flat, vec![vec!["c", "aa", "bb"]]);
    }

    #[test]
    fn test_skip_flags_exclude_groups() {
        let mut diacritics = group(&["strasse", "straße"]);
        diacritics.skip_diacritic_stripping = Some(true);
        let mut boundaries = group(&["str", "strasse"]);
        boundaries.skip_boundaries = Some(true);

        let flat = flatten(&[group(&["pl", "platz"]), diacritics, boundaries]);
        assert_eq!(flat, vec![vec!["pl", "platz"]]);
    }

    #[test]
    fn test_flatten_is_idempotent_on_disjoint_input() {
        let first = flatten(&[
            group(&["st", "street"]),
            group(&["rd", "road"]),
            group(&["ave", "av", "avenue"]),
        ]);
        let again: Vec<AdvancedGroup> = first
            .iter()
            .map(|g| AdvancedGroup::from_tokens(g.iter().cloned()))
            .collect();
        assert_eq!(as_sets(flatten(&again)), as_sets(first));
    }

    #[test]
    fn test_singletons_pass_through_as_their_own_class() {
        let flat = flatten(&[group(&["tee"]), group(&["tn", "tänav"])]);
        assert_eq!(as_sets(flat), BTreeSet::from([set(&["tee"]), set(&["tn", "tänav"])]));
    }

    #[test]
    fn test_empty_input() {
        assert!(flatten(&[]).is_empty());
    }
}
