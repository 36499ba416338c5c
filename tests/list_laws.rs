//! Property-based tests for `List`.
//!
//! These tests verify the algebraic laws of the operation catalog:
//! conversion round trips, append identities and associativity, windowing
//! relationships, sort correctness, and the split/join inverse.

use conslist::List;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generates a `List<i32>` with up to `max_size` elements.
fn list_strategy(max_size: usize) -> impl Strategy<Value = List<i32>> {
    prop::collection::vec(any::<i32>(), 0..max_size).prop_map(List::from_vec)
}

/// Generates a small `List<i32>` for faster tests.
fn small_list() -> impl Strategy<Value = List<i32>> {
    list_strategy(20)
}

/// Generates a list over a tiny alphabet, so separators actually occur.
fn collision_list() -> impl Strategy<Value = List<u8>> {
    prop::collection::vec(0u8..3, 0..16).prop_map(List::from_vec)
}

/// Generates a short separator over the same tiny alphabet.
fn collision_separator() -> impl Strategy<Value = List<u8>> {
    prop::collection::vec(0u8..3, 0..3).prop_map(List::from_vec)
}

proptest! {
    // =========================================================================
    // Conversion Round Trips
    // =========================================================================

    #[test]
    fn prop_to_vec_from_vec_round_trip(list in small_list()) {
        let round_tripped = List::from_vec(list.to_vec());
        prop_assert_eq!(round_tripped.to_vec(), list.to_vec());
    }

    #[test]
    fn prop_from_iter_preserves_order(elements in prop::collection::vec(any::<i32>(), 0..20)) {
        let list: List<i32> = elements.clone().into_iter().collect();
        prop_assert_eq!(list.to_vec(), elements);
    }

    #[test]
    fn prop_len_matches_iter_count(list in small_list()) {
        prop_assert_eq!(list.len(), list.iter().count());
    }

    // =========================================================================
    // Append Laws
    // =========================================================================

    #[test]
    fn prop_append_empty_right_identity(list in small_list()) {
        let empty: List<i32> = List::new();
        prop_assert_eq!(list.append(&empty), list);
    }

    #[test]
    fn prop_append_empty_left_identity(list in small_list()) {
        let empty: List<i32> = List::new();
        prop_assert_eq!(empty.append(&list), list);
    }

    #[test]
    fn prop_append_associativity(
        list1 in small_list(),
        list2 in small_list(),
        list3 in small_list()
    ) {
        let left = list1.append(&list2).append(&list3);
        let right = list1.append(&list2.append(&list3));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_append_length(list1 in small_list(), list2 in small_list()) {
        let combined = list1.append(&list2);
        prop_assert_eq!(combined.len(), list1.len() + list2.len());
    }

    #[test]
    fn prop_append_shares_right_operand(list1 in small_list(), list2 in small_list()) {
        let combined = list1.append(&list2);
        prop_assert!(combined.drop_first(list1.len()).ptr_eq(&list2));
    }

    #[test]
    fn prop_concat_matches_pairwise_append(
        list1 in small_list(),
        list2 in small_list(),
        list3 in small_list()
    ) {
        let nested: List<List<i32>> = List::from_vec(vec![list1.clone(), list2.clone(), list3.clone()]);
        prop_assert_eq!(nested.concat(), list1.append(&list2.append(&list3)));
    }

    // =========================================================================
    // Transform Laws
    // =========================================================================

    #[test]
    fn prop_map_identity(list in small_list()) {
        let mapped = list.map(|element| *element);
        prop_assert_eq!(mapped, list);
    }

    #[test]
    fn prop_map_preserves_length(list in small_list()) {
        prop_assert_eq!(list.map(|element| element.wrapping_mul(2)).len(), list.len());
    }

    #[test]
    fn prop_filter_keeps_only_matching(list in small_list()) {
        let evens = list.filter(|element| element % 2 == 0);
        prop_assert!(evens.all(|element| element % 2 == 0));
        prop_assert!(evens.len() <= list.len());
    }

    #[test]
    fn prop_fold_left_counts_elements(list in small_list()) {
        let count = list.fold_left(0usize, |accumulator, _| accumulator + 1);
        prop_assert_eq!(count, list.len());
    }

    #[test]
    fn prop_fold_right_equals_fold_left_on_reverse(list in small_list()) {
        let right = list.fold_right(Vec::new(), |element, mut accumulator| {
            accumulator.push(*element);
            accumulator
        });
        let left = list.reverse().fold_left(Vec::new(), |mut accumulator, element| {
            accumulator.push(*element);
            accumulator
        });
        prop_assert_eq!(right, left);
    }

    #[test]
    fn prop_fold_left1_equals_seeded_fold(list in small_list().prop_filter("non-empty", |list| !list.is_empty())) {
        let seeded = list.fold_left1(|accumulator, element| accumulator.wrapping_add(element));
        let first = *list.head().unwrap();
        let explicit = list
            .tail()
            .unwrap()
            .fold_left(first, |accumulator, element| accumulator.wrapping_add(*element));
        prop_assert_eq!(seeded, Ok(explicit));
    }

    #[test]
    fn prop_scan_left_length_and_last(list in small_list()) {
        let scanned = list.scan_left(0i64, |accumulator, element| accumulator + i64::from(*element));
        prop_assert_eq!(scanned.len(), list.len() + 1);
        let total = list.fold_left(0i64, |accumulator, element| accumulator + i64::from(*element));
        prop_assert_eq!(scanned.last(), Ok(&total));
    }

    // =========================================================================
    // Reverse Laws
    // =========================================================================

    #[test]
    fn prop_reverse_reverse_is_identity(list in small_list()) {
        prop_assert_eq!(list.reverse().reverse(), list);
    }

    #[test]
    fn prop_reverse_preserves_length(list in small_list()) {
        prop_assert_eq!(list.reverse().len(), list.len());
    }

    // =========================================================================
    // Zip Laws
    // =========================================================================

    #[test]
    fn prop_zip_truncates_to_shorter(list1 in small_list(), list2 in small_list()) {
        let zipped = list1.zip(&list2);
        prop_assert_eq!(zipped.len(), list1.len().min(list2.len()));
    }

    #[test]
    fn prop_zip_pairs_positionally(list1 in small_list(), list2 in small_list()) {
        let zipped = list1.zip(&list2);
        for (index, (left, right)) in zipped.iter().enumerate() {
            prop_assert_eq!(list1.get(index), Some(left));
            prop_assert_eq!(list2.get(index), Some(right));
        }
    }

    // =========================================================================
    // Sort Laws
    // =========================================================================

    #[test]
    fn prop_sort_is_permutation(list in small_list()) {
        let sorted = list.sort();
        let mut expected = list.to_vec();
        expected.sort_unstable();
        prop_assert_eq!(sorted.to_vec(), expected);
    }

    #[test]
    fn prop_sort_is_non_decreasing(list in small_list()) {
        let sorted = list.sort().to_vec();
        prop_assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn prop_sort_is_idempotent(list in small_list()) {
        let once = list.sort();
        prop_assert_eq!(once.sort(), once);
    }

    #[test]
    fn prop_sort_is_stable_under_key_comparator(
        pairs in prop::collection::vec((0i32..4, any::<i32>()), 0..20)
    ) {
        let list = List::from_vec(pairs);
        let sorted = list.sort_by(|left, right| left.0.cmp(&right.0));
        // Within each key, payload order must match the input order.
        for key in 0..4 {
            let from_sorted: Vec<i32> = sorted
                .iter()
                .filter(|pair| pair.0 == key)
                .map(|pair| pair.1)
                .collect();
            let from_input: Vec<i32> = list
                .iter()
                .filter(|pair| pair.0 == key)
                .map(|pair| pair.1)
                .collect();
            prop_assert_eq!(from_sorted, from_input);
        }
    }

    // =========================================================================
    // Windowing Laws
    // =========================================================================

    #[test]
    fn prop_take_zero_is_empty(list in small_list()) {
        prop_assert!(list.take(0).is_empty());
    }

    #[test]
    fn prop_drop_full_length_is_empty(list in small_list()) {
        prop_assert!(list.drop_first(list.len()).is_empty());
    }

    #[test]
    fn prop_take_append_drop_is_identity(list in small_list(), count in 0usize..25) {
        let reassembled = list.take(count).append(&list.drop_first(count));
        prop_assert_eq!(reassembled, list);
    }

    // =========================================================================
    // Split / Join Laws
    // =========================================================================

    #[test]
    fn prop_join_after_split_restores_the_list(
        list in collision_list(),
        separator in collision_separator()
    ) {
        let rejoined = list.split(&separator).join(&separator);
        prop_assert_eq!(rejoined, list);
    }

    #[test]
    fn prop_split_pieces_never_contain_the_separator(
        list in collision_list(),
        separator in collision_separator().prop_filter("non-empty", |separator| !separator.is_empty())
    ) {
        let pieces = list.split(&separator);
        let separator_elements = separator.to_vec();
        for piece in pieces.iter() {
            let elements = piece.to_vec();
            let found = elements
                .windows(separator_elements.len())
                .any(|window| window == separator_elements.as_slice());
            prop_assert!(!found);
        }
    }

    #[test]
    fn prop_split_on_empty_separator_yields_singletons(list in collision_list()) {
        let pieces = list.split(&List::new());
        prop_assert_eq!(pieces.len(), list.len());
        prop_assert!(pieces.iter().all(|piece| piece.len() == 1));
    }

    // =========================================================================
    // Error Contract
    // =========================================================================

    #[test]
    fn prop_head_of_non_empty_succeeds(list in small_list().prop_filter("non-empty", |list| !list.is_empty())) {
        prop_assert!(list.head().is_ok());
    }
}
