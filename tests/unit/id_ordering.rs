use rstest::rstest;
use std::cmp::Ordering;
use tidemark::migration::{Migration, compare_ids, sort_migrations};

#[rstest]
#[case::numeric("2", "10", Ordering::Less)]
#[case::numeric_equal("10", "10", Ordering::Equal)]
#[case::leading_zeros_are_ignored_for_magnitude("002", "10", Ordering::Less)]
#[case::timestamp_prefix("1734567890_add_users", "1734567891_add_posts", Ordering::Less)]
#[case::numeric_before_text("999", "abc", Ordering::Less)]
#[case::text_after_numeric("init", "1_init", Ordering::Greater)]
#[case::text_is_lexical("alpha", "beta", Ordering::Less)]
#[case::equal_prefix_breaks_on_whole_id("1_a", "1_b", Ordering::Less)]
#[case::longer_than_u64("99999999999999999999999", "100000000000000000000000", Ordering::Less)]
fn test_compare_ids(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
    assert_eq!(compare_ids(a, b), expected);
    assert_eq!(compare_ids(b, a), expected.reverse());
}

fn sorted_ids(ids: &[&str]) -> Vec<String> {
    let mut migrations: Vec<Migration> = ids.iter().copied().map(Migration::new).collect();
    sort_migrations(&mut migrations);
    migrations.into_iter().map(|m| m.id).collect()
}

#[test]
fn test_numeric_ids_sort_in_increasing_order() {
    assert_eq!(
        sorted_ids(&["10", "9", "100", "1", "20"]),
        vec!["1", "9", "10", "20", "100"]
    );
}

#[test]
fn test_numeric_ids_sort_before_text_ids() {
    let sorted = sorted_ids(&["zeta", "3", "alpha", "12", "beta"]);

    assert_eq!(sorted, vec!["3", "12", "alpha", "beta", "zeta"]);
}

#[test]
fn test_ordering_is_total() {
    let ids = ["1", "01", "1_a", "2", "a", "A", "_", "10x"];

    for a in ids {
        for b in ids {
            let forward = compare_ids(a, b);
            assert_eq!(forward == Ordering::Equal, a == b, "{} vs {}", a, b);
            assert_eq!(forward, compare_ids(b, a).reverse(), "{} vs {}", a, b);
        }
    }
}
