use std::collections::HashMap;
use std::time::{Duration, UNIX_EPOCH};

use proptest::prelude::*;
use serde_json::json;

use prober_metric::{FieldValue, Metric, MetricRead, Tag};

fn tags_of(m: &Metric) -> Vec<(&str, &str)> {
    m.tag_list()
        .iter()
        .map(|t| (t.key.as_str(), t.value.as_str()))
        .collect()
}

#[test]
fn construction_from_maps() {
    let composite = json!([1, 2]);
    let tags = HashMap::from([("host", "b"), ("app", "a")]);
    let fields = HashMap::from([
        ("x", FieldValue::from(42i64)),
        ("bad", FieldValue::from_json(&composite)),
    ]);
    let m = Metric::new("cpu", tags, fields, UNIX_EPOCH);

    assert_eq!(tags_of(&m), vec![("app", "a"), ("host", "b")]);
    assert_eq!(m.field_list().len(), 1);
    assert!(!m.has_field("bad"));
    assert_eq!(m.get_field("x"), Some(Some(42.0)));
}

#[test]
#[allow(clippy::approx_constant)]
fn add_field_asymmetry_with_construction() {
    let mut m = Metric::new("cpu", [("host", "a")], [("s2", "abc")], UNIX_EPOCH);
    assert!(!m.has_field("s2"));

    m.add_field("s", "3.14");
    m.add_field("s2", "abc");
    assert_eq!(m.get_field("s"), Some(Some(3.14)));
    assert_eq!(m.get_field("s2"), Some(None));
}

#[test]
fn hash_ignores_fields_and_time() {
    let a = Metric::new("cpu", [("host", "a")], [("v", 1.0)], UNIX_EPOCH);
    let mut b = a.clone();
    b.add_field("v", 99.0);
    b.add_field("w", true);
    b.set_time(UNIX_EPOCH + Duration::from_secs(60));
    assert_eq!(a.hash_id(), b.hash_id());
}

#[test]
fn hash_tracks_name_and_tag_values() {
    let a = Metric::new("cpu", [("host", "a")], [("v", 1.0)], UNIX_EPOCH);
    let b = Metric::new("cpu", [("host", "b")], [("v", 1.0)], UNIX_EPOCH);
    assert_ne!(a.hash_id(), b.hash_id());

    let mut c = a.clone();
    c.set_name("mem");
    assert_ne!(a.hash_id(), c.hash_id());
}

#[test]
fn set_aggregate_false_still_sets_flag() {
    let mut m = Metric::new("cpu", [("host", "a")], [("v", 1.0)], UNIX_EPOCH);
    m.set_aggregate(false);
    assert!(m.is_aggregate());
}

proptest! {
    #[test]
    fn add_tag_keeps_sorted_unique_keys(
        ops in prop::collection::vec(("[a-e]{1,2}", "[a-z]{0,3}"), 0..40)
    ) {
        let mut m = Metric::new("m", std::iter::empty::<(String, String)>(), [("v", 1.0)], UNIX_EPOCH);
        let mut expected: HashMap<String, String> = HashMap::new();

        for (k, v) in ops {
            m.add_tag(k.clone(), v.clone());
            expected.insert(k, v);

            let keys: Vec<&str> = m.tag_list().iter().map(|t| t.key.as_str()).collect();
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        }

        prop_assert_eq!(m.tags(), expected);
    }

    #[test]
    fn construction_order_is_input_independent(
        tags in prop::collection::hash_map("[a-z]{1,4}", "[a-z]{0,4}", 0..12)
    ) {
        let mut pairs: Vec<(String, String)> = tags.into_iter().collect();
        let forward = Metric::new("m", pairs.clone(), [("v", 1.0)], UNIX_EPOCH);
        pairs.reverse();
        let backward = Metric::new("m", pairs, [("v", 1.0)], UNIX_EPOCH);

        prop_assert_eq!(forward.tag_list(), backward.tag_list());
        prop_assert_eq!(forward.hash_id(), backward.hash_id());
    }

    #[test]
    fn remove_tag_preserves_relative_order(
        tags in prop::collection::btree_map("[a-z]{1,3}", "[a-z]{1,3}", 1..10),
        pick in any::<prop::sample::Index>()
    ) {
        let m = Metric::new("m", tags.clone(), [("v", 1.0)], UNIX_EPOCH);
        let keys: Vec<&String> = tags.keys().collect();
        let victim = keys[pick.index(keys.len())].clone();

        let mut removed = m.clone();
        removed.remove_tag(&victim);

        let expected: Vec<Tag> = m
            .tag_list()
            .iter()
            .filter(|t| t.key != victim)
            .cloned()
            .collect();
        prop_assert_eq!(removed.tag_list(), expected.as_slice());

        let mut untouched = m.clone();
        untouched.remove_tag("ZZZ");
        prop_assert_eq!(untouched.tag_list(), m.tag_list());
    }

    #[test]
    fn hash_invariant_under_field_and_time_changes(
        values in prop::collection::vec(any::<f64>(), 1..8),
        secs in any::<u32>()
    ) {
        let base = Metric::new("net", [("if", "eth0"), ("host", "h")], [("v", 0.0)], UNIX_EPOCH);
        let mut changed = base.clone();
        for (i, v) in values.into_iter().enumerate() {
            changed.add_field(format!("f{i}"), v);
        }
        changed.set_time(UNIX_EPOCH + Duration::from_secs(u64::from(secs)));
        prop_assert_eq!(base.hash_id(), changed.hash_id());
    }

    #[test]
    fn copies_do_not_share_storage(
        key in "[a-z]{1,4}",
        value in "[a-z]{1,4}",
        field in any::<i32>()
    ) {
        let original = Metric::new("m", [("host", "a")], [("v", 1.0)], UNIX_EPOCH);
        let mut copy = original.clone();
        copy.add_tag(key.clone(), value);
        copy.add_field(key, field);
        copy.remove_field("v");

        prop_assert_eq!(original.get_tag("host"), Some("a"));
        prop_assert_eq!(original.field_list().len(), 1);
        prop_assert_eq!(original.get_field("v"), Some(Some(1.0)));
    }
}
