//! Recursive extraction and merge of selected fields.

use std::collections::btree_map::Entry;

use common::{Record, Selector, Value};

/// Returns a new record holding only the fields named by `selectors`.
///
/// Each selector is matched against the current level as a whole key first.
/// Failing that, a dotted selector descends into the sub-record named by its
/// first segment and the rest of the path is projected there. Sub-results for
/// the same parent are merged, so `"loc.lat"` and `"loc.lon"` end up in one
/// `loc` record. A selector whose first segment is absent, or names a
/// non-record value, is skipped; one whose parent exists but whose leaf does
/// not leaves an empty record at the parent.
pub fn project(record: &Record, selectors: &[Selector]) -> Record {
    let mut projected = Record::new();
    for selector in selectors {
        project_path(record, selector.as_str(), &mut projected);
    }
    projected
}

/// Walks `selector` through `record` and returns the value it names.
///
/// Uses the same matching rules as [`project`]: a whole-key match wins over
/// descending into a sub-record.
pub fn resolve<'a>(record: &'a Record, selector: &Selector) -> Option<&'a Value> {
    resolve_path(record, selector.as_str())
}

/// Merges `other` into `into` by key union.
///
/// Where both sides hold a record under the same key the two records are
/// merged in turn; any other collision is won by `other`.
pub fn merge(into: &mut Record, other: Record) {
    for (key, value) in other {
        merge_value(into, key, value);
    }
}

fn project_path(record: &Record, path: &str, into: &mut Record) {
    if let Some(value) = field(record, path) {
        merge_value(into, path.to_string(), value.clone());
        return;
    }

    let Some((head, rest)) = path.split_once('.') else {
        return;
    };
    let Some(Value::Record(nested)) = field(record, head) else {
        return;
    };

    let mut sub = Record::new();
    project_path(nested, rest, &mut sub);
    merge_value(into, head.to_string(), Value::Record(sub));
}

fn resolve_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    if let Some(value) = field(record, path) {
        return Some(value);
    }

    let (head, rest) = path.split_once('.')?;
    match field(record, head)? {
        Value::Record(nested) => resolve_path(nested, rest),
        _ => None,
    }
}

/// Looks up a single key. The empty key never matches.
fn field<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    record.get(key)
}

fn merge_value(into: &mut Record, key: String, value: Value) {
    match into.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match (slot.get_mut(), value) {
            (Value::Record(existing), Value::Record(incoming)) => merge(existing, incoming),
            (current, incoming) => *current = incoming,
        },
    }
}

/// A fixed selector list applied to many records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projector {
    selectors: Vec<Selector>,
}

impl Projector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Returns true when no selectors are configured.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Projects `record`, or returns it untouched when there are no selectors.
    pub fn apply(&self, record: Record) -> Record {
        if self.is_empty() {
            return record;
        }
        project(&record, &self.selectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    fn selectors(list: &[&str]) -> Vec<Selector> {
        list.iter().copied().map(Selector::from).collect()
    }

    fn sample() -> Record {
        record(json!({
            "ip": "8.8.8.8",
            "status": 200,
            "loc": {"lat": 1, "lon": 2}
        }))
    }

    #[test]
    fn selects_top_level_and_nested_fields() {
        let projected = project(&sample(), &selectors(&["ip", "loc.lat"]));
        assert_eq!(projected, record(json!({"ip": "8.8.8.8", "loc": {"lat": 1}})));
    }

    #[test]
    fn missing_parent_selects_nothing() {
        let projected = project(&sample(), &selectors(&["missing.field"]));
        assert!(projected.is_empty());
    }

    #[test]
    fn missing_leaf_under_present_parent_keeps_empty_parent() {
        let projected = project(&sample(), &selectors(&["loc.alt"]));
        assert_eq!(projected, record(json!({"loc": {}})));
    }

    #[test]
    fn missing_leaf_does_not_clobber_sibling() {
        let projected = project(&sample(), &selectors(&["loc.lat", "loc.alt"]));
        assert_eq!(projected, record(json!({"loc": {"lat": 1}})));
    }

    #[test]
    fn trailing_dot_keeps_empty_parent() {
        let projected = project(&sample(), &selectors(&["ip", "loc."]));
        assert_eq!(projected, record(json!({"ip": "8.8.8.8", "loc": {}})));
    }

    #[test]
    fn empty_parent_projection_is_idempotent() {
        let once = project(&sample(), &selectors(&["loc.alt"]));
        let twice = project(&once, &selectors(&["loc.alt"]));
        assert_eq!(once, twice);
    }

    #[test]
    fn siblings_accumulate_under_one_parent() {
        let projected = project(&sample(), &selectors(&["loc.lat", "loc.lon"]));
        assert_eq!(projected, record(json!({"loc": {"lat": 1, "lon": 2}})));
    }

    #[test]
    fn deeper_siblings_accumulate() {
        let source = record(json!({"a": {"b": {"c": 1, "d": 2, "e": 3}}}));
        let projected = project(&source, &selectors(&["a.b.c", "a.b.d"]));
        assert_eq!(projected, record(json!({"a": {"b": {"c": 1, "d": 2}}})));
    }

    #[test]
    fn whole_parent_after_child_keeps_whole_parent() {
        let projected = project(&sample(), &selectors(&["loc.lat", "loc"]));
        assert_eq!(projected, record(json!({"loc": {"lat": 1, "lon": 2}})));
    }

    #[test]
    fn null_value_is_present() {
        let source = record(json!({"region": null, "city": "Paris"}));
        let projected = project(&source, &selectors(&["region"]));
        assert_eq!(projected, record(json!({"region": null})));
    }

    #[test]
    fn literal_dotted_key_wins() {
        let source = record(json!({"a.b": "flat", "a": {"b": "nested"}}));
        let projected = project(&source, &selectors(&["a.b"]));
        assert_eq!(projected, record(json!({"a.b": "flat"})));
    }

    #[test]
    fn path_through_scalar_selects_nothing() {
        let source = record(json!({"city": "Paris"}));
        assert!(project(&source, &selectors(&["city.name"])).is_empty());
    }

    #[test]
    fn path_through_sequence_selects_nothing() {
        let source = record(json!({"languages": [{"name": "English"}]}));
        assert!(project(&source, &selectors(&["languages.name"])).is_empty());
    }

    #[test]
    fn empty_selectors_never_match() {
        let source = record(json!({"": 1, "a": {"": 2}}));
        assert!(project(&source, &selectors(&["", ".a"])).is_empty());

        let projected = project(&source, &selectors(&["a."]));
        assert_eq!(projected, record(json!({"a": {}})));
    }

    #[test]
    fn resolve_walks_nested_path() {
        let source = sample();
        let lat = resolve(&source, &Selector::from("loc.lat"));
        assert_eq!(lat, Some(&Value::from(1i64)));
        assert_eq!(resolve(&source, &Selector::from("loc.alt")), None);
        assert_eq!(resolve(&source, &Selector::from("ip.v4")), None);
    }

    #[test]
    fn merge_overwrites_scalars_and_unions_records() {
        let mut into = record(json!({"a": {"x": 1}, "b": 1}));
        merge(&mut into, record(json!({"a": {"y": 2}, "b": 2})));
        assert_eq!(into, record(json!({"a": {"x": 1, "y": 2}, "b": 2})));
    }

    #[test]
    fn projector_without_selectors_passes_record_through() {
        let projector = Projector::default();
        assert_eq!(projector.apply(sample()), sample());
    }

    #[test]
    fn projector_applies_selectors() {
        let projector = Projector::new(selectors(&["status"]));
        assert_eq!(projector.apply(sample()), record(json!({"status": 200})));
    }
}
