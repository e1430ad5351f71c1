use crate::types::{Record, Value};

/// Delimiter separating segments of a field path.
const PATH_DELIMITER: char = '.';

/// Resolves a dot-delimited field path against a nested record.
///
/// Every segment must be non-empty and must exist as an own key at its nesting depth,
/// checked left to right. An empty segment (produced by consecutive delimiters) never
/// matches any key, so such paths resolve to [`None`]. Descending past a leaf value or
/// into a missing branch also resolves to [`None`].
pub fn resolve<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(PATH_DELIMITER);

    let first = segments.next()?;
    if first.is_empty() {
        return None;
    }

    let mut current = record.get(first)?;
    for segment in segments {
        if segment.is_empty() {
            return None;
        }

        current = current.as_record()?.get(segment)?;
    }

    Some(current)
}

/// Returns true if the field path resolves to a value in the record.
///
/// Presence, not truthiness, is tested: a field holding `false`, `0` or `""` still
/// resolves true.
pub fn has_property(record: &Record, path: &str) -> bool {
    resolve(record, path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Record {
        let mut foo = Record::new();
        foo.insert("foo".to_string(), Value::from("bar"));

        let mut bar = Record::new();
        bar.insert("bar".to_string(), Value::from(foo));

        let mut record = Record::new();
        record.insert("foobar".to_string(), Value::from(bar));
        record
    }

    #[test]
    fn test_empty_record_has_nothing() {
        assert!(!has_property(&Record::new(), "foo"));
    }

    #[test]
    fn test_flat_property_resolves() {
        let mut record = Record::new();
        record.insert("foo".to_string(), Value::from("bar"));

        assert!(has_property(&record, "foo"));
        assert_eq!(resolve(&record, "foo"), Some(&Value::from("bar")));
    }

    #[test]
    fn test_nested_property_resolves() {
        assert!(has_property(&nested(), "foobar.bar.foo"));
    }

    #[test]
    fn test_consecutive_delimiters_never_match() {
        assert!(!has_property(&nested(), "foobar.....bar.....foo"));
    }

    #[test]
    fn test_missing_link_in_chain() {
        assert!(!has_property(&nested(), "foobar.foo"));
    }

    #[test]
    fn test_leaf_key_does_not_match_at_top_level() {
        assert!(!has_property(&nested(), "foo"));
    }

    #[test]
    fn test_presence_not_truthiness() {
        let mut record = Record::new();
        record.insert("flag".to_string(), Value::Bool(false));
        record.insert("name".to_string(), Value::from(""));
        record.insert("count".to_string(), Value::Int(0));

        assert!(has_property(&record, "flag"));
        assert!(has_property(&record, "name"));
        assert!(has_property(&record, "count"));
    }

    #[test]
    fn test_resolving_past_a_leaf_fails() {
        let mut record = Record::new();
        record.insert("title".to_string(), Value::from("leaf"));

        assert!(!has_property(&record, "title.length"));
    }
}
