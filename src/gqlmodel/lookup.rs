/// Returns the first item whose key equals `id`. An empty `id` matches nothing.
pub(crate) fn find_by<'a, T>(
    items: &'a [T],
    id: &str,
    key: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    if id.is_empty() {
        return None;
    }
    items.iter().find(|item| key(item) == id)
}

/// Like [`find_by`] for optional keys; items without a key never match.
pub(crate) fn find_by_opt<'a, T>(
    items: &'a [T],
    id: &str,
    key: impl Fn(&T) -> Option<&str>,
) -> Option<&'a T> {
    if id.is_empty() {
        return None;
    }
    items.iter().find(|item| key(item) == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let items = [("a", 1), ("b", 2), ("a", 3)];
        assert_eq!(find_by(&items, "a", |i| i.0), Some(&("a", 1)));
        assert_eq!(find_by(&items, "c", |i| i.0), None);
        assert_eq!(find_by(&items, "", |i| i.0), None);
    }

    #[test]
    fn test_empty_id_never_matches_empty_key() {
        let items = [("", 1)];
        assert_eq!(find_by(&items, "", |i| i.0), None);
        assert_eq!(find_by_opt(&items, "", |i| Some(i.0)), None);
    }

    #[test]
    fn test_find_by_opt_skips_missing_keys() {
        let items = [(None, 1), (Some("x"), 2)];
        assert_eq!(find_by_opt(&items, "x", |i| i.0), Some(&(Some("x"), 2)));
    }
}
