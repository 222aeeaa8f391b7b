//! Free-text record filter

use super::Record;

/// Case-fold a search term once, before matching many records.
pub fn fold(term: &str) -> String {
    term.to_lowercase()
}

fn contains_case_insensitive(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// True iff `folded_needle` is a substring of at least one field's text.
/// The empty needle matches every record.
pub fn matches<T: Record>(record: &T, folded_needle: &str) -> bool {
    if folded_needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| contains_case_insensitive(field, folded_needle))
}

/// Indices of matching records, in input order.
pub fn filter_indices<T: Record>(records: &[T], term: &str) -> Vec<usize> {
    let needle = fold(term);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(*record, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(u32, &'static str, &'static str);

    impl Record for Named {
        fn id(&self) -> u32 {
            self.0
        }

        fn search_fields(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string(), self.2.to_string()]
        }
    }

    fn sample() -> Vec<Named> {
        vec![
            Named(1, "João Silva", "D"),
            Named(2, "Maria Santos", "E"),
            Named(3, "Ana Souza", "D"),
        ]
    }

    #[test]
    fn test_empty_term_keeps_everything_in_order() {
        assert_eq!(filter_indices(&sample(), ""), vec![0, 1, 2]);
    }

    #[test]
    fn test_or_across_fields() {
        // "d" hits the category of rows 0 and 2 only
        assert_eq!(filter_indices(&sample(), "d"), vec![0, 2]);
        // "s" hits a name in every row
        assert_eq!(filter_indices(&sample(), "S"), vec![0, 1, 2]);
    }

    #[test]
    fn test_single_substring_not_tokens() {
        assert!(filter_indices(&sample(), "maria ana").is_empty());
        assert_eq!(filter_indices(&sample(), "ria san"), vec![1]);
    }

    #[test]
    fn test_unicode_case_folding() {
        assert_eq!(filter_indices(&sample(), "JOÃO"), vec![0]);
    }

    #[test]
    fn test_id_is_a_field() {
        assert_eq!(filter_indices(&sample(), "2"), vec![1]);
    }
}
