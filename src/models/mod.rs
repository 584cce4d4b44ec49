//! Data models for FortressTalk entities

mod call;
mod contact;
mod conversation;
mod message;
pub mod seed;

pub use call::*;
pub use contact::*;
pub use conversation::*;
pub use message::*;

/// Anything that can be matched by the list screens' search box.
pub trait Named {
    fn name(&self) -> &str;
}

/// Keep the items whose display name contains `query`, ignoring case.
///
/// The query is used as typed (no trimming), so an empty query keeps everything.
pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_empty_query_keeps_all() {
        let contacts = seed::contacts();
        assert_eq!(filter_by_name(&contacts, "").len(), contacts.len());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let conversations = seed::conversations();
        let hits = filter_by_name(&conversations, "ALICE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alice Martin");
    }

    #[test]
    fn test_filter_matches_accented_names() {
        let conversations = seed::conversations();
        let hits = filter_by_name(&conversations, "équipe");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_group);
    }

    #[test]
    fn test_filter_does_not_trim_query() {
        let contacts = seed::contacts();
        // Every seeded name has a space between first and last name.
        assert_eq!(filter_by_name(&contacts, " ").len(), contacts.len());
        assert!(filter_by_name(&contacts, " alice").is_empty());
    }

    #[test]
    fn test_filter_no_match() {
        let contacts = seed::contacts();
        assert!(filter_by_name(&contacts, "zz").is_empty());
    }
}
