use envdoctor_core::Issue;
use indexmap::IndexMap;

/// Collapse issues sharing an identity.
///
/// The surviving issue is the last one seen for that identity; it keeps the
/// position where the identity first appeared.
pub fn dedupe(issues: Vec<Issue>) -> Vec<Issue> {
    let mut by_id: IndexMap<String, Issue> = IndexMap::with_capacity(issues.len());
    for issue in issues {
        by_id.insert(issue.id.clone(), issue);
    }
    by_id.into_values().collect()
}
