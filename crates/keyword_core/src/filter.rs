/// Case-insensitive substring filter, preserving the original order.
///
/// An empty query selects everything. The input is never modified.
pub fn filter_keywords(keywords: &[String], query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return keywords.to_vec();
    }
    keywords
        .iter()
        .filter(|keyword| keyword.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
