//! Pure result renderer: keywords in, display descriptors out.
//!
//! The terminal adapter draws whatever this produces. Every call rebuilds the
//! list from scratch, so rendering the same input twice yields equal output.

pub const NO_RESULTS_TEXT: &str = "No keywords found. Try a different topic.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordItem {
    /// Position within the rendered projection; the click target.
    pub index: usize,
    pub text: String,
}

impl KeywordItem {
    pub fn copy_toast(&self) -> String {
        format!("Copied: {}", self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultList {
    Placeholder(&'static str),
    Items(Vec<KeywordItem>),
}

impl Default for ResultList {
    fn default() -> Self {
        ResultList::Placeholder(NO_RESULTS_TEXT)
    }
}

impl ResultList {
    pub fn len(&self) -> usize {
        match self {
            ResultList::Placeholder(_) => 0,
            ResultList::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&KeywordItem> {
        match self {
            ResultList::Placeholder(_) => None,
            ResultList::Items(items) => items.get(index),
        }
    }
}

/// Returns the displayed count alongside the rebuilt list.
pub fn render_keywords(keywords: &[String]) -> (usize, ResultList) {
    if keywords.is_empty() {
        return (0, ResultList::Placeholder(NO_RESULTS_TEXT));
    }
    let items = keywords
        .iter()
        .enumerate()
        .map(|(index, text)| KeywordItem {
            index,
            text: text.clone(),
        })
        .collect();
    (keywords.len(), ResultList::Items(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_renders_placeholder_only() {
        let (count, list) = render_keywords(&[]);
        assert_eq!(count, 0);
        assert_eq!(list, ResultList::Placeholder(NO_RESULTS_TEXT));
        assert!(list.get(0).is_none());
    }

    #[test]
    fn one_item_per_keyword_in_order() {
        let keywords = vec!["coffee shop".to_string(), "coffee beans".to_string()];
        let (count, list) = render_keywords(&keywords);
        assert_eq!(count, 2);
        let item = list.get(1).unwrap();
        assert_eq!(item.index, 1);
        assert_eq!(item.text, "coffee beans");
        assert_eq!(item.copy_toast(), "Copied: coffee beans");
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let keywords = vec!["a".to_string(), "b".to_string()];
        assert_eq!(render_keywords(&keywords), render_keywords(&keywords));
    }
}
