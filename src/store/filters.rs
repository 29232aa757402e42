use std::collections::BTreeMap;

/// Query parameters driving one list fetch.
///
/// `page` is 1-based and always present. Any change to another field through
/// [`FilterSet::set`] starts over at page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    fields: BTreeMap<String, String>,
    page: u32,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSet {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            page: 1,
        }
    }

    /// Builder form of [`FilterSet::set`] that leaves the page alone.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Changes one field and resets the page to 1.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        if field == "page" {
            return;
        }
        self.fields.insert(field.to_string(), value.into());
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Non-empty fields in key order, followed by `page`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.clone(), value.trim().to_string()))
            .chain(std::iter::once(("page".to_string(), self.page.to_string())))
            .collect()
    }

    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_page() {
        let filters = FilterSet::new();
        assert_eq!(filters.page(), 1);
        assert_eq!(filters.to_query_string(), "page=1");
    }

    #[test]
    fn changing_a_field_resets_page() {
        let mut filters = FilterSet::new().with("title", "alien").with_page(4);
        filters.set("genre", "Horror");
        assert_eq!(filters.page(), 1);
        assert_eq!(filters.get("genre"), Some("Horror"));
    }

    #[test]
    fn page_is_not_a_regular_field() {
        let mut filters = FilterSet::new().with_page(3);
        filters.set("page", "9");
        assert_eq!(filters.page(), 3);
        filters.set_page(0);
        assert_eq!(filters.page(), 1);
    }

    #[test]
    fn empty_values_are_not_sent() {
        let filters = FilterSet::new()
            .with("actor", "")
            .with("director", "  ")
            .with("title", "la strada")
            .with_page(2);
        assert_eq!(filters.get("actor"), None);
        assert_eq!(filters.to_query_string(), "title=la%20strada&page=2");
    }

    #[test]
    fn encodes_reserved_characters() {
        let filters = FilterSet::new().with("title", "Tom & Jerry");
        assert_eq!(filters.to_query_string(), "title=Tom%20%26%20Jerry&page=1");
    }
}
