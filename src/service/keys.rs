//! Cache key builders
//!
//! Every key the service writes is built here so the formats stay in one place.

pub fn item_by_id(id: u32) -> String {
    format!("item:id:{}", id)
}

/// Names are case-normalized, so "Pikachu" and "pikachu" share an entry.
pub fn item_by_name(name: &str) -> String {
    format!("item:name:{}", name.to_lowercase())
}

pub fn list_page(limit: usize, offset: usize) -> String {
    format!("list:{}:{}", limit, offset)
}

/// `term` is expected to be lowercase already.
pub fn search_page(term: &str, limit: usize, offset: usize) -> String {
    format!("search:{}:{}:{}", term, limit, offset)
}

pub fn search_candidates(term: &str) -> String {
    format!("search_candidates:{}", term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        assert_eq!(item_by_id(25), "item:id:25");
        assert_eq!(item_by_name("Pikachu"), "item:name:pikachu");
        assert_eq!(list_page(20, 40), "list:20:40");
        assert_eq!(search_page("char", 10, 0), "search:char:10:0");
        assert_eq!(search_candidates("char"), "search_candidates:char");
    }
}
