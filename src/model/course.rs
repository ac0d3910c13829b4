use serde::{Deserialize, Serialize};

/// A course in the catalog.
///
/// # Store
/// This struct implements the [`Resource`](crate::framework::Resource) trait and the
/// [`Linkable`](crate::links::Linkable) trait; see
/// [`course_service::entity`](crate::course_service::entity) for both.
///
/// `id` is `None` until the store assigns one and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    pub category: String,
    pub rating: u8,
    #[serde(default)]
    pub description: String,
}

impl Course {
    /// Highest accepted rating; the lowest is 0.
    pub const MAX_RATING: u8 = 5;

    /// Creates a course that has not been stored yet.
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        rating: u8,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            category: category.into(),
            rating,
            description: description.into(),
        }
    }

    /// The key this course is grouped under when searching by category.
    pub fn category_key(&self) -> String {
        category_key(&self.category)
    }
}

/// Canonical comparison form of a category: trimmed and lowercased.
pub fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_key_ignores_case_and_padding() {
        assert_eq!(category_key("  Spring "), "spring");
        assert_eq!(category_key("SPRING"), category_key("spring"));
    }

    #[test]
    fn missing_id_and_description_deserialize_to_defaults() {
        let course: Course =
            serde_json::from_str(r#"{"title":"Rust","category":"Systems","rating":3}"#).unwrap();

        assert_eq!(course, Course::new("Rust", "Systems", 3, ""));
    }
}
