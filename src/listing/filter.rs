use crate::models::{Category, Property};

/// Active category chip and search box text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub category: Category,
    pub query: String,
}

impl SearchState {
    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        apply(properties, self.category, &self.query)
    }
}

/// Narrow `properties` to the ones matching both the category and the query.
///
/// Order is preserved. The query is a case-insensitive substring test against
/// the title or the location; an empty query matches everything.
pub fn apply(properties: &[Property], category: Category, query: &str) -> Vec<Property> {
    let needle = query.to_lowercase();
    properties
        .iter()
        .filter(|property| in_category(property, category) && contains_text(property, &needle))
        .cloned()
        .collect()
}

/// Other listings of the same type, excluding `property` itself.
pub fn similar(properties: &[Property], property: &Property) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| p.property_type == property.property_type && p.id != property.id)
        .cloned()
        .collect()
}

fn in_category(property: &Property, category: Category) -> bool {
    category == Category::All || property.property_type == category.label()
}

// `needle` is already lowercased
fn contains_text(property: &Property, needle: &str) -> bool {
    needle.is_empty()
        || property.location.to_lowercase().contains(needle)
        || property.title.to_lowercase().contains(needle)
}
