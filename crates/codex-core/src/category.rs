//! Item category ids and their public subtype labels

/// Subtype label for an item category id.
///
/// Unknown categories map to `"unknown"` rather than failing the render.
pub fn subtype_for_category(category_id: u32) -> &'static str {
    match category_id {
        0 => "equipment",
        1 => "consumables",
        2 => "resources",
        3 => "quest_items",
        5 => "cosmetics",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories() {
        assert_eq!(subtype_for_category(0), "equipment");
        assert_eq!(subtype_for_category(2), "resources");
        assert_eq!(subtype_for_category(5), "cosmetics");
    }

    #[test]
    fn test_unknown_category() {
        assert_eq!(subtype_for_category(4), "unknown");
        assert_eq!(subtype_for_category(99), "unknown");
    }
}
