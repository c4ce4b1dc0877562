//! Key normalization.
//!
//! Maps a fully qualified type name and a numeric object id onto a single
//! index document key. Type names may use either `\` or `::` as
//! namespace separator; both are flattened to `-` so the result is safe in
//! document keys and in field-equality filter queries.
//!
//! Normalization must be injective over the type names one deployment
//! actually uses. `Foo\Bar` and `Foo-Bar` collide; avoiding that is up to
//! the caller.

/// Separator used by backslash-namespaced type names.
pub const BACKSLASH_SEPARATOR: &str = "\\";

/// Separator used by Rust paths.
pub const PATH_SEPARATOR: &str = "::";

/// Replacement for every namespace separator in a normalized type.
pub const NORMALIZED_SEPARATOR: &str = "-";

/// Separator between the normalized type and the object id in a key.
pub const KEY_SEPARATOR: char = ':';

/// Normalize a fully qualified type name into a flat token.
///
/// One leading separator is stripped, then every remaining separator is
/// replaced with `-`.
///
/// ```
/// use content_mapping_shared::normalize_object_class;
///
/// assert_eq!(normalize_object_class("\\Foo\\Bar"), "Foo-Bar");
/// assert_eq!(normalize_object_class("Foo\\Bar"), "Foo-Bar");
/// assert_eq!(normalize_object_class("app::model::Article"), "app-model-Article");
/// ```
pub fn normalize_object_class(object_class: &str) -> String {
    let unprefixed = object_class
        .strip_prefix(BACKSLASH_SEPARATOR)
        .or_else(|| object_class.strip_prefix(PATH_SEPARATOR))
        .unwrap_or(object_class);

    unprefixed
        .replace(PATH_SEPARATOR, NORMALIZED_SEPARATOR)
        .replace(BACKSLASH_SEPARATOR, NORMALIZED_SEPARATOR)
}

/// Build the composite document key `{normalized_type}:{object_id}`.
pub fn composite_key(normalized_type: &str, object_id: i64) -> String {
    format!("{}{}{}", normalized_type, KEY_SEPARATOR, object_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_single_leading_separator() {
        assert_eq!(normalize_object_class("\\Foo\\Bar"), "Foo-Bar");
        assert_eq!(normalize_object_class("Foo\\Bar"), "Foo-Bar");
        assert_eq!(normalize_object_class("\\\\Foo"), "-Foo");
    }

    #[test]
    fn test_normalize_rust_paths() {
        assert_eq!(normalize_object_class("blog::Article"), "blog-Article");
        assert_eq!(normalize_object_class("::blog::Article"), "blog-Article");
    }

    #[test]
    fn test_normalize_flat_name_is_unchanged() {
        assert_eq!(normalize_object_class("Article"), "Article");
        assert_eq!(normalize_object_class(""), "");
    }

    #[test]
    fn test_composite_key() {
        assert_eq!(composite_key("Foo-Bar", 5), "Foo-Bar:5");
        assert_eq!(composite_key("Article", -1), "Article:-1");
    }
}
