//! Shared types used throughout the library.

mod version;

pub use version::{Dialect, MinecraftVersion};

/// Split a resource location into namespace and path.
/// "minecraft:font/ascii" -> ("minecraft", "font/ascii")
/// "font/ascii" -> ("minecraft", "font/ascii")
pub fn parse_resource_location(resource_location: &str) -> (&str, &str) {
    if let Some((namespace, path)) = resource_location.split_once(':') {
        (namespace, path)
    } else {
        ("minecraft", resource_location)
    }
}

/// Add the `minecraft:` namespace to a bare resource path.
pub fn normalize_resource_location(resource_location: &str) -> String {
    let (namespace, path) = parse_resource_location(resource_location);
    format!("{}:{}", namespace, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_location() {
        assert_eq!(
            parse_resource_location("minecraft:font/ascii"),
            ("minecraft", "font/ascii")
        );
        assert_eq!(
            parse_resource_location("mymod:custom"),
            ("mymod", "custom")
        );
        assert_eq!(parse_resource_location("default"), ("minecraft", "default"));
    }

    #[test]
    fn test_normalize_resource_location() {
        assert_eq!(normalize_resource_location("uniform"), "minecraft:uniform");
        assert_eq!(normalize_resource_location("mymod:big"), "mymod:big");
    }
}
