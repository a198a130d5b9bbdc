// Qualified Name Utilities
//
// Symbol keys in the dependency graph are dot-separated: the module path of the
// file (its location relative to the workspace root), then the enclosing type,
// then the local name, e.g. `src.services.user.UserService.load`.

use super::paths;

/// Dotted module path of a file relative to the workspace root
///
/// The extension is stripped, the path is made relative to `workspace_root`,
/// and separators become `.`. Either separator style is accepted. A file equal
/// to the root yields an empty string.
///
/// # Examples
/// ```
/// use symgraph_core::utils::qualified_name::module_path;
///
/// assert_eq!(module_path("/ws", "/ws/src/foo.ts"), "src.foo");
/// assert_eq!(module_path("C:\\ws", "C:\\ws\\src\\foo.ts"), "src.foo");
/// ```
pub fn module_path(workspace_root: &str, file_path: &str) -> String {
    let file_path = paths::normalize_separators(file_path);
    module_path_from_stem(workspace_root, paths::strip_extension(&file_path))
}

/// Dotted module path for a path that already has no extension
///
/// Used for the quoted path segment of fully-qualified names, which never
/// carries an extension (so a trailing `.test` in `foo.test` must survive).
pub fn module_path_from_stem(workspace_root: &str, stem: &str) -> String {
    paths::relative_path(workspace_root, stem)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Join the non-empty parts with `.`
pub fn compose<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut composed = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !composed.is_empty() {
            composed.push('.');
        }
        composed.push_str(part);
    }
    composed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_path_nested_file() {
        assert_eq!(module_path("/ws", "/ws/src/foo.ts"), "src.foo");
        assert_eq!(module_path("/ws", "/ws/src/tools/editing/fuzzy.tsx"), "src.tools.editing.fuzzy");
    }

    #[test]
    fn test_module_path_root_level_file() {
        assert_eq!(module_path("/ws", "/ws/foo.ts"), "foo");
    }

    #[test]
    fn test_module_path_file_equal_to_root() {
        assert_eq!(module_path("/ws", "/ws"), "");
    }

    #[test]
    fn test_module_path_backslashes_match_forward_slashes() {
        assert_eq!(
            module_path("C:\\ws", "C:\\ws\\src\\foo.ts"),
            module_path("C:/ws", "C:/ws/src/foo.ts")
        );
        assert_eq!(module_path("\\ws", "\\ws\\src\\foo.ts"), "src.foo");
    }

    #[test]
    fn test_module_path_keeps_inner_dots() {
        assert_eq!(module_path("/ws", "/ws/src/foo.test.ts"), "src.foo.test");
    }

    #[test]
    fn test_module_path_outside_root_keeps_parent_segments() {
        assert_eq!(module_path("/ws/app", "/ws/lib/x.ts"), "...lib.x");
    }

    #[test]
    fn test_module_path_from_stem_does_not_strip() {
        assert_eq!(module_path_from_stem("/ws", "/ws/src/foo.test"), "src.foo.test");
    }

    #[test]
    fn test_compose_skips_empty_parts() {
        assert_eq!(compose(["src.foo", "Foo", "bar"]), "src.foo.Foo.bar");
        assert_eq!(compose(["", "foo"]), "foo");
        assert_eq!(compose(["src.foo", "", "bar"]), "src.foo.bar");
        assert_eq!(compose(Vec::<String>::new()), "");
    }
}
