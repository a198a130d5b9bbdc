// Path Conversion Utilities
//
// Lexical, string-only path handling. Module paths and fully-qualified names are
// computed from path text, never from the file system, so both `/` and `\` are
// accepted everywhere and every result uses `/`.

use crate::language::MODULE_EXTENSIONS;

/// Replace Windows separators with `/`
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalize a path lexically: unify separators, drop `.` segments and empty
/// segments, and fold `..` into its parent where one exists.
///
/// A leading `/` is preserved. `..` segments that climb above the start of a
/// relative path are kept.
pub fn normalize(path: &str) -> String {
    let unified = normalize_separators(path);
    let absolute = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Compute the lexical path of `path` relative to `root`
///
/// Mirrors what a `relative(from, to)` helper does: shared leading segments are
/// removed, and each remaining segment of `root` becomes a `..`.
///
/// # Examples
/// ```
/// use symgraph_core::utils::paths::relative_path;
///
/// assert_eq!(relative_path("/ws", "/ws/src/foo"), "src/foo");
/// assert_eq!(relative_path("/ws/app", "/ws/lib/x"), "../lib/x");
/// assert_eq!(relative_path("/ws", "/ws"), "");
/// ```
pub fn relative_path(root: &str, path: &str) -> String {
    let root = normalize(root);
    let path = normalize(path);
    let root_parts = segments(&root);
    let path_parts = segments(&path);

    let common = root_parts
        .iter()
        .zip(&path_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative: Vec<&str> = vec![".."; root_parts.len() - common];
    relative.extend(&path_parts[common..]);
    relative.join("/")
}

/// Check whether `path` lies inside `root`, comparing whole segments
///
/// `/ws2/a` is not inside `/ws` even though it shares the string prefix.
pub fn is_within(root: &str, path: &str) -> bool {
    let root = normalize(root);
    let path = normalize(path);
    if root.starts_with('/') != path.starts_with('/') {
        return false;
    }
    let root_parts = segments(&root);
    let path_parts = segments(&path);
    path_parts.len() >= root_parts.len() && path_parts[..root_parts.len()] == root_parts[..]
}

/// Remove the extension of the final path component
///
/// Only the last `.ext` is removed and dot-files keep their name, so
/// `/a/b.test.ts` becomes `/a/b.test` and `/a/.eslintrc` is unchanged.
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

/// Path of a source file without its TypeScript-aware extension
///
/// Declaration files lose the whole `.d.ts` suffix, which is the shape used in
/// fully-qualified names.
pub fn source_stem(path: &str) -> String {
    let normalized = normalize(path);
    let lower = normalized.to_ascii_lowercase();
    for declaration_ext in [".d.ts", ".d.mts", ".d.cts"] {
        if lower.ends_with(declaration_ext) {
            return normalized[..normalized.len() - declaration_ext.len()].to_string();
        }
    }
    if let Some(ext) = MODULE_EXTENSIONS.iter().find(|ext| lower.ends_with(*ext)) {
        return normalized[..normalized.len() - ext.len()].to_string();
    }
    strip_extension(&normalized).to_string()
}

/// Directory part of a normalized path (`""` when there is none)
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "",
    }
}

/// Join a relative path onto a base directory and normalize the result
pub fn join(base: &str, relative: &str) -> String {
    let relative = normalize_separators(relative);
    if relative.starts_with('/') {
        normalize(&relative)
    } else {
        normalize(&format!("{}/{}", base, relative))
    }
}
