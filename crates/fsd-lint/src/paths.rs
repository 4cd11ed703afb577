//! Lexical path algebra over `/`-separated strings.
//!
//! Nothing in this module touches the filesystem: `..` is collapsed
//! textually and symlinks are not followed.

/// Replaces Windows separators with `/`.
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns `true` for `.`, `..`, and specifiers starting with `./` or `../`.
#[must_use]
pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Directory part of a path.
///
/// ```
/// use fsd_lint::paths::dirname;
///
/// assert_eq!(dirname("/src/app/index.ts"), "/src/app");
/// assert_eq!(dirname("/index.ts"), "/");
/// assert_eq!(dirname("index.ts"), ".");
/// ```
#[must_use]
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => ".",
    }
}

/// Collapses empty, `.` and `..` segments.
///
/// A leading `/` is kept. For absolute paths `..` never climbs above the
/// root; for relative paths leading `..` segments are preserved.
///
/// ```
/// use fsd_lint::paths::normalize;
///
/// assert_eq!(normalize("/src/entities/user/../../app/./providers"), "/src/app/providers");
/// assert_eq!(normalize("/../x"), "/x");
/// assert_eq!(normalize("../a//b"), "../a/b");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if out.last().is_some_and(|s| *s != "..") {
                    out.pop();
                } else if !absolute {
                    out.push("..");
                }
            }
            s => out.push(s),
        }
    }
    let joined = out.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_owned()
    } else {
        joined
    }
}

/// Resolves `rel` against directory `base`.
#[must_use]
pub fn join(base: &str, rel: &str) -> String {
    if rel.starts_with('/') {
        normalize(rel)
    } else {
        normalize(&format!("{base}/{rel}"))
    }
}

/// Path that leads from directory `from` to `to`.
///
/// Both inputs should be normalized the same way (both absolute, or both
/// relative to the same base). Returns an empty string when they are equal.
///
/// ```
/// use fsd_lint::paths::relative;
///
/// assert_eq!(relative("/src/entities/test/ui", "/src/entities/test/file2"), "../file2");
/// assert_eq!(relative("/src/entities/test", "/src/entities/test/file2"), "file2");
/// assert_eq!(relative("/a/b", "/a/b"), "");
/// ```
#[must_use]
pub fn relative(from: &str, to: &str) -> String {
    let from_segs = segments(from);
    let to_segs = segments(to);
    let common = from_segs
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_segs.len() - common];
    parts.extend_from_slice(&to_segs[common..]);
    parts.join("/")
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Strips a trailing `.ext` from the final segment when `ext` is listed.
///
/// ```
/// use fsd_lint::paths::strip_extension;
///
/// let exts = vec!["ts".to_owned(), "tsx".to_owned()];
/// assert_eq!(strip_extension("../ui/Button.tsx", &exts), "../ui/Button");
/// assert_eq!(strip_extension("./styles.css", &exts), "./styles.css");
/// ```
#[must_use]
pub fn strip_extension<'a>(path: &'a str, extensions: &[String]) -> &'a str {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    let file = &path[file_start..];
    match file.rfind('.') {
        Some(dot) if dot > 0 && extensions.iter().any(|e| *e == file[dot + 1..]) => {
            &path[..file_start + dot]
        }
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_markers() {
        assert!(is_relative("./model"));
        assert!(is_relative("../lib"));
        assert!(is_relative("."));
        assert!(is_relative(".."));
        assert!(!is_relative(".eslintrc"));
        assert!(!is_relative("@entities/user"));
        assert!(!is_relative("react"));
    }

    #[test]
    fn separators_are_normalized() {
        assert_eq!(
            normalize_separators(r"C:\web\src\app\index.ts"),
            "C:/web/src/app/index.ts"
        );
    }

    #[test]
    fn join_climbs_out_of_slice() {
        assert_eq!(
            join("/src/entities/user", "../../app/providers"),
            "/src/app/providers"
        );
        assert_eq!(join("/src/app", "./providers"), "/src/app/providers");
        assert_eq!(join("/src/app", "/abs/x"), "/abs/x");
    }

    #[test]
    fn relative_walks_up_and_down() {
        assert_eq!(relative("/src/a/b/c", "/src/a/x/y"), "../../x/y");
        assert_eq!(relative("/src/a", "/src"), "..");
    }

    #[test]
    fn strip_extension_ignores_dotfiles() {
        let exts = vec!["ts".to_owned()];
        assert_eq!(strip_extension("./.ts", &exts), "./.ts");
        assert_eq!(strip_extension("index.d.ts", &exts), "index.d");
    }
}
