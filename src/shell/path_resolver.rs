//! Path Resolution
//!
//! Turns shell path strings (absolute, `~`-relative, cwd-relative, with `.`
//! and `..`) into canonical absolute paths and the nodes they name.

use crate::fs::{Node, TreeStore};

use super::errors::ShellError;

/// Where relative paths are interpreted from.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// Absolute path of the working directory
    pub cwd: &'a str,
    /// Absolute path substituted for a leading `~`
    pub home: &'a str,
}

/// A resolved path: its canonical form and the node it names.
#[derive(Debug, Clone)]
pub struct Resolved<'t> {
    pub path: String,
    pub node: &'t Node,
}

/// Fold a raw path into canonical segments without touching the tree.
pub fn normalize(raw: &str, ctx: &ResolutionContext<'_>) -> Vec<String> {
    let full = if let Some(rest) = raw.strip_prefix('~') {
        format!("{}{}", ctx.home, rest)
    } else if raw.starts_with('/') {
        raw.to_string()
    } else if ctx.cwd == "/" {
        format!("/{}", raw)
    } else {
        format!("{}/{}", ctx.cwd, raw)
    };

    let mut segments: Vec<String> = Vec::new();
    for part in full.split('/').filter(|p| !p.is_empty()) {
        match part {
            "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(part.to_string()),
        }
    }
    segments
}

/// Join canonical segments into an absolute path.
pub fn to_path(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

/// Resolve `raw` against the tree. Every intermediate segment must be a
/// directory; the empty segment list is the root.
pub fn resolve<'t>(
    tree: &'t TreeStore,
    raw: &str,
    ctx: &ResolutionContext<'_>,
) -> Result<Resolved<'t>, ShellError> {
    let segments = normalize(raw, ctx);
    let mut current = tree.file_system();

    for segment in &segments {
        if !current.is_directory() {
            return Err(ShellError::PathNotFound { path: raw.to_string() });
        }
        current = current
            .child_named(segment)
            .ok_or_else(|| ShellError::PathNotFound { path: raw.to_string() })?;
    }

    Ok(Resolved {
        path: to_path(&segments),
        node: current,
    })
}

/// Split a path at its last `/` into parent part and base name.
/// `None` means "the working directory"; `/name` has the root as parent.
pub fn split_parent(raw: &str) -> (Option<&str>, &str) {
    match raw.rfind('/') {
        Some(0) => (Some("/"), &raw[1..]),
        Some(pos) => (Some(&raw[..pos]), &raw[pos + 1..]),
        None => (None, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::shell_tree;

    const CTX: ResolutionContext<'static> = ResolutionContext {
        cwd: "/home/user",
        home: "/home/user",
    };

    fn tree() -> TreeStore {
        TreeStore::new(shell_tree())
    }

    #[test]
    fn test_normalize_dot_segments() {
        assert_eq!(normalize("/a/./b/../c", &CTX), vec!["a", "c"]);
        assert_eq!(normalize("/../..", &CTX), Vec::<String>::new());
        assert_eq!(normalize("//etc///hosts/", &CTX), vec!["etc", "hosts"]);
    }

    #[test]
    fn test_normalize_relative_and_home() {
        assert_eq!(normalize("docs", &CTX), vec!["home", "user", "docs"]);
        assert_eq!(normalize("~/docs", &CTX), vec!["home", "user", "docs"]);
        assert_eq!(normalize("..", &CTX), vec!["home"]);
        let at_root = ResolutionContext { cwd: "/", home: "/home/user" };
        assert_eq!(normalize("etc", &at_root), vec!["etc"]);
    }

    #[test]
    fn test_resolve_canonical_equivalence() {
        let tree = tree();
        let a = resolve(&tree, "/home/../home/user", &CTX).unwrap();
        let b = resolve(&tree, "/home/user", &CTX).unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.node.id, b.node.id);
    }

    #[test]
    fn test_resolve_home() {
        let tree = tree();
        let tilde = resolve(&tree, "~", &CTX).unwrap();
        let home = resolve(&tree, CTX.home, &CTX).unwrap();
        assert_eq!(tilde.path, "/home/user");
        assert_eq!(tilde.node.id, home.node.id);

        let file = resolve(&tree, "~/documents/readme.txt", &CTX).unwrap();
        assert!(file.node.is_file());
    }

    #[test]
    fn test_resolve_root() {
        let tree = tree();
        let root = resolve(&tree, "/", &CTX).unwrap();
        assert_eq!(root.path, "/");
        assert_eq!(root.node.id, "/");
        assert_eq!(resolve(&tree, "../../..", &CTX).unwrap().node.id, "/");
    }

    #[test]
    fn test_resolve_failures() {
        let tree = tree();
        assert_eq!(
            resolve(&tree, "missing", &CTX).unwrap_err(),
            ShellError::PathNotFound { path: "missing".to_string() }
        );
        // a file cannot be an intermediate segment
        assert!(resolve(&tree, "/etc/hosts/x", &CTX).is_err());
    }

    #[test]
    fn test_split_parent() {
        assert_eq!(split_parent("a.txt"), (None, "a.txt"));
        assert_eq!(split_parent("docs/a.txt"), (Some("docs"), "a.txt"));
        assert_eq!(split_parent("/a.txt"), (Some("/"), "a.txt"));
        assert_eq!(split_parent("/x/y/z"), (Some("/x/y"), "z"));
    }
}
