use std::path::{Component, Path, PathBuf};

use crate::entry::EntryKind;
use crate::error::{Error, Result};

/// Map a stored entry name onto a path under `root`.
///
/// Returns `Ok(None)` for entries that stand for `root` itself (`.`, `./`,
/// `/` directories). One leading `./` and then one leading `/` are stripped,
/// and directories lose one trailing `/`. Names that still carry a `..`
/// component, a root or a drive prefix are rejected instead of clamped.
pub fn normalize_entry_path(name: &str, kind: EntryKind, root: &Path) -> Result<Option<PathBuf>> {
    if kind.is_directory() && (name == "." || name == "./") {
        return Ok(None);
    }

    let relative = name.strip_prefix("./").unwrap_or(name);
    let relative = relative.strip_prefix('/').unwrap_or(relative);
    let relative = if kind.is_directory() {
        relative.strip_suffix('/').unwrap_or(relative)
    } else {
        relative
    };

    let traversal = || Error::PathTraversal {
        entry: name.to_string(),
        root: root.to_path_buf(),
    };

    let mut clean = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(traversal());
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return if kind.is_directory() {
            Ok(None)
        } else {
            Err(Error::InvalidEntryName(name.to_string()))
        };
    }

    let resolved = root.join(clean);
    if !resolved.starts_with(root) {
        return Err(traversal());
    }
    Ok(Some(resolved))
}
