//! Capability-based file helpers for UTF-8 paths.

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Open the directory containing `path` and return it with the file name.
pub(crate) fn open_parent(path: &Utf8Path) -> io::Result<(Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Create every missing directory above `path`.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (root, relative) = split_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    Dir::open_ambient_dir(&root, ambient_authority())?.create_dir_all(&relative)
}

/// Split `path` into an ambient root (`/`, a Windows prefix, or `.`) and the
/// remainder relative to it.
fn split_root(path: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let mut components = path.as_std_path().components();
    let root = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            if matches!(components.clone().next(), Some(Component::RootDir)) {
                components.next();
            }
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => return Ok((Utf8PathBuf::from("."), path.to_path_buf())),
    };
    let relative = Utf8PathBuf::from_path_buf(components.as_path().to_path_buf())
        .map_err(|_| io::Error::other("non-UTF-8 path"))?;
    Ok((root, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("state/store.json", ".", "state/store.json")]
    #[case("/var/lib/soundmap", "/", "var/lib/soundmap")]
    fn splits_roots(#[case] input: &str, #[case] root: &str, #[case] relative: &str) {
        let (found_root, found_relative) = split_root(Utf8Path::new(input)).expect("split");
        assert_eq!(found_root, Utf8PathBuf::from(root));
        assert_eq!(found_relative, Utf8PathBuf::from(relative));
    }

    #[rstest]
    fn creates_nested_parents() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 tempdir");
        let target = root.join("a/b/store.json");
        ensure_parent_dir(&target).expect("create parents");
        assert!(root.join("a/b").is_dir());
    }
}
