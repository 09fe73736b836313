//! Capability-based UTF-8 file helpers for the `waypath` binary.
//!
//! Every helper opens the containing directory with ambient authority and
//! performs the file operation relative to it, so paths stay UTF-8 end to
//! end via `camino`.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};
use std::path::Component;

/// Open a UTF-8 file path for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole UTF-8 text file.
pub fn read_utf8_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Return whether `path` exists and is a regular file.
///
/// A missing file surfaces as an [`io::ErrorKind::NotFound`] error so
/// callers can tell it apart from a directory.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_utf8_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    dir.write(name.as_str(), contents)
}

fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base, relative) = split_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?.create_dir_all(&relative)
}

/// Split `parent` into an ambient base directory and a relative suffix,
/// since cap-std directories only accept relative paths.
fn split_root(parent: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();
    let base = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR.to_string())
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => return Ok((Utf8PathBuf::from("."), parent.to_path_buf())),
    };
    let relative = parent
        .strip_prefix(&base)
        .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
        .to_path_buf();
    Ok((base, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        (tmp, root)
    }

    #[rstest]
    fn writes_into_new_directories_and_reads_back(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let path = root.join("nested/out/routes.json");

        write_utf8_file(&path, b"{\"routes\": []}").expect("write should succeed");

        assert_eq!(
            read_utf8_to_string(&path).expect("read should succeed"),
            "{\"routes\": []}"
        );
        assert!(file_is_file(&path).expect("metadata should load"));
    }

    #[rstest]
    fn directories_are_not_files(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let dir = root.join("options.json");
        std::fs::create_dir(&dir).expect("create directory");

        assert!(!file_is_file(&dir).expect("metadata should load"));
    }

    #[rstest]
    fn missing_files_report_not_found(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let err = file_is_file(&root.join("absent.json")).expect_err("file is absent");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn relative_parents_split_from_current_directory() {
        let (base, relative) = split_root(Utf8Path::new("out/nested")).expect("relative split");
        assert_eq!(base, Utf8PathBuf::from("."));
        assert_eq!(relative, Utf8PathBuf::from("out/nested"));
    }

    #[cfg(unix)]
    #[rstest]
    fn absolute_parents_split_from_root() {
        let (base, relative) = split_root(Utf8Path::new("/tmp/out")).expect("absolute split");
        assert_eq!(base, Utf8PathBuf::from("/"));
        assert_eq!(relative, Utf8PathBuf::from("tmp/out"));
    }
}
