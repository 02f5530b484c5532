//! Non-recursive directory listing.

use std::ops::ControlFlow;

use log::debug;

use crate::{
    container::Container,
    error::{Error, Result},
    limits::Limits,
    resolve::resolve,
    scan::for_each_entry,
};

/// Is `path` an immediate child of the directory `base`?
///
/// `base` is either empty (the archive root) or ends with a separator.  Children may carry one
/// trailing separator of their own (subdirectories), but nothing below them is included.
fn is_child(path: &str, base: &str) -> bool {
    match path.strip_prefix(base) {
        Some("") | None => false,
        Some(rest) => match rest.find('/') {
            None => true,
            Some(pos) => pos == rest.len() - 1,
        },
    }
}

/// Work out the prefix shared by all children of `path`.
fn directory_base(container: &mut impl Container, path: &str, limits: &Limits) -> Result<String> {
    if path.is_empty() {
        return Ok(String::new());
    }

    let resolved = resolve(container, path, limits)?;
    if !resolved.header.entry_type.is_dir() {
        debug!("listing {path:?}: {:?} is not a directory", resolved.path);
        return Err(Error::NotFound);
    }

    let mut base = resolved.path;
    if !base.is_empty() && !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}

fn collect(
    container: &mut impl Container,
    path: &str,
    capacity: Option<usize>,
    limits: &Limits,
) -> Result<Vec<String>> {
    let base = directory_base(container, path, limits)?;
    let mut children = vec![];
    let mut dropped = 0usize;

    for_each_entry(container, |record| {
        if is_child(&record.path, &base) {
            if capacity.is_some_and(|cap| children.len() >= cap) {
                dropped += 1;
            } else {
                children.push(record.path.clone());
            }
        }
        ControlFlow::Continue(())
    })?;

    if dropped > 0 {
        debug!("listing {path:?}: output full, dropped {dropped} entries");
    }
    Ok(children)
}

/// List the immediate children of the directory at `path`, in storage order.
///
/// An empty `path` lists the top level of the archive.  Otherwise `path` is resolved, following
/// symlinks, and must end up at a directory; anything else is [`Error::NotFound`].  Child paths
/// are returned as stored, so subdirectories usually carry a trailing separator.
pub fn list(container: &mut impl Container, path: &str, limits: &Limits) -> Result<Vec<String>> {
    collect(container, path, None, limits)
}

/// Like [`list`], but return at most `capacity` children.
///
/// Children beyond the capacity are silently dropped, so a result of exactly `capacity`
/// entries may have been truncated.
pub fn list_bounded(
    container: &mut impl Container,
    path: &str,
    capacity: usize,
    limits: &Limits,
) -> Result<Vec<String>> {
    collect(container, path, Some(capacity), limits)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use similar_asserts::assert_eq;

    use super::*;
    use crate::test::ArchiveBuilder;

    fn sample() -> Cursor<Vec<u8>> {
        ArchiveBuilder::new()
            .file("a", b"a")
            .file("b", b"b")
            .dir("c/")
            .file("c/d", b"d")
            .dir("c/e/")
            .file("c/e/f", b"f")
            .file("c/g", b"g")
            .symlink("link", "c/")
            .symlink("file-link", "a")
            .cursor()
    }

    fn strings(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_is_child() {
        assert!(is_child("a", ""));
        assert!(is_child("c/", ""));
        assert!(!is_child("c/d", ""));
        assert!(is_child("c/d", "c/"));
        assert!(is_child("c/e/", "c/"));
        assert!(!is_child("c/e/f", "c/"));
        assert!(!is_child("c/", "c/"));
        assert!(!is_child("cd", "c/"));
    }

    #[test]
    fn test_list_root() {
        let mut archive = sample();
        assert_eq!(
            list(&mut archive, "", &Limits::default()).unwrap(),
            strings(&["a", "b", "c/", "link", "file-link"])
        );
    }

    #[test]
    fn test_list_directory() {
        let mut archive = sample();
        let limits = Limits::default();
        let expected = strings(&["c/d", "c/e/", "c/g"]);
        assert_eq!(list(&mut archive, "c", &limits).unwrap(), expected);
        assert_eq!(list(&mut archive, "c/", &limits).unwrap(), expected);
        // through a symlink, reported under the real directory
        assert_eq!(list(&mut archive, "link", &limits).unwrap(), expected);

        assert_eq!(
            list(&mut archive, "c/e", &limits).unwrap(),
            strings(&["c/e/f"])
        );
    }

    #[test]
    fn test_list_not_a_directory() {
        let mut archive = sample();
        let limits = Limits::default();
        for path in ["a", "file-link", "missing", "c/d"] {
            assert!(
                matches!(list(&mut archive, path, &limits), Err(Error::NotFound)),
                "{path}"
            );
        }
    }

    #[test]
    fn test_list_empty_directory() {
        let mut archive = ArchiveBuilder::new().dir("empty/").file("x", b"").cursor();
        assert!(list(&mut archive, "empty", &Limits::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_list_bounded() {
        let mut archive = sample();
        let limits = Limits::default();
        assert_eq!(
            list_bounded(&mut archive, "", 2, &limits).unwrap(),
            strings(&["a", "b"])
        );
        assert_eq!(
            list_bounded(&mut archive, "c", 10, &limits).unwrap(),
            strings(&["c/d", "c/e/", "c/g"])
        );
        assert!(list_bounded(&mut archive, "c", 0, &limits)
            .unwrap()
            .is_empty());
        assert!(matches!(
            list_bounded(&mut archive, "a", 10, &limits),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn test_list_prefix_directory() {
        use crate::test::RecordBuilder;

        // a directory entry stored as prefix "deep/er" + name "dir/"
        let dir = RecordBuilder::dir("dir/").prefix("deep/er").build();
        let child = RecordBuilder::file("f", 1).prefix("deep/er/dir").build();
        let mut archive = ArchiveBuilder::new()
            .record(dir, b"")
            .record(child, b"x")
            .cursor();
        assert_eq!(
            list(&mut archive, "deep/er/dir", &Limits::default()).unwrap(),
            strings(&["deep/er/dir/f"])
        );
    }

    #[test]
    fn test_list_io_failure() {
        use crate::test::FailingAfter;

        let data = ArchiveBuilder::new()
            .dir("d/")
            .file("d/a", b"a")
            .file("d/b", b"b")
            .finish();
        let limits = Limits::default();

        // resolving "d" succeeds, the scan for children fails at "d/b"
        let err = list(&mut FailingAfter::new(data.clone(), 1024), "d", &limits).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err}");
        assert_eq!(err.code(), -1);

        let err = list(&mut FailingAfter::new(data.clone(), 1024), "", &limits).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err}");

        let err = list_bounded(&mut FailingAfter::new(data, 0), "d", 1, &limits).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err}");
    }
}
