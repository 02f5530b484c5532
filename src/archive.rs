//! A container bundled with its traversal limits.

use crate::{
    container::Container,
    error::{Result, ValidationError},
    limits::Limits,
    list, read,
    read::ReadOutcome,
    resolve::{self, Resolved},
    scan::{self, Record},
    validate,
};

/// Read-only view of a tar archive stored in `C`.
///
/// Every method scans the container from the start, so calls can be made in any order.  The
/// handle holds nothing but the container and the limits; no entry is ever cached.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use tarnav::Archive;
///
/// // an empty archive: just the two terminator records
/// let mut archive = Archive::new(Cursor::new(vec![0u8; 1024]));
/// assert_eq!(archive.validate().unwrap(), 0);
/// assert!(archive.list("").unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct Archive<C: Container> {
    container: C,
    limits: Limits,
}

impl<C: Container> Archive<C> {
    pub fn new(container: C) -> Self {
        Self::with_limits(container, Limits::default())
    }

    pub fn with_limits(container: C, limits: Limits) -> Self {
        Archive { container, limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Give the container back.
    pub fn into_inner(self) -> C {
        self.container
    }

    /// See [`validate::validate`].
    pub fn validate(&mut self) -> std::result::Result<usize, ValidationError> {
        validate::validate(&mut self.container)
    }

    /// Find the entry stored at exactly `path`, without following symlinks.
    pub fn find(&mut self, path: &str) -> Result<Option<Record>> {
        Ok(scan::find_exact(&mut self.container, path)?)
    }

    /// All headers, in storage order.
    pub fn entries(&mut self) -> Result<Vec<Record>> {
        let mut records = vec![];
        scan::for_each_entry(&mut self.container, |record| {
            records.push(record.clone());
            std::ops::ControlFlow::Continue(())
        })?;
        Ok(records)
    }

    /// See [`resolve::resolve`].
    pub fn resolve(&mut self, path: &str) -> Result<Resolved> {
        resolve::resolve(&mut self.container, path, &self.limits)
    }

    pub fn exists(&mut self, path: &str) -> Result<bool> {
        resolve::exists(&mut self.container, path)
    }

    pub fn is_dir(&mut self, path: &str) -> Result<bool> {
        resolve::is_dir(&mut self.container, path)
    }

    pub fn is_file(&mut self, path: &str) -> Result<bool> {
        resolve::is_file(&mut self.container, path)
    }

    pub fn is_symlink(&mut self, path: &str) -> Result<bool> {
        resolve::is_symlink(&mut self.container, path)
    }

    /// See [`list::list`].
    pub fn list(&mut self, path: &str) -> Result<Vec<String>> {
        list::list(&mut self.container, path, &self.limits)
    }

    /// See [`list::list_bounded`].
    pub fn list_bounded(&mut self, path: &str, capacity: usize) -> Result<Vec<String>> {
        list::list_bounded(&mut self.container, path, capacity, &self.limits)
    }

    /// See [`read::read`].
    pub fn read(&mut self, path: &str, offset: u64, dest: &mut [u8]) -> Result<ReadOutcome> {
        read::read(&mut self.container, path, offset, dest, &self.limits)
    }

    pub fn read_to_vec(&mut self, path: &str) -> Result<Vec<u8>> {
        read::read_to_vec(&mut self.container, path, &self.limits)
    }
}
