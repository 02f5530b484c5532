//! Path resolution and entry classification.
//!
//! [`resolve`] follows symlink entries until it reaches something concrete.  The classification
//! helpers look at exactly what is stored at a path and never follow links.

use std::collections::HashSet;

use log::debug;

use crate::{
    container::Container,
    error::{Error, Result},
    header::{EntryType, Header},
    limits::Limits,
    scan::{find_exact, strip_separator},
};

/// The concrete entry a path resolved to.
#[derive(Clone, Debug)]
pub struct Resolved {
    pub header: Header,
    /// Container offset of the first byte of entry data.
    pub data_offset: u64,
    /// Full path of the entry as stored in the archive.
    pub path: String,
}

/// Resolve `path` to a non-symlink entry.
///
/// One trailing separator is stripped from the path, and from every symlink target along the
/// way.  Link targets are taken as archive paths verbatim.  If the chain doesn't end within
/// [`Limits::max_chain_len`] lookups the path is treated as not found.  A cycle is not found
/// either, as soon as a path repeats, whatever the budget.
pub fn resolve(container: &mut impl Container, path: &str, limits: &Limits) -> Result<Resolved> {
    let mut current = strip_separator(path).to_string();
    let mut visited = HashSet::new();

    for _ in 0..limits.max_chain_len {
        if !visited.insert(current.clone()) {
            debug!("resolving {path:?}: cycle at {current:?}");
            return Err(Error::NotFound);
        }

        let Some(record) = find_exact(container, &current)? else {
            debug!("resolving {path:?}: nothing at {current:?}");
            return Err(Error::NotFound);
        };

        if record.header.entry_type.is_symlink() {
            debug!("resolving {path:?}: {current:?} -> {:?}", record.header.linkname);
            current = strip_separator(&record.header.linkname).to_string();
            continue;
        }

        return Ok(Resolved {
            header: record.header,
            data_offset: record.data_offset,
            path: record.path,
        });
    }

    debug!(
        "resolving {path:?}: gave up after {} lookups",
        limits.max_chain_len
    );
    Err(Error::NotFound)
}

fn stored_type(container: &mut impl Container, path: &str) -> Result<Option<EntryType>> {
    Ok(find_exact(container, path)?.map(|record| record.header.entry_type))
}

/// Is there any entry stored at `path`?
pub fn exists(container: &mut impl Container, path: &str) -> Result<bool> {
    Ok(stored_type(container, path)?.is_some())
}

/// Is the entry stored at `path` a directory?
pub fn is_dir(container: &mut impl Container, path: &str) -> Result<bool> {
    Ok(stored_type(container, path)?.is_some_and(EntryType::is_dir))
}

/// Is the entry stored at `path` a regular file?
pub fn is_file(container: &mut impl Container, path: &str) -> Result<bool> {
    Ok(stored_type(container, path)?.is_some_and(EntryType::is_file))
}

/// Is the entry stored at `path` a symlink?  The target doesn't need to exist.
pub fn is_symlink(container: &mut impl Container, path: &str) -> Result<bool> {
    Ok(stored_type(container, path)?.is_some_and(EntryType::is_symlink))
}
