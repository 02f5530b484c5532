//! Reading file contents out of the archive.

use log::debug;

use crate::{
    container::{read_fully, Container},
    error::{Error, Result},
    limits::Limits,
    resolve::{resolve, Resolved},
};

const CHUNK_SIZE: usize = 64 * 1024;

/// Outcome of a successful [`read`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Bytes written to the start of the destination buffer.
    pub written: usize,
    /// Bytes between the end of this read and the end of the file.
    pub remaining: u64,
}

impl ReadOutcome {
    /// True if the read reached the end of the file.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

fn resolve_file(container: &mut impl Container, path: &str, limits: &Limits) -> Result<Resolved> {
    let resolved = resolve(container, path, limits)?;
    if !resolved.header.entry_type.is_file() {
        debug!("reading {path:?}: {:?} is not a regular file", resolved.path);
        return Err(Error::NotFound);
    }
    Ok(resolved)
}

/// Read part of the file at `path`, starting `offset` bytes into it.
///
/// Symlinks are followed; the path must end up at a regular file.  At most `dest.len()` bytes
/// are read.  An offset equal to the file size is a valid, empty read; anything beyond it is
/// [`Error::OffsetOutOfRange`].
pub fn read(
    container: &mut impl Container,
    path: &str,
    offset: u64,
    dest: &mut [u8],
    limits: &Limits,
) -> Result<ReadOutcome> {
    let resolved = resolve_file(container, path, limits)?;
    let size = resolved.header.size;

    if offset > size {
        return Err(Error::OffsetOutOfRange { offset, size });
    }

    let available = size - offset;
    let wanted = usize::try_from(available).map_or(dest.len(), |n| n.min(dest.len()));

    container.seek_to(resolved.data_offset + offset)?;
    let written = read_fully(container, &mut dest[..wanted])?;
    if written < wanted {
        debug!("reading {path:?}: container ended {} bytes early", wanted - written);
    }

    Ok(ReadOutcome {
        written,
        remaining: available - written as u64,
    })
}

/// Read the whole file at `path` into memory.
///
/// The buffer grows with the data actually present, so a header claiming more than the container
/// holds only yields what is there.
pub fn read_to_vec(container: &mut impl Container, path: &str, limits: &Limits) -> Result<Vec<u8>> {
    let resolved = resolve_file(container, path, limits)?;
    let mut remaining = resolved.header.size;
    let mut data = vec![];
    let mut chunk = vec![0u8; CHUNK_SIZE];

    container.seek_to(resolved.data_offset)?;
    while remaining > 0 {
        let wanted = usize::try_from(remaining).map_or(CHUNK_SIZE, |n| n.min(CHUNK_SIZE));
        let got = read_fully(container, &mut chunk[..wanted])?;
        data.extend_from_slice(&chunk[..got]);
        remaining -= got as u64;
        if got < wanted {
            debug!("reading {path:?}: container ended {remaining} bytes early");
            break;
        }
    }

    Ok(data)
}
