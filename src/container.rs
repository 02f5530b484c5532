//! The byte container an archive is stored in.

use std::io::{ErrorKind, Read, Result, Seek, SeekFrom};

use crate::header::{Block, BLOCK_SIZE};

/// A random-access byte source holding a tar archive.
///
/// The container is owned by the caller.  Navigation only moves its cursor around; every
/// operation seeks back to the start before scanning, so no particular cursor position is
/// expected between calls.  The cursor is shared state, so one container must not be used from
/// several threads at once.
pub trait Container {
    /// Move the cursor to an absolute offset.  Seeking beyond the end is allowed; subsequent
    /// reads simply return no data.
    fn seek_to(&mut self, offset: u64) -> Result<()>;

    /// Read into `buf`, returning fewer bytes than requested only at the end of the container.
    fn read_some(&mut self, buf: &mut [u8]) -> Result<usize>;
}

impl<T: Read + Seek> Container for T {
    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn read_some(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.read(buf)
    }
}

/// Fill as much of `buf` as the container allows, retrying on EINTR.
///
/// Returns the number of bytes read, which is less than `buf.len()` only if the end of the
/// container was reached.
pub(crate) fn read_fully(container: &mut impl Container, buf: &mut [u8]) -> Result<usize> {
    let mut done = 0;

    while done < buf.len() {
        match container.read_some(&mut buf[done..]) {
            Ok(0) => break,
            Ok(n) => done += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(done)
}

/// Read the next header record.
///
/// There are three possible outcomes:
///
///  - a full record was read: returns `Ok(Some(block))`
///  - the container ended, cleanly or in the middle of a record: returns `Ok(None)`
///  - the underlying read failed: the error is returned directly
pub(crate) fn read_block(container: &mut impl Container) -> Result<Option<Block>> {
    let mut block = [0u8; BLOCK_SIZE];
    match read_fully(container, &mut block)? {
        BLOCK_SIZE => Ok(Some(block)),
        0 => Ok(None),
        n => {
            log::warn!("ignoring truncated record of {n} bytes at end of archive");
            Ok(None)
        }
    }
}
