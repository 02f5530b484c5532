//! Sequential scanning of archive records.
//!
//! Every operation of this crate is built on [`for_each_entry`]: it rewinds the container,
//! walks the headers in storage order and hands each one to a visitor, skipping over the entry
//! data in between.  Nothing is cached; the archive itself is the only index.

use std::{io::Result, ops::ControlFlow};

use log::trace;

use crate::{
    container::{read_block, Container},
    header::{is_terminator, Block, Header, BLOCK_SIZE},
};

/// One header record found during a scan.
#[derive(Clone, Debug)]
pub struct Record {
    pub header: Header,
    /// The record as stored, for checksum verification.
    pub block: Block,
    /// The decoded full path of the entry.
    pub path: String,
    /// Container offset of the first byte of entry data.
    pub data_offset: u64,
}

/// Visit every header of the archive, in storage order.
///
/// The scan starts at offset 0 regardless of where the cursor was left, and ends at the first
/// all-zero record, at the end of the container, or when `visit` breaks.  The cursor position
/// afterwards is unspecified.
///
/// Returns the number of records passed to `visit`.
pub fn for_each_entry(
    container: &mut impl Container,
    mut visit: impl FnMut(&Record) -> ControlFlow<()>,
) -> Result<usize> {
    container.seek_to(0)?;

    let mut offset = 0u64;
    let mut visited = 0;

    while let Some(block) = read_block(container)? {
        if is_terminator(&block) {
            trace!("terminator record @{offset}");
            break;
        }

        let header = Header::decode(&block);
        let data_offset = offset + BLOCK_SIZE as u64;
        let next = data_offset.saturating_add(header.padded_size());
        let record = Record {
            path: header.full_path(),
            header,
            block,
            data_offset,
        };
        trace!(
            "record @{offset} {:?} {:?} size {}",
            record.path,
            record.header.entry_type,
            record.header.size
        );

        visited += 1;
        if visit(&record).is_break() {
            break;
        }

        container.seek_to(next)?;
        offset = next;
    }

    Ok(visited)
}

/// Strip exactly one trailing separator, if present.
pub(crate) fn strip_separator(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Does `record` live at exactly `path`?
///
/// Directories match with or without a trailing separator on either side; every other kind of
/// entry only matches its stored path verbatim.
pub fn matches_path(record: &Record, path: &str) -> bool {
    if record.header.entry_type.is_dir() {
        strip_separator(&record.path) == strip_separator(path)
    } else {
        record.path == path
    }
}

/// Find the first entry stored at exactly `path`, without following symlinks.
pub fn find_exact(container: &mut impl Container, path: &str) -> Result<Option<Record>> {
    let mut found = None;

    for_each_entry(container, |record| {
        if matches_path(record, path) {
            found = Some(record.clone());
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    Ok(found)
}
