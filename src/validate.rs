//! Structural validation of a whole archive.

use std::ops::ControlFlow;

use log::debug;

use crate::{
    container::Container,
    error::{ChecksumFailure, ValidationError},
    header::compute_checksum,
    scan::{for_each_entry, Record},
};

fn check_record(record: &Record) -> Result<(), ValidationError> {
    let header = &record.header;

    if !header.magic_valid() {
        return Err(ValidationError::InvalidMagic);
    }

    if !header.version_valid() {
        return Err(ValidationError::InvalidVersion);
    }

    if !header.checksum_valid(&record.block) {
        return Err(ValidationError::InvalidChecksum(ChecksumFailure::Mismatch {
            expected: header.checksum,
            computed: compute_checksum(&record.block),
        }));
    }

    Ok(())
}

/// Check every header of the archive.
///
/// Each non-terminator header must carry the ustar magic, the ustar version and a correct
/// checksum, checked in that order.  The first violation ends the scan.  A failure to read or
/// seek the container is reported as [`ValidationError::InvalidChecksum`].
///
/// Returns the number of headers in the archive.
pub fn validate(container: &mut impl Container) -> Result<usize, ValidationError> {
    let mut valid = 0;
    let mut failure = None;

    for_each_entry(container, |record| match check_record(record) {
        Ok(()) => {
            valid += 1;
            ControlFlow::Continue(())
        }
        Err(err) => {
            debug!("header #{valid} {:?} is invalid: {err}", record.path);
            failure = Some(err);
            ControlFlow::Break(())
        }
    })?;

    match failure {
        Some(err) => Err(err),
        None => {
            debug!("archive holds {valid} valid headers");
            Ok(valid)
        }
    }
}
