//! Read-only navigation of ustar archives.
//!
//! This crate looks inside a tar archive stored in any seekable container (a [`std::fs::File`],
//! a [`std::io::Cursor`], ...) without extracting it.  It can validate the structure of the
//! archive, resolve paths through symlink entries, classify entries, list directories one level
//! deep and read file contents piecewise.
//!
//! Only the fixed 512-byte ustar header record is understood; GNU and PAX extension records
//! show up as entries of type [`EntryType::Other`].  Nothing is ever written.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use tarnav::Archive;
//!
//! let mut archive = Archive::new(File::open("archive.tar").unwrap());
//! let count = archive.validate().unwrap();
//! println!("{count} entries");
//!
//! for path in archive.list("").unwrap() {
//!     println!("{path}");
//! }
//!
//! let mut buf = [0u8; 4096];
//! let outcome = archive.read("docs/README", 0, &mut buf).unwrap();
//! println!("read {} bytes, {} left", outcome.written, outcome.remaining);
//! ```

pub mod archive;
pub mod container;
pub mod error;
pub mod header;
pub mod limits;
pub mod list;
pub mod read;
pub mod resolve;
pub mod scan;
pub mod validate;


pub use archive::Archive;
pub use container::Container;
pub use error::{ChecksumFailure, Error, Result, ValidationError};
pub use header::{EntryType, Header, BLOCK_SIZE};
pub use limits::Limits;
pub use read::ReadOutcome;
pub use resolve::Resolved;
pub use scan::Record;
