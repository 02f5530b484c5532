//! Decoding of fixed-size ustar header records.
//!
//! Every entry in an archive starts with a 512-byte record.  Only the fields needed for
//! navigation are decoded; the rest of the record is carried along untouched in the raw bytes.
//!
//! | Offset | Size | Field     | Encoding                    |
//! |--------|------|-----------|-----------------------------|
//! | 0      | 100  | name      | NUL-padded string           |
//! | 124    | 12   | size      | octal ASCII                 |
//! | 148    | 8    | checksum  | octal ASCII, space-padded   |
//! | 156    | 1    | typeflag  | see [`EntryType`]           |
//! | 157    | 100  | linkname  | NUL-padded string           |
//! | 257    | 6    | magic     | `"ustar\0"`                 |
//! | 263    | 2    | version   | `"00"`                      |
//! | 345    | 155  | prefix    | NUL-padded string           |

use std::{fmt, mem::size_of, ops::Range};

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Size of a header record, and the alignment unit of entry data.
pub const BLOCK_SIZE: usize = 512;

/// Magic string of a ustar header, including its terminating NUL.
pub const USTAR_MAGIC: &[u8; 6] = b"ustar\0";

/// Version string of a ustar header.  It is not NUL-terminated.
pub const USTAR_VERSION: &[u8; 2] = b"00";

/// Location of the checksum field inside a record.
pub const CHECKSUM_RANGE: Range<usize> = 148..156;

/// One raw record, exactly as stored in the archive.
pub type Block = [u8; BLOCK_SIZE];

/// Field layout of a ustar record.
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct RawUstarHeader {
    /// File path name (null-terminated if shorter than 100 bytes).
    pub name: [u8; 100],
    /// File mode in octal ASCII.
    pub mode: [u8; 8],
    /// Owner user ID in octal ASCII.
    pub uid: [u8; 8],
    /// Owner group ID in octal ASCII.
    pub gid: [u8; 8],
    /// Entry data size in octal ASCII.
    pub size: [u8; 12],
    /// Modification time as Unix timestamp in octal ASCII.
    pub mtime: [u8; 12],
    /// Header checksum in octal ASCII.
    pub checksum: [u8; 8],
    /// Entry type flag.
    pub typeflag: u8,
    /// Link target name for hard/symbolic links.
    pub linkname: [u8; 100],
    /// `"ustar\0"` for a ustar header.
    pub magic: [u8; 6],
    /// `"00"` for a ustar header.
    pub version: [u8; 2],
    /// Owner user name (null-terminated).
    pub uname: [u8; 32],
    /// Owner group name (null-terminated).
    pub gname: [u8; 32],
    /// Device major number in octal ASCII.
    pub devmajor: [u8; 8],
    /// Device minor number in octal ASCII.
    pub devminor: [u8; 8],
    /// Path prefix for long names, joined to `name` with a separator.
    pub prefix: [u8; 155],
    /// Padding to fill the 512-byte block.
    pub pad: [u8; 12],
}

const _: () = assert!(size_of::<RawUstarHeader>() == BLOCK_SIZE);

impl RawUstarHeader {
    /// View a record through the ustar field layout.
    #[must_use]
    pub fn from_block(block: &Block) -> &RawUstarHeader {
        zerocopy::transmute_ref!(block)
    }
}

impl fmt::Debug for RawUstarHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawUstarHeader")
            .field("name", &String::from_utf8_lossy(truncate_null(&self.name)))
            .field("typeflag", &self.typeflag)
            .field("magic", &self.magic)
            .finish_non_exhaustive()
    }
}

/// Kind of archive member, as far as navigation cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file (typeflag `'0'`, or `'\0'` for old archives).
    Regular,
    /// Directory (typeflag `'5'`).
    Directory,
    /// Symbolic link (typeflag `'2'`).
    Symlink,
    /// Anything else: hard links, devices, FIFOs, extension records.
    Other(u8),
}

impl EntryType {
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'0' | b'\0' => EntryType::Regular,
            b'5' => EntryType::Directory,
            b'2' => EntryType::Symlink,
            other => EntryType::Other(other),
        }
    }

    /// Note that `Regular` is encoded as `'0'`, not `'\0'`.
    #[must_use]
    pub fn to_byte(self) -> u8 {
        match self {
            EntryType::Regular => b'0',
            EntryType::Directory => b'5',
            EntryType::Symlink => b'2',
            EntryType::Other(byte) => byte,
        }
    }

    #[must_use]
    pub fn is_file(self) -> bool {
        self == EntryType::Regular
    }

    #[must_use]
    pub fn is_dir(self) -> bool {
        self == EntryType::Directory
    }

    #[must_use]
    pub fn is_symlink(self) -> bool {
        self == EntryType::Symlink
    }
}

impl From<u8> for EntryType {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

/// A decoded header record.
///
/// Decoding never fails: malformed numeric fields decode as zero and non-UTF-8 names are
/// converted lossily.  Whether the record is actually well-formed is answered separately by
/// [`Header::magic_valid`], [`Header::version_valid`] and [`Header::checksum_valid`].
#[derive(Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub prefix: String,
    pub entry_type: EntryType,
    pub linkname: String,
    /// Logical length of the entry data, excluding block padding.
    pub size: u64,
    /// Checksum value as stored in the record.
    pub checksum: u64,
    pub magic: [u8; 6],
    pub version: [u8; 2],
}

impl Header {
    #[must_use]
    pub fn decode(block: &Block) -> Header {
        let raw = RawUstarHeader::from_block(block);
        Header {
            name: lossy_string(&raw.name),
            prefix: lossy_string(&raw.prefix),
            entry_type: EntryType::from_byte(raw.typeflag),
            linkname: lossy_string(&raw.linkname),
            size: parse_octal(&raw.size),
            checksum: parse_octal(&raw.checksum),
            magic: raw.magic,
            version: raw.version,
        }
    }

    /// The path of the entry: `prefix/name`, or just `name` when there is no prefix.
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.prefix, self.name)
        }
    }

    #[must_use]
    pub fn magic_valid(&self) -> bool {
        self.magic == *USTAR_MAGIC
    }

    #[must_use]
    pub fn version_valid(&self) -> bool {
        self.version == *USTAR_VERSION
    }

    /// Check the stored checksum against the record this header was decoded from.
    #[must_use]
    pub fn checksum_valid(&self, block: &Block) -> bool {
        self.checksum == compute_checksum(block)
    }

    /// Number of bytes the entry data occupies in the archive, padding included.
    #[must_use]
    pub fn padded_size(&self) -> u64 {
        padded_size(self.size)
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("path", &self.full_path())
            .field("entry_type", &self.entry_type)
            .field("linkname", &self.linkname)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Unsigned byte sum of the record, with the checksum field counted as ASCII spaces.
#[must_use]
pub fn compute_checksum(block: &Block) -> u64 {
    block
        .iter()
        .enumerate()
        .map(|(i, &byte)| {
            if CHECKSUM_RANGE.contains(&i) {
                u64::from(b' ')
            } else {
                u64::from(byte)
            }
        })
        .sum()
}

/// An all-zero record marks the end of the archive.
#[must_use]
pub fn is_terminator(block: &Block) -> bool {
    block.iter().all(|&b| b == 0)
}

/// Round `size` up to the next multiple of [`BLOCK_SIZE`].
#[must_use]
pub fn padded_size(size: u64) -> u64 {
    size.div_ceil(BLOCK_SIZE as u64) * BLOCK_SIZE as u64
}

/// Parse an octal ASCII field.
///
/// Leading spaces are skipped and parsing stops at the first byte that isn't an octal digit
/// (usually a NUL or a space).  A field without any digits is zero.
#[must_use]
pub fn parse_octal(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .skip_while(|&&b| b == b' ')
        .take_while(|&&b| (b'0'..=b'7').contains(&b))
        .fold(0u64, |value, &b| {
            value.saturating_mul(8).saturating_add(u64::from(b - b'0'))
        })
}

/// Truncate a byte slice at the first NUL byte.
#[must_use]
pub fn truncate_null(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(pos) => &bytes[..pos],
        None => bytes,
    }
}

fn lossy_string(field: &[u8]) -> String {
    String::from_utf8_lossy(truncate_null(field)).into_owned()
}
