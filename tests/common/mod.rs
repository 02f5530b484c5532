//! Archives built with the `tar` crate, for checking against an independent writer.

#![allow(dead_code)]

use std::io::Cursor;

pub type Builder<'a> = tar::Builder<&'a mut Vec<u8>>;

/// Helper to create a ustar archive using the tar crate.
pub fn create_tar_with<F>(f: F) -> Vec<u8>
where
    F: FnOnce(&mut Builder),
{
    let mut data = Vec::new();
    {
        let mut builder = tar::Builder::new(&mut data);
        f(&mut builder);
        builder.finish().unwrap();
    }
    data
}

pub fn cursor_with<F>(f: F) -> Cursor<Vec<u8>>
where
    F: FnOnce(&mut Builder),
{
    Cursor::new(create_tar_with(f))
}

fn ustar_header(entry_type: tar::EntryType, mode: u32, size: u64) -> tar::Header {
    let mut header = tar::Header::new_ustar();
    header.set_mode(mode);
    header.set_uid(1000);
    header.set_gid(1000);
    header.set_mtime(1234567890);
    header.set_size(size);
    header.set_entry_type(entry_type);
    header
}

pub fn append_file(builder: &mut Builder, path: &str, content: &[u8]) {
    let mut header = ustar_header(tar::EntryType::Regular, 0o644, content.len() as u64);
    builder.append_data(&mut header, path, content).unwrap();
}

pub fn append_dir(builder: &mut Builder, path: &str) {
    let mut header = ustar_header(tar::EntryType::Directory, 0o755, 0);
    builder
        .append_data(&mut header, path, std::io::empty())
        .unwrap();
}

pub fn append_symlink(builder: &mut Builder, path: &str, target: &str) {
    let mut header = ustar_header(tar::EntryType::Symlink, 0o777, 0);
    builder.append_link(&mut header, path, target).unwrap();
}

/// Deterministic content that makes offset mistakes visible.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
