//! Property-based tests over archives written by the `tar` crate.

mod common;

use std::collections::BTreeSet;

use proptest::prelude::*;

use common::{append_dir, append_file, cursor_with};
use tarnav::Archive;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.]{0,20}"
}

/// Unique top-level file names with their contents.
fn files_strategy() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::btree_set(name_strategy(), 0..12).prop_flat_map(|names: BTreeSet<String>| {
        let count = names.len();
        (
            Just(names.into_iter().collect::<Vec<_>>()),
            prop::collection::vec(prop::collection::vec(any::<u8>(), 0..2000), count),
        )
            .prop_map(|(names, contents)| names.into_iter().zip(contents).collect::<Vec<_>>())
    })
}

proptest! {
    #[test]
    fn test_validate_counts_headers(files in files_strategy()) {
        let mut archive = Archive::new(cursor_with(|b| {
            for (name, content) in &files {
                append_file(b, name, content);
            }
        }));
        prop_assert_eq!(archive.validate().unwrap(), files.len());
    }

    #[test]
    fn test_contents_and_listing(files in files_strategy(), chunk in 1usize..700) {
        let mut archive = Archive::new(cursor_with(|b| {
            append_dir(b, "top/");
            for (name, content) in &files {
                append_file(b, &format!("top/{name}"), content);
            }
        }));

        let listed = archive.list("top").unwrap();
        let expected: Vec<String> = files.iter().map(|(name, _)| format!("top/{name}")).collect();
        prop_assert_eq!(listed, expected);

        for (name, content) in &files {
            let path = format!("top/{name}");
            let mut gathered = vec![];
            let mut buf = vec![0u8; chunk];
            loop {
                let outcome = archive.read(&path, gathered.len() as u64, &mut buf).unwrap();
                gathered.extend_from_slice(&buf[..outcome.written]);
                prop_assert_eq!(outcome.remaining, (content.len() - gathered.len()) as u64);
                if outcome.is_complete() {
                    break;
                }
            }
            prop_assert_eq!(&gathered, content);
        }
    }
}
