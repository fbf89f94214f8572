//! Lazy enumeration of committed packages

use std::collections::VecDeque;
use std::fs::{self, ReadDir};
use std::path::PathBuf;

use crate::error::{Result, path_error};
use crate::package::PackageIdentity;

/// Number of directory entries read per batch
pub const BATCH_SIZE: usize = 16;

enum State {
    Unopened,
    Open(ReadDir),
    Done,
}

/// Iterator over the packages committed to a package directory
///
/// The directory is opened on the first call to `next` and read in batches
/// of [`BATCH_SIZE`] entries. Hidden entries are skipped. Entries whose name
/// is not a valid package file name are yielded as errors and the scan goes
/// on. Dropping the iterator closes the directory.
pub struct Enumerate {
    dir: PathBuf,
    name: Option<String>,
    state: State,
    pending: VecDeque<Result<PackageIdentity>>,
}

impl Enumerate {
    pub(crate) fn new(dir: PathBuf, name: Option<&str>) -> Self {
        Self {
            dir,
            name: name.map(str::to_string),
            state: State::Unopened,
            pending: VecDeque::with_capacity(BATCH_SIZE),
        }
    }
}

impl Iterator for Enumerate {
    type Item = Result<PackageIdentity>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }

            let exhausted = match &mut self.state {
                State::Done => return None,
                State::Unopened => match fs::read_dir(&self.dir) {
                    Ok(entries) => {
                        self.state = State::Open(entries);
                        continue;
                    }
                    Err(e) => {
                        self.state = State::Done;
                        return Some(Err(path_error(
                            "Failed to read package directory",
                            &self.dir,
                            e,
                        )));
                    }
                },
                State::Open(entries) => {
                    read_batch(entries, self.name.as_deref(), &mut self.pending, &self.dir)
                }
            };

            if exhausted {
                self.state = State::Done;
            }
        }
    }
}

/// Read up to one batch of entries; returns true once the directory is exhausted
fn read_batch(
    entries: &mut ReadDir,
    name: Option<&str>,
    pending: &mut VecDeque<Result<PackageIdentity>>,
    dir: &std::path::Path,
) -> bool {
    for _ in 0..BATCH_SIZE {
        let Some(entry) = entries.next() else {
            return true;
        };
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                pending.push_back(Err(path_error("Failed to read package directory", dir, e)));
                continue;
            }
        };

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }

        match PackageIdentity::parse(&file_name) {
            Ok(identity) => {
                if name.is_none_or(|n| identity.name() == n) {
                    pending.push_back(Ok(identity));
                }
            }
            Err(e) => pending.push_back(Err(e)),
        }
    }
    false
}
