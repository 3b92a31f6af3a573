use std::path::PathBuf;
use std::time::Duration;

/// A single playable track inside a catalog folder.
#[derive(Clone, Debug)]
pub struct TrackRef {
    /// Display name: the tag title when readable, the file stem otherwise.
    pub name: String,
    /// On-disk file name, including extension.
    pub file_name: String,
    /// Fully-resolved path `root/folder/file`, computed once at scan time.
    pub path: PathBuf,
    /// Duration from the file's tags, when readable.
    pub duration: Option<Duration>,
}

/// A named folder with its ordered track list.
#[derive(Clone, Debug)]
pub struct Folder {
    pub name: String,
    pub tracks: Vec<TrackRef>,
}

/// Immutable mapping from folder name to an ordered track list.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    folders: Vec<Folder>,
}

impl Catalog {
    pub fn new(folders: Vec<Folder>) -> Self {
        Self { folders }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn folder(&self, index: usize) -> Option<&Folder> {
        self.folders.get(index)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Resolve a folder by exact name. Case-sensitive, matching the on-disk
    /// layout the resolved track paths were joined from.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.folders.iter().position(|f| f.name == name)
    }
}
