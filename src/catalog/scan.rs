use std::path::Path;
use std::time::Duration;

use lofty::{AudioFile, ItemKey, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Catalog, Folder, TrackRef};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn read_track(path: &Path) -> TrackRef {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut duration: Option<Duration> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    name = v.to_string();
                }
            }
        }
    }

    TrackRef {
        name,
        file_name,
        path: path.to_path_buf(),
        duration,
    }
}

/// Scan the library root into a catalog: every first-level subdirectory
/// becomes a folder, every audio file directly inside it a track. Folders
/// without any audio tracks are skipped. The resolved `root/folder/file`
/// path is stored on each track here and never rebuilt later.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Catalog {
    let mut folders: Vec<Folder> = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_map(Result::ok)
    {
        let dir = entry.path();
        if !dir.is_dir() || (!settings.include_hidden && is_hidden(dir)) {
            continue;
        }

        let name = dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();

        let mut tracks: Vec<TrackRef> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(settings.follow_links)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| {
                let p = e.path();
                p.is_file()
                    && (settings.include_hidden || !is_hidden(p))
                    && is_audio_file(p, settings)
            })
            .map(|e| read_track(e.path()))
            .collect();

        if tracks.is_empty() {
            continue;
        }

        tracks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        folders.push(Folder { name, tracks });
    }

    folders.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Catalog::new(folders)
}
