//! Building `images.json` from a directory of images.

use crate::error::MediaError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

/// Image files in `dir` as `"<prefix>/<name>"`, sorted by name. With `dedupe`,
/// files whose content matches an earlier file are left out.
pub fn collect_images(dir: &Path, prefix: &str, dedupe: bool) -> Result<Vec<String>, MediaError> {
    if !dir.is_dir() {
        return Err(MediaError::NotADirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MediaError::io(dir, e))? {
        let entry = entry.map_err(|e| MediaError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non-UTF-8 file name {}", path.display());
            continue;
        };
        if is_image_name(name) {
            names.push(name.to_string());
        }
    }
    names.sort();

    let mut seen = HashSet::new();
    let mut list = Vec::with_capacity(names.len());
    for name in names {
        if dedupe {
            let path = dir.join(&name);
            let bytes = fs::read(&path).map_err(|e| MediaError::io(&path, e))?;
            if !seen.insert(*blake3::hash(&bytes).as_bytes()) {
                log::info!("Duplicate content, skipping {}", name);
                continue;
            }
        }
        let prefix = prefix.trim_end_matches('/');
        list.push(if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        });
    }
    Ok(list)
}

/// Write the list as a pretty-printed JSON array.
pub fn write_list(out: &Path, list: &[String]) -> Result<(), MediaError> {
    let json = serde_json::to_string_pretty(list)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| MediaError::io(parent, e))?;
    }
    fs::write(out, json).map_err(|e| MediaError::io(out, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TempDir;

    #[test]
    fn test_extension_filter() {
        assert!(is_image_name("a.gif"));
        assert!(is_image_name("B.JPEG"));
        assert!(is_image_name("c.Png"));
        assert!(!is_image_name("d.webp"));
        assert!(!is_image_name("gif"));
        assert!(!is_image_name("notes.txt"));
    }

    #[test]
    fn test_collect_sorted_with_prefix() {
        let dir = TempDir::new("list");
        dir.write("b.gif", b"GIF89a-b");
        dir.write("a.PNG", b"png");
        dir.write("readme.md", b"# hi");
        std::fs::create_dir(dir.path().join("sub.gif")).unwrap();

        let list = collect_images(dir.path(), "static/images/", false).unwrap();
        assert_eq!(list, vec!["static/images/a.PNG", "static/images/b.gif"]);
    }

    #[test]
    fn test_dedupe_by_content() {
        let dir = TempDir::new("dedupe");
        dir.write("a.gif", b"same");
        dir.write("b.gif", b"same");
        dir.write("c.gif", b"different");

        let all = collect_images(dir.path(), "", false).unwrap();
        assert_eq!(all.len(), 3);
        let unique = collect_images(dir.path(), "", true).unwrap();
        assert_eq!(unique, vec!["a.gif", "c.gif"]);
    }

    #[test]
    fn test_write_round_trips_as_plain_array() {
        let dir = TempDir::new("write");
        let out = dir.path().join("nested/images.json");
        let list = vec!["static/images/a.gif".to_string()];
        write_list(&out, &list).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, list);
        assert!(text.contains("\n  \"static/images/a.gif\""));
    }

    #[test]
    fn test_missing_dir() {
        let err = collect_images(Path::new("/definitely/not/here"), "", false).unwrap_err();
        assert!(matches!(err, MediaError::NotADirectory(_)));
    }
}
