//! Turning a folder of scraped media into clean `<name>.gif` files.

use crate::error::MediaError;
use crate::sniff::{sniff_file, Disposition, MediaKind};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// GIF that already has its clean name.
    InPlace { path: PathBuf },
    Rename { from: PathBuf, to: PathBuf },
    Convert { from: PathBuf, to: PathBuf, kind: MediaKind },
    Junk { path: PathBuf, kind: MediaKind },
    Skip { path: PathBuf, kind: Option<MediaKind> },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub converted: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub deleted: usize,
}

#[derive(Clone, Debug)]
pub struct NormalizeOptions {
    pub delete_junk: bool,
    pub ffmpeg: String,
}

/// Strip every extension: `clip.mp4.gif` -> `clip`.
pub fn clean_stem(name: &str) -> String {
    let mut current = name.to_string();
    loop {
        let path = Path::new(&current);
        match (path.file_stem(), path.extension()) {
            (Some(stem), Some(_)) => current = stem.to_string_lossy().into_owned(),
            _ => return current,
        }
    }
}

/// `<stem>.gif`, or `<stem>_<n>.gif` when that name is taken by another file
/// on disk or by an earlier planned target.
fn unique_target(dir: &Path, stem: &str, source: &Path, planned: &HashSet<PathBuf>) -> PathBuf {
    let taken = |p: &Path| (p.exists() && p != source) || planned.contains(p);
    let mut target = dir.join(format!("{stem}.gif"));
    let mut counter = 1;
    while taken(&target) {
        target = dir.join(format!("{stem}_{counter}.gif"));
        counter += 1;
    }
    target
}

/// Classify every file in `dir` and decide what to do with it. Nothing is
/// changed on disk.
pub fn plan(dir: &Path) -> Result<Vec<Action>, MediaError> {
    if !dir.is_dir() {
        return Err(MediaError::NotADirectory(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MediaError::io(dir, e))? {
        let path = entry.map_err(|e| MediaError::io(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut planned = HashSet::new();
    let mut actions = Vec::with_capacity(files.len());
    for path in files {
        let kind = match sniff_file(&path) {
            Ok(k) => k,
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                actions.push(Action::Skip { path, kind: None });
                continue;
            }
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let action = match kind.disposition() {
            Disposition::Junk => Action::Junk { path, kind },
            Disposition::Skip => Action::Skip { path, kind: Some(kind) },
            Disposition::Keep | Disposition::Convert => {
                let target = unique_target(dir, &clean_stem(&name), &path, &planned);
                planned.insert(target.clone());
                match kind.disposition() {
                    Disposition::Keep if target == path => Action::InPlace { path },
                    Disposition::Keep => Action::Rename { from: path, to: target },
                    _ => Action::Convert { from: path, to: target, kind },
                }
            }
        };
        actions.push(action);
    }
    Ok(actions)
}

/// Scratch name for an in-place conversion: `.<stem>.tmp<N>.gif`, taking the
/// first one not on disk. Planned targets never carry a `.tmp<N>` extension,
/// so these cannot collide with the plan either.
fn temp_path(output: &Path) -> PathBuf {
    let dir = output.parent().unwrap_or_else(|| Path::new(""));
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut counter = 0;
    loop {
        let candidate = dir.join(format!(".{stem}.tmp{counter}.gif"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn convert_to_gif(ffmpeg: &str, input: &Path, output: &Path) -> Result<(), String> {
    // In-place conversion goes through a temp file
    let in_place = input == output;
    let actual = if in_place {
        temp_path(output)
    } else {
        output.to_path_buf()
    };

    let status = Command::new(ffmpeg)
        .arg("-i")
        .arg(input)
        .args(["-vf", "fps=15,scale=480:-1:flags=lanczos", "-y"])
        .arg(&actual)
        .status()
        .map_err(|e| format!("failed to run {ffmpeg}: {e}"))?;
    if !status.success() {
        if in_place {
            let _ = fs::remove_file(&actual);
        }
        return Err(format!("{ffmpeg} exited with {status}"));
    }

    if in_place {
        fs::rename(&actual, output).map_err(|e| format!("replacing {}: {e}", output.display()))?;
    } else if let Err(e) = fs::remove_file(input) {
        log::warn!("Couldn't delete original {}: {}", input.display(), e);
    }
    Ok(())
}

/// Carry out a plan.
pub fn execute(actions: &[Action], options: &NormalizeOptions) -> Summary {
    let mut summary = Summary::default();
    for action in actions {
        match action {
            Action::InPlace { path } => {
                log::debug!("Already correct: {}", path.display());
                summary.skipped += 1;
            }
            Action::Rename { from, to } => match fs::rename(from, to) {
                Ok(()) => {
                    log::info!("Renamed GIF {} -> {}", from.display(), to.display());
                    summary.renamed += 1;
                }
                Err(e) => {
                    log::error!("Failed to rename {}: {}", from.display(), e);
                    summary.failed += 1;
                }
            },
            Action::Convert { from, to, kind } => match convert_to_gif(&options.ffmpeg, from, to) {
                Ok(()) => {
                    log::info!("Converted {} {} -> {}", kind.label(), from.display(), to.display());
                    summary.converted += 1;
                }
                Err(e) => {
                    log::error!("Failed to convert {}: {}", from.display(), e);
                    summary.failed += 1;
                }
            },
            Action::Junk { path, kind } => {
                summary.skipped += 1;
                if !options.delete_junk {
                    continue;
                }
                match fs::remove_file(path) {
                    Ok(()) => {
                        log::info!("Deleted {} file {}", kind.label(), path.display());
                        summary.deleted += 1;
                    }
                    Err(e) => log::error!("Failed to delete {}: {}", path.display(), e),
                }
            }
            Action::Skip { .. } => summary.skipped += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TempDir;

    const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00";

    #[test]
    fn test_clean_stem() {
        assert_eq!(clean_stem("cat.gif"), "cat");
        assert_eq!(clean_stem("clip.mp4.gif"), "clip");
        assert_eq!(clean_stem("noext"), "noext");
        assert_eq!(clean_stem(".hidden"), ".hidden");
        assert_eq!(clean_stem("a.b.c.d"), "a");
    }

    #[test]
    fn test_plan_classifies() {
        let dir = TempDir::new("plan");
        dir.write("good.gif", GIF);
        dir.write("dance.gif.webp", GIF);
        dir.write("page.gif", b"<!DOCTYPE html>");
        dir.write("gone.gif", b"This content is no longer available");
        dir.write("video.gif", b"\x00\x00\x00\x18ftypisom");
        dir.write("mystery.bin", b"\x01\x02\x03");

        let actions = plan(dir.path()).unwrap();
        let p = |n: &str| dir.path().join(n);
        assert!(actions.contains(&Action::InPlace { path: p("good.gif") }));
        assert!(actions.contains(&Action::Rename { from: p("dance.gif.webp"), to: p("dance.gif") }));
        assert!(actions.contains(&Action::Junk { path: p("page.gif"), kind: MediaKind::Html }));
        assert!(actions.contains(&Action::Junk { path: p("gone.gif"), kind: MediaKind::DeadLink }));
        assert!(actions.contains(&Action::Convert { from: p("video.gif"), to: p("video.gif"), kind: MediaKind::Mp4 }));
        assert!(actions.contains(&Action::Skip { path: p("mystery.bin"), kind: Some(MediaKind::Unknown) }));
    }

    #[test]
    fn test_collisions_get_suffixes() {
        let dir = TempDir::new("collide");
        dir.write("cat.gif", GIF);
        dir.write("cat.gifv", GIF);
        dir.write("cat.x.gif", GIF);

        let actions = plan(dir.path()).unwrap();
        let targets: HashSet<PathBuf> = actions
            .iter()
            .map(|a| match a {
                Action::InPlace { path } => path.clone(),
                Action::Rename { to, .. } => to.clone(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(targets.len(), 3);
        assert!(targets.contains(&dir.path().join("cat.gif")));
        assert!(targets.contains(&dir.path().join("cat_1.gif")));
        assert!(targets.contains(&dir.path().join("cat_2.gif")));
    }

    #[test]
    fn test_execute_renames_and_keeps_junk() {
        let dir = TempDir::new("exec");
        dir.write("a.gif.gif", GIF);
        dir.write("page.gif", b"<html>");

        let actions = plan(dir.path()).unwrap();
        let options = NormalizeOptions { delete_junk: false, ffmpeg: "ffmpeg".into() };
        let summary = execute(&actions, &options);
        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.deleted, 0);
        assert!(dir.path().join("a.gif").exists());
        assert!(dir.path().join("page.gif").exists());
    }

    #[test]
    fn test_execute_deletes_junk_on_request() {
        let dir = TempDir::new("junk");
        dir.write("page.gif", b"<html>");
        let actions = plan(dir.path()).unwrap();
        let options = NormalizeOptions { delete_junk: true, ffmpeg: "ffmpeg".into() };
        let summary = execute(&actions, &options);
        assert_eq!(summary.deleted, 1);
        assert!(!dir.path().join("page.gif").exists());
    }

    #[test]
    fn test_temp_path_skips_existing_files() {
        let dir = TempDir::new("temp");
        dir.write(".x.tmp0.gif", b"taken");
        let temp = temp_path(&dir.path().join("x.gif"));
        assert_eq!(temp, dir.path().join(".x.tmp1.gif"));
    }

    /// Stand-in for ffmpeg that writes a fixed GIF to its last argument.
    #[cfg(unix)]
    fn fake_ffmpeg(dir: &TempDir) -> String {
        use std::os::unix::fs::PermissionsExt;
        dir.write(
            "ffmpeg.sh",
            b"#!/bin/sh\nfor a in \"$@\"; do last=\"$a\"; done\nprintf 'GIF89a-converted' > \"$last\"\n",
        );
        let script = dir.path().join("ffmpeg.sh");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[test]
    fn test_in_place_conversion_keeps_neighbouring_tmp_gif() {
        let tools = TempDir::new("tools");
        let ffmpeg = fake_ffmpeg(&tools);

        let dir = TempDir::new("inplace");
        dir.write("x.gif", b"\x00\x00\x00\x18ftypisom");
        dir.write("x.tmp.gif", b"GIF89a-user-file");

        let actions = plan(dir.path()).unwrap();
        let p = |n: &str| dir.path().join(n);
        assert!(actions.contains(&Action::Convert { from: p("x.gif"), to: p("x.gif"), kind: MediaKind::Mp4 }));
        assert!(actions.contains(&Action::Rename { from: p("x.tmp.gif"), to: p("x_1.gif") }));

        let options = NormalizeOptions { delete_junk: false, ffmpeg };
        let summary = execute(&actions, &options);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(fs::read(p("x.gif")).unwrap(), b"GIF89a-converted");
        assert_eq!(fs::read(p("x_1.gif")).unwrap(), b"GIF89a-user-file");

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, vec!["x.gif", "x_1.gif"]);
    }

    #[test]
    fn test_missing_ffmpeg_counts_as_failure() {
        let dir = TempDir::new("noffmpeg");
        dir.write("clip.mp4", b"\x00\x00\x00\x18ftypisom");
        let actions = plan(dir.path()).unwrap();
        let options = NormalizeOptions {
            delete_junk: false,
            ffmpeg: "glyphwave-no-such-ffmpeg".into(),
        };
        let summary = execute(&actions, &options);
        assert_eq!(summary.failed, 1);
        assert!(dir.path().join("clip.mp4").exists());
    }
}
