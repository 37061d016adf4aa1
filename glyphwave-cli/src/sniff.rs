//! Identifying media files by their leading bytes rather than their names.
//!
//! Scraped "gifs" are often MP4s, HTML error pages, or dead-link notices
//! saved with a `.gif` extension.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from the start of each file.
pub const SNIFF_LEN: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Gif,
    Html,
    DeadLink,
    Text,
    Mp4,
    Webm,
    Avi,
    Mov,
    Png,
    Apng,
    Jpeg,
    Webp,
    Unknown,
}

/// What normalization does with a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Already a GIF, at most renamed.
    Keep,
    /// Re-encoded to GIF with ffmpeg.
    Convert,
    /// Not media; deletable on request.
    Junk,
    /// Left alone.
    Skip,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Gif => "gif",
            MediaKind::Html => "html",
            MediaKind::DeadLink => "dead-link",
            MediaKind::Text => "text",
            MediaKind::Mp4 => "mp4",
            MediaKind::Webm => "webm",
            MediaKind::Avi => "avi",
            MediaKind::Mov => "mov",
            MediaKind::Png => "png",
            MediaKind::Apng => "apng",
            MediaKind::Jpeg => "jpeg",
            MediaKind::Webp => "webp",
            MediaKind::Unknown => "unknown",
        }
    }

    pub fn disposition(self) -> Disposition {
        match self {
            MediaKind::Gif => Disposition::Keep,
            MediaKind::Mp4
            | MediaKind::Webm
            | MediaKind::Avi
            | MediaKind::Mov
            | MediaKind::Png
            | MediaKind::Apng
            | MediaKind::Jpeg
            | MediaKind::Webp => Disposition::Convert,
            MediaKind::Html | MediaKind::DeadLink => Disposition::Junk,
            MediaKind::Text | MediaKind::Unknown => Disposition::Skip,
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Classify a file from its first [`SNIFF_LEN`] bytes (or fewer).
pub fn detect(head: &[u8]) -> MediaKind {
    let starts = |sig: &[u8]| head.starts_with(sig);
    let riff_form = |form: &[u8]| head.len() >= 12 && starts(b"RIFF") && &head[8..12] == form;

    if starts(b"GIF87a") || starts(b"GIF89a") {
        return MediaKind::Gif;
    }
    if starts(b"<!DOCTYPE") || starts(b"<html") {
        return MediaKind::Html;
    }
    if starts(b"This content is no longer") {
        return MediaKind::DeadLink;
    }
    if starts(b"import ") || starts(b"#!/usr/bin") || starts(b"# ") {
        return MediaKind::Text;
    }
    if head.len() >= 8 && &head[4..8] == b"ftyp" {
        return MediaKind::Mp4;
    }
    if starts(&[0x1a, 0x45, 0xdf, 0xa3]) {
        return MediaKind::Webm;
    }
    if riff_form(b"AVI ") {
        return MediaKind::Avi;
    }
    // Exact image signatures before the loose QuickTime atom search
    if starts(b"\x89PNG\r\n\x1a\n") {
        let window = &head[..head.len().min(1024)];
        return if contains(window, b"acTL") {
            MediaKind::Apng
        } else {
            MediaKind::Png
        };
    }
    if starts(&[0xff, 0xd8, 0xff]) {
        return MediaKind::Jpeg;
    }
    if riff_form(b"WEBP") {
        return MediaKind::Webp;
    }
    let early = &head[..head.len().min(256)];
    if contains(early, b"moov") || contains(early, b"mdat") || (contains(early, b"ftyp") && contains(early, b"qt")) {
        return MediaKind::Mov;
    }
    MediaKind::Unknown
}

pub fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    Ok(head)
}

pub fn sniff_file(path: &Path) -> std::io::Result<MediaKind> {
    let head = read_head(path)?;
    let kind = detect(&head);
    if kind == MediaKind::Unknown {
        let shown = &head[..head.len().min(32)];
        log::debug!(
            "Unknown file type {}: {}",
            path.display(),
            shown.iter().map(|b| format!("{:02x}", b)).collect::<String>()
        );
    }
    Ok(kind)
}
