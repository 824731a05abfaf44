use anyhow::{bail, Context, Result};
use serde::Deserialize;
use shortlist_core::Candidate;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use walkdir::WalkDir;

/// Extensions read as plain text.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];
/// Accepted upload formats that need a text extractor we do not ship.
const BINARY_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    text: String,
}

/// Gather candidates from a directory of text files, a `.jsonl`/`.json`
/// file of `{"id", "text"}` records, or a single text file.
///
/// Directory entries are visited in file-name order so the submission order
/// (and therefore tie-breaking) is stable across runs.
pub fn collect_candidates(path: &Path) -> Result<Vec<Candidate>> {
    if path.is_dir() {
        return collect_dir(path);
    }
    if !path.is_file() {
        bail!("candidates path {} does not exist", path.display());
    }
    match extension(path).as_deref() {
        Some("jsonl") => collect_jsonl(path),
        Some("json") => collect_json(path),
        Some(ext) if BINARY_EXTENSIONS.contains(&ext) => {
            tracing::warn!(path = %path.display(), "skipping file: no text extractor for .{ext}");
            Ok(Vec::new())
        }
        _ => {
            let id = path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            Ok(vec![Candidate::new(id, read_text(path)?)])
        }
    }
}

fn collect_dir(root: &Path) -> Result<Vec<Candidate>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if !p.is_file() { continue; }
        let Some(ext) = extension(p) else { continue; };
        if BINARY_EXTENSIONS.contains(&ext.as_str()) {
            tracing::warn!(path = %p.display(), "skipping file: no text extractor for .{ext}");
            continue;
        }
        if !TEXT_EXTENSIONS.contains(&ext.as_str()) {
            tracing::debug!(path = %p.display(), "ignoring file with unsupported extension");
            continue;
        }
        match read_text(p) {
            Ok(text) => out.push(Candidate::new(relative_id(root, p), text)),
            Err(err) => tracing::warn!(path = %p.display(), %err, "skipping unreadable file"),
        }
    }
    tracing::info!(root = %root.display(), candidates = out.len(), "collected candidates");
    Ok(out)
}

fn collect_jsonl(file: &Path) -> Result<Vec<Candidate>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut out = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        out.push(Candidate::new(doc.id, doc.text));
    }
    Ok(out)
}

fn collect_json(file: &Path) -> Result<Vec<Candidate>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let docs: Vec<InputDoc> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    Ok(docs.into_iter().map(|d| Candidate::new(d.id, d.text)).collect())
}

/// Read a file as UTF-8, falling back to Latin-1 for legacy encodings.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(decode_text(bytes))
}

pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

fn extension(p: &Path) -> Option<String> {
    p.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase)
}

fn relative_id(root: &Path, p: &Path) -> String {
    let rel = p.strip_prefix(root).unwrap_or(p);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_fallback() {
        assert_eq!(decode_text(b"caf\xe9".to_vec()), "café");
        assert_eq!(decode_text("naïve".as_bytes().to_vec()), "naïve");
    }

    #[test]
    fn ids_are_relative_with_forward_slashes() {
        let root = Path::new("/data/resumes");
        assert_eq!(relative_id(root, &root.join("2024").join("a.txt")), "2024/a.txt");
    }
}
