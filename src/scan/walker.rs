use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the `.pdf` files directly inside `folder`, sorted by file name.
///
/// Sub-directories are not descended into; symlinked PDFs are listed. A
/// missing folder is an error.
pub fn list_pdf_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read folder {}", folder.display()))?;

        if entry.file_type().is_file() && is_pdf(entry.path()) {
            files.push(entry.into_path());
        }
    }

    // a root that is a plain file yields no entries at depth 1
    if files.is_empty() && !folder.is_dir() {
        anyhow::bail!("Documents folder not found: {}", folder.display());
    }

    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
