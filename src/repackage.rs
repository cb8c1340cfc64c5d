use memmap2::Mmap;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::write::{FileOptions, ZipWriter};

use crate::error::{Result, ScanError};
use crate::manifest::merge_manifest;

pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

#[derive(Debug, Clone)]
pub struct RepackageSummary {
    pub output_path: PathBuf,
    pub entries: usize,
}

/// External packaging step the pipeline hands the finished directive to.
/// Injected so the scan/classify logic is testable without a real archive.
pub trait Repackager {
    fn repackage(&self, directive: &str) -> Result<RepackageSummary>;
}

/// Force-rebuilds a jar with the directive embedded in its manifest.
///
/// Every entry of the input archive is copied into a fresh archive whose
/// `META-INF/MANIFEST.MF` is the base manifest merged with the directive
/// header, then the rebuilt archive atomically replaces the file in the
/// output directory.
#[derive(Debug, Clone)]
pub struct JarRepackager {
    jar_path: PathBuf,
    output_dir: PathBuf,
    manifest_path: Option<PathBuf>,
}

impl JarRepackager {
    pub fn new(jar_path: PathBuf, output_dir: PathBuf, manifest_path: Option<PathBuf>) -> Self {
        Self {
            jar_path,
            output_dir,
            manifest_path,
        }
    }

    fn read_base_manifest(&self) -> Result<Option<String>> {
        match &self.manifest_path {
            Some(path) => std::fs::read_to_string(path).map(Some).map_err(|e| {
                ScanError::repackage(format!("Failed to read manifest {}: {e}", path.display()))
            }),
            None => Ok(None),
        }
    }

    fn output_path(&self) -> Result<PathBuf> {
        let file_name = self.jar_path.file_name().ok_or_else(|| {
            ScanError::repackage(format!(
                "Jar path has no file name: {}",
                self.jar_path.display()
            ))
        })?;
        Ok(self.output_dir.join(file_name))
    }
}

impl Repackager for JarRepackager {
    fn repackage(&self, directive: &str) -> Result<RepackageSummary> {
        let base = self.read_base_manifest()?;
        let manifest = merge_manifest(base.as_deref(), directive);
        let out_path = self.output_path()?;

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            ScanError::repackage(format!(
                "Failed to create output directory {}: {e}",
                self.output_dir.display()
            ))
        })?;

        let file = File::open(&self.jar_path).map_err(|e| {
            ScanError::repackage(format!(
                "Failed to open jar {}: {e}",
                self.jar_path.display()
            ))
        })?;
        // SAFETY: The file is opened read-only and the mapping is dropped
        // before the rebuilt archive is renamed into place.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| {
            ScanError::repackage(format!("Failed to mmap jar {}: {e}", self.jar_path.display()))
        })?;

        let mut tmp_os = out_path.as_os_str().to_os_string();
        tmp_os.push(".tmp");
        let tmp = PathBuf::from(tmp_os);

        let entries = write_archive(&mmap[..], &tmp, &manifest, &self.jar_path)
            .inspect_err(|_| {
                let _ = std::fs::remove_file(&tmp);
            })?;
        drop(mmap);

        std::fs::rename(&tmp, &out_path).map_err(|e| {
            ScanError::repackage(format!(
                "Failed to replace archive {}: {e}",
                out_path.display()
            ))
        })?;

        Ok(RepackageSummary {
            output_path: out_path,
            entries,
        })
    }
}

fn write_archive(jar_bytes: &[u8], tmp: &Path, manifest: &str, jar_path: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(jar_bytes)).map_err(|e| {
        ScanError::repackage(format!("Failed to read jar {}: {e}", jar_path.display()))
    })?;

    let out_file = File::create(tmp).map_err(|e| {
        ScanError::repackage(format!("Failed to create {}: {e}", tmp.display()))
    })?;
    let mut writer = ZipWriter::new(out_file);

    let fail = |e: zip::result::ZipError| {
        ScanError::repackage(format!("Failed to rebuild jar {}: {e}", jar_path.display()))
    };

    writer
        .start_file(MANIFEST_ENTRY, FileOptions::default())
        .map_err(fail)?;
    writer
        .write_all(manifest.as_bytes())
        .map_err(|e| ScanError::repackage(format!("Failed to write manifest: {e}")))?;

    let mut entries = 1usize;
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(fail)?;
        if entry.name() == MANIFEST_ENTRY {
            continue;
        }
        writer.raw_copy_file(entry).map_err(fail)?;
        entries += 1;
    }

    writer.finish().map_err(fail)?;
    Ok(entries)
}
