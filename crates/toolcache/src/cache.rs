//! Runner tool cache
//!
//! Layout under `RUNNER_TOOL_CACHE`:
//!
//! ```text
//! <root>/<tool>/<version>/<arch>/            tool files
//! <root>/<tool>/<version>/<arch>.complete    marker written last
//! ```
//!
//! A directory without its marker is a partial install and is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ToolCacheError};

/// Tool cache rooted at one directory
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
}

impl ToolCache {
    /// Cache rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ToolCache { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a complete cached install, if any
    pub fn find(&self, tool: &str, version: &str, arch: &str) -> Option<PathBuf> {
        let dir = self.tool_dir(tool, version, arch);
        let marker = marker_path(&dir);
        if dir.is_dir() && marker.is_file() {
            Some(dir)
        } else {
            debug!("{} {} not found in tool cache", tool, version);
            None
        }
    }

    /// Move `source` into the cache and mark it complete
    ///
    /// Any partial install at the destination is replaced.
    pub fn cache_dir(&self, source: &Path, tool: &str, version: &str, arch: &str) -> Result<PathBuf> {
        let dest = self.tool_dir(tool, version, arch);
        let marker = marker_path(&dest);
        if marker.exists() {
            fs::remove_file(&marker)?;
        }
        if dest.exists() {
            fs::remove_dir_all(&dest)?;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("caching {} into {}", source.display(), dest.display());
        if fs::rename(source, &dest).is_err() {
            // Source and cache may live on different filesystems
            copy_dir_all(source, &dest)?;
            fs::remove_dir_all(source)?;
        }
        fs::write(&marker, "")?;
        Ok(dest)
    }

    fn tool_dir(&self, tool: &str, version: &str, arch: &str) -> PathBuf {
        self.root.join(tool).join(version).join(arch)
    }
}

fn marker_path(dir: &Path) -> PathBuf {
    let mut name = dir.file_name().unwrap_or_default().to_os_string();
    name.push(".complete");
    dir.with_file_name(name)
}

fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Tool-cache name of the runner architecture
pub fn runner_arch() -> Result<&'static str> {
    arch_name(std::env::consts::ARCH)
}

fn arch_name(rust_arch: &str) -> Result<&'static str> {
    match rust_arch {
        "x86_64" => Ok("x64"),
        "aarch64" => Ok("arm64"),
        other => Err(ToolCacheError::UnsupportedArch(other.to_string())),
    }
}
