//! Maven installer
//!
//! ## Install Sequence
//!
//! ```text
//! 1. resolve version  - explicit input, else MVN_VERSION, else newest
//!                       X.Y.Z/ entry of the Maven Central listing
//! 2. tool cache hit   - done
//! 3. download         - apache-maven-<v>-bin.tar.gz into the temp dir
//! 4. extract          - gzip + tar into a fresh temp directory
//! 5. cache            - move apache-maven-<v>/ into the tool cache
//! 6. cleanup          - drop the archive and extract dir, even on failure
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::ToolCache;
use crate::error::{Result, ToolCacheError};

/// Maven Central directory of Apache Maven releases
pub const MAVEN_REPOSITORY: &str =
    "https://repo.maven.apache.org/maven2/org/apache/maven/apache-maven";

/// Tool-cache name
pub const TOOL_NAME: &str = "maven";

static VERSION_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href="([0-9]+)\.([0-9]+)\.([0-9]+)/""#).expect("version pattern is valid")
});

/// Newest `X.Y.Z/` entry of a directory listing
///
/// Pre-release entries (`4.0.0-rc-1/`) do not match and are skipped.
/// Entries are compared numerically, so `3.9.10` beats `3.9.9`.
pub fn latest_version(listing: &str) -> Option<String> {
    VERSION_ENTRY
        .captures_iter(listing)
        .filter_map(|c| {
            let major = c[1].parse::<u64>().ok()?;
            let minor = c[2].parse::<u64>().ok()?;
            let patch = c[3].parse::<u64>().ok()?;
            Some((major, minor, patch))
        })
        .max()
        .map(|(major, minor, patch)| format!("{}.{}.{}", major, minor, patch))
}

/// Download URL of a binary distribution
pub fn archive_url(base: &str, version: &str) -> String {
    format!(
        "{}/{}/apache-maven-{}-bin.tar.gz",
        base.trim_end_matches('/'),
        version,
        version
    )
}

/// Result of [`MavenInstaller::install`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenInstall {
    /// Version installed
    pub version: String,
    /// Tool-cache directory of the install
    pub home: PathBuf,
    /// Whether the install was already cached
    pub cached: bool,
}

impl MavenInstall {
    /// Directory holding `mvn`
    pub fn bin_dir(&self) -> PathBuf {
        self.home.join("bin")
    }
}

/// Downloads Maven into a [`ToolCache`]
#[derive(Debug, Clone)]
pub struct MavenInstaller {
    http: reqwest::Client,
    repository: String,
    cache: ToolCache,
    temp_dir: PathBuf,
}

impl MavenInstaller {
    /// Installer using Maven Central
    pub fn new(cache: ToolCache, temp_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_repository(cache, temp_dir, MAVEN_REPOSITORY)
    }

    /// Installer using another repository mirror
    pub fn with_repository(
        cache: ToolCache,
        temp_dir: impl Into<PathBuf>,
        repository: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ghactions/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(MavenInstaller {
            http,
            repository: repository.into().trim_end_matches('/').to_string(),
            cache,
            temp_dir: temp_dir.into(),
        })
    }

    /// Newest release listed by the repository
    pub async fn resolve_latest(&self) -> Result<String> {
        let url = format!("{}/", self.repository);
        debug!("fetching {}", url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ToolCacheError::Download {
                url,
                status: response.status().as_u16(),
            });
        }
        let listing = response.text().await?;
        latest_version(&listing).ok_or_else(|| {
            ToolCacheError::VersionNotFound(
                "Could not retrieve Maven version. Try to use MVN_VERSION variable.".into(),
            )
        })
    }

    /// Install `version`, reusing the cache when possible
    pub async fn install(&self, version: &str, arch: &str) -> Result<MavenInstall> {
        if let Some(home) = self.cache.find(TOOL_NAME, version, arch) {
            info!("Found Maven in cache {}", home.display());
            return Ok(MavenInstall {
                version: version.to_string(),
                home,
                cached: true,
            });
        }

        let archive = self.download(version).await?;
        let home = self.unpack(&archive, version, arch).await?;
        info!("Maven installed at {}", home.display());
        Ok(MavenInstall {
            version: version.to_string(),
            home,
            cached: false,
        })
    }

    /// Extract a downloaded archive and move its root into the cache
    ///
    /// The archive and the extraction directory are removed whether or not
    /// this succeeds.
    async fn unpack(&self, archive: &Path, version: &str, arch: &str) -> Result<PathBuf> {
        let extract_dir = self.temp_dir.join(Uuid::new_v4().to_string());
        let result = self.unpack_into(archive, &extract_dir, version, arch).await;

        if let Err(e) = std::fs::remove_file(archive) {
            warn!(path = %archive.display(), error = %e, "could not remove archive");
        }
        if extract_dir.exists() {
            if let Err(e) = std::fs::remove_dir_all(&extract_dir) {
                warn!(path = %extract_dir.display(), error = %e, "could not remove extract dir");
            }
        }
        result
    }

    async fn unpack_into(
        &self,
        archive: &Path,
        extract_dir: &Path,
        version: &str,
        arch: &str,
    ) -> Result<PathBuf> {
        let archive_path = archive.to_path_buf();
        let dir = extract_dir.to_path_buf();
        tokio::task::spawn_blocking(move || extract_tar_gz(&archive_path, &dir))
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;

        let root = extract_dir.join(format!("apache-maven-{}", version));
        if !root.is_dir() {
            return Err(ToolCacheError::MissingEntry(root.display().to_string()));
        }
        self.cache.cache_dir(&root, TOOL_NAME, version, arch)
    }

    async fn download(&self, version: &str) -> Result<PathBuf> {
        let url = archive_url(&self.repository, version);
        debug!("downloading {}", url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ToolCacheError::Download {
                url,
                status: response.status().as_u16(),
            });
        }
        let bytes = response.bytes().await?;
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let path = self.temp_dir.join(Uuid::new_v4().to_string());
        tokio::fs::write(&path, &bytes).await?;
        Ok(path)
    }
}

/// Unpack a `.tar.gz` archive into `dest`
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    tar.unpack(dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    const LISTING: &str = r#"
<a href="../">../</a>
<a href="3.8.8/" title="3.8.8/">3.8.8/</a>   2023-03-08 14:26  -
<a href="3.9.10/" title="3.9.10/">3.9.10/</a>   2025-06-03 09:12  -
<a href="3.9.9/" title="3.9.9/">3.9.9/</a>   2024-08-17 10:41  -
<a href="4.0.0-rc-2/" title="4.0.0-rc-2/">4.0.0-rc-2/</a>   2024-12-03 13:10  -
<a href="maven-metadata.xml" title="maven-metadata.xml">maven-metadata.xml</a>
"#;

    #[test]
    fn test_latest_version_is_numeric_max() {
        assert_eq!(latest_version(LISTING).as_deref(), Some("3.9.10"));
    }

    #[test]
    fn test_latest_version_empty_listing() {
        assert_eq!(latest_version("<html></html>"), None);
    }

    #[test]
    fn test_archive_url() {
        assert_eq!(
            archive_url(MAVEN_REPOSITORY, "3.9.6"),
            "https://repo.maven.apache.org/maven2/org/apache/maven/apache-maven/3.9.6/apache-maven-3.9.6-bin.tar.gz"
        );
    }

    /// Write a one-file `.tar.gz` with `entry` holding a shell script
    fn write_archive(archive: &Path, entry: &str) {
        let file = File::create(archive).unwrap();
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        let content = b"#!/bin/sh\necho mvn\n";
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, entry, &content[..]).unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    fn installer_in(dir: &Path) -> MavenInstaller {
        let cache = ToolCache::new(dir.join("cache"));
        MavenInstaller::with_repository(cache, dir.join("tmp"), "http://127.0.0.1:9").unwrap()
    }

    fn temp_entries(dir: &Path) -> usize {
        std::fs::read_dir(dir.join("tmp")).unwrap().count()
    }

    #[test]
    fn test_extract_tar_gz() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("maven.tar.gz");
        write_archive(&archive, "apache-maven-3.9.6/bin/mvn");

        let dest = dir.path().join("out");
        extract_tar_gz(&archive, &dest).unwrap();

        let mvn = dest.join("apache-maven-3.9.6/bin/mvn");
        assert_eq!(std::fs::read_to_string(mvn).unwrap(), "#!/bin/sh\necho mvn\n");
    }

    #[tokio::test]
    async fn test_install_uses_cache_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ToolCache::new(dir.path().join("cache"));
        let staged = dir.path().join("apache-maven-3.9.6");
        std::fs::create_dir_all(staged.join("bin")).unwrap();
        cache.cache_dir(&staged, TOOL_NAME, "3.9.6", "x64").unwrap();

        // Unroutable mirror: any network access would fail the test
        let installer =
            MavenInstaller::with_repository(cache, dir.path().join("tmp"), "http://127.0.0.1:9")
                .unwrap();
        let install = installer.install("3.9.6", "x64").await.unwrap();

        assert!(install.cached);
        assert_eq!(install.bin_dir(), dir.path().join("cache/maven/3.9.6/x64/bin"));
    }

    #[tokio::test]
    async fn test_unpack_caches_and_cleans_temp() {
        let dir = tempfile::tempdir().unwrap();
        let installer = installer_in(dir.path());
        std::fs::create_dir_all(dir.path().join("tmp")).unwrap();
        let archive = dir.path().join("tmp/download");
        write_archive(&archive, "apache-maven-3.9.6/bin/mvn");

        let home = installer.unpack(&archive, "3.9.6", "x64").await.unwrap();

        assert!(home.join("bin/mvn").is_file());
        assert_eq!(temp_entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_corrupt_archive_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let installer = installer_in(dir.path());
        std::fs::create_dir_all(dir.path().join("tmp")).unwrap();
        let archive = dir.path().join("tmp/download");
        std::fs::write(&archive, b"<html>502 Bad Gateway</html>").unwrap();

        let result = installer.unpack(&archive, "3.9.6", "x64").await;

        assert!(result.is_err());
        assert_eq!(temp_entries(dir.path()), 0);
        assert!(installer.cache.find(TOOL_NAME, "3.9.6", "x64").is_none());
    }

    #[tokio::test]
    async fn test_missing_root_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let installer = installer_in(dir.path());
        std::fs::create_dir_all(dir.path().join("tmp")).unwrap();
        let archive = dir.path().join("tmp/download");
        write_archive(&archive, "maven-3.9.6/bin/mvn");

        let err = installer.unpack(&archive, "3.9.6", "x64").await.unwrap_err();

        assert!(matches!(err, ToolCacheError::MissingEntry(_)));
        assert_eq!(temp_entries(dir.path()), 0);
    }
}
