//! setup-maven: install Apache Maven through the runner tool cache

use std::path::PathBuf;

use ghactions_core::{ActionRunner, Environment, Error, Result};
use ghactions_toolcache::{runner_arch, MavenInstaller, ToolCache};
use tracing::info;

use crate::Output;

/// Inputs of the setup-maven action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenConfig {
    /// Requested version; `None` resolves the latest release
    pub version: Option<String>,
    /// `RUNNER_TOOL_CACHE`
    pub tool_cache: PathBuf,
    /// `RUNNER_TEMP`
    pub temp_dir: PathBuf,
}

impl MavenConfig {
    /// Read inputs and runner directories
    pub fn from_env(env: &Environment) -> Result<Self> {
        let version = env
            .input("version")
            .or_else(|| env.var("MVN_VERSION"))
            .map(str::to_string);
        let tool_cache = env
            .var("RUNNER_TOOL_CACHE")
            .ok_or_else(|| Error::config("Expected RUNNER_TOOL_CACHE to be defined"))?;
        let temp_dir = env
            .var("RUNNER_TEMP")
            .ok_or_else(|| Error::config("Expected RUNNER_TEMP to be defined"))?;
        Ok(MavenConfig {
            version,
            tool_cache: PathBuf::from(tool_cache),
            temp_dir: PathBuf::from(temp_dir),
        })
    }
}

/// Handle the SetupMaven command.
pub async fn run(config: &MavenConfig, runner: &ActionRunner) -> Result<Output> {
    let installer = MavenInstaller::new(
        ToolCache::new(config.tool_cache.clone()),
        config.temp_dir.clone(),
    )?;
    let version = match &config.version {
        Some(v) => v.clone(),
        None => installer.resolve_latest().await?,
    };
    info!("Setting up Maven {}", version);

    let install = installer.install(&version, runner_arch()?).await?;
    runner.add_path(&install.bin_dir())?;
    Ok(Output::ToolInstalled(install))
}
