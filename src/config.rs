use crate::bandwidth::ProbeConfig;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub bandwidth: BandwidthConfig,
    pub docker: DockerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory holding the dashboard's index.html.
    pub web_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 9090,
            host: "0.0.0.0".into(),
            web_root: PathBuf::from("/usr/share/serverhealth"),
        }
    }
}

/// Roots of the two pseudo-filesystems; override when the host's are mounted elsewhere (e.g. in a container).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub proc_path: PathBuf,
    pub sys_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            proc_path: PathBuf::from("/proc"),
            sys_path: PathBuf::from("/sys"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BandwidthConfig {
    pub refresh_interval_secs: u64,
    pub speedtest_program: String,
    /// Payload fetched by curl when the speed-test tool is not installed.
    pub fallback_url: String,
    pub fallback_timeout_secs: u64,
}

impl Default for BandwidthConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 3600,
            speedtest_program: "speedtest-cli".into(),
            fallback_url: "https://speed.cloudflare.com/__down?bytes=5000000".into(),
            fallback_timeout_secs: 20,
        }
    }
}

impl BandwidthConfig {
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            speedtest_program: self.speedtest_program.clone(),
            fallback_url: self.fallback_url.clone(),
            fallback_timeout_secs: self.fallback_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    pub program: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            program: "docker".into(),
        }
    }
}

impl AppConfig {
    /// Load `CONFIG_FILE` (default `config.toml`; missing file means defaults),
    /// then apply `PORT`, `PROC_PATH`, `SYS_PATH` and `WEB_ROOT` from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let mut config: AppConfig = match std::fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path, "no config file; using defaults");
                AppConfig::default()
            }
            Err(e) => return Err(anyhow::anyhow!("reading {}: {}", path, e)),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides from `lookup` (takes precedence over the file).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number, got {:?}: {}", port, e))?;
        }
        if let Some(p) = lookup("PROC_PATH") {
            self.paths.proc_path = p.into();
        }
        if let Some(p) = lookup("SYS_PATH") {
            self.paths.sys_path = p.into();
        }
        if let Some(p) = lookup("WEB_ROOT") {
            self.server.web_root = p.into();
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            !self.paths.proc_path.as_os_str().is_empty(),
            "paths.proc_path must be non-empty"
        );
        anyhow::ensure!(
            !self.paths.sys_path.as_os_str().is_empty(),
            "paths.sys_path must be non-empty"
        );
        anyhow::ensure!(
            self.bandwidth.refresh_interval_secs > 0,
            "bandwidth.refresh_interval_secs must be > 0, got {}",
            self.bandwidth.refresh_interval_secs
        );
        anyhow::ensure!(
            self.bandwidth.fallback_timeout_secs > 0,
            "bandwidth.fallback_timeout_secs must be > 0, got {}",
            self.bandwidth.fallback_timeout_secs
        );
        anyhow::ensure!(
            !self.bandwidth.speedtest_program.is_empty(),
            "bandwidth.speedtest_program must be non-empty"
        );
        anyhow::ensure!(
            !self.bandwidth.fallback_url.is_empty(),
            "bandwidth.fallback_url must be non-empty"
        );
        anyhow::ensure!(
            !self.docker.program.is_empty(),
            "docker.program must be non-empty"
        );
        Ok(())
    }
}
