//! Configuration loading for rotinet.
//! Reads rotinet.toml from the current directory or the path in the ROTINET_CONFIG env var.
//! A missing file is not an error: every field has a default.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_ENV: &str = "ROTINET_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "rotinet.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub genome: GenomeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base used for cross-view links. Empty means `http://localhost:<port>`.
    #[serde(default)]
    pub public_base_url: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Idle sessions older than this are dropped.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// Upper bound on live sessions; the least recently seen is evicted.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host()             -> String  { "127.0.0.1".to_string() }
fn default_port()             -> u16     { 8501 }
fn default_static_dir()       -> PathBuf { PathBuf::from("static") }
fn default_session_ttl_secs() -> u64     { 3600 }
fn default_max_sessions()     -> usize   { 10_000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: String::new(),
            static_dir: default_static_dir(),
            session_ttl_secs: default_session_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_edge_table")]
    pub edge_table: PathBuf,
    #[serde(default = "default_hub_image")]
    pub hub_image: PathBuf,
}

fn default_edge_table() -> PathBuf { PathBuf::from("file.txt") }
fn default_hub_image()  -> PathBuf { PathBuf::from("150px-Rotifer-1.jpg") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { edge_table: default_edge_table(), hub_image: default_hub_image() }
    }
}

/// Reference genome served to the embedded igv.js browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeConfig {
    #[serde(default = "default_genome_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_gene_table")]
    pub gene_table: String,
    #[serde(default = "default_locus_tag_column")]
    pub locus_tag_column: String,
    #[serde(default = "default_fasta")]
    pub fasta: String,
    #[serde(default = "default_fasta_index")]
    pub fasta_index: String,
    #[serde(default = "default_annotation")]
    pub annotation: String,
    #[serde(default = "default_annotation_index")]
    pub annotation_index: String,
}

fn default_genome_name()      -> String  { "Adineta_vaga".to_string() }
fn default_data_dir()         -> PathBuf { PathBuf::from("data") }
fn default_gene_table()       -> String  { "vaga_proteins.tsv".to_string() }
fn default_locus_tag_column() -> String  { "Locus tag".to_string() }
fn default_fasta()            -> String  { "Adineta_vaga.fna".to_string() }
fn default_fasta_index()      -> String  { "Adineta_vaga.fna.fai".to_string() }
fn default_annotation()       -> String  { "Adineta_vaga.sorted.gff.gz".to_string() }
fn default_annotation_index() -> String  { "Adineta_vaga.sorted.gff.gz.tbi".to_string() }

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            name: default_genome_name(),
            data_dir: default_data_dir(),
            gene_table: default_gene_table(),
            locus_tag_column: default_locus_tag_column(),
            fasta: default_fasta(),
            fasta_index: default_fasta_index(),
            annotation: default_annotation(),
            annotation_index: default_annotation_index(),
        }
    }
}

impl GenomeConfig {
    pub fn gene_table_path(&self) -> PathBuf {
        self.data_dir.join(&self.gene_table)
    }
}

mod tests;

impl Config {
    /// Load configuration from rotinet.toml.
    /// Checks ROTINET_CONFIG env var first, then current directory.
    /// ROTINET_HOST and ROTINET_PORT override the server section.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = Self::load_from(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply environment overrides through `lookup` (the process env in [`Config::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ROTINET_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ROTINET_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("ROTINET_PORT is not a valid port: {port}"))?;
        }
        Ok(())
    }

    /// Base URL used for cross-view links.
    pub fn base_url(&self) -> String {
        let base = self.server.public_base_url.trim();
        if base.is_empty() {
            format!("http://localhost:{}", self.server.port)
        } else {
            base.trim_end_matches('/').to_string()
        }
    }
}
