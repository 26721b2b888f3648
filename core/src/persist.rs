use crate::document::{IndexInfoMap, MetadataMap};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

pub struct OutputPaths {
    pub root: PathBuf,
}

impl OutputPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn metadata(&self) -> PathBuf { self.root.join("metadata_dict.json") }
    pub fn info_index(&self) -> PathBuf { self.root.join("info_index_dict.json") }
}

pub fn save_metadata(paths: &OutputPaths, metadata: &MetadataMap) -> Result<()> {
    create_dir_all(&paths.root)?;
    write_pretty(&paths.metadata(), metadata)
}

pub fn load_metadata(paths: &OutputPaths) -> Result<MetadataMap> {
    read_json(&paths.metadata())
}

pub fn save_info_index(paths: &OutputPaths, info_index: &IndexInfoMap) -> Result<()> {
    create_dir_all(&paths.root)?;
    write_pretty(&paths.info_index(), info_index)
}

pub fn load_info_index(paths: &OutputPaths) -> Result<IndexInfoMap> {
    read_json(&paths.info_index())
}

/// Two-space indented JSON; keys are already sorted by pid.
fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let json = serde_json::to_string_pretty(value)?;
    f.write_all(json.as_bytes())?;
    f.write_all(b"\n")?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "wrote json");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(value)
}
