//! Reads a catalog file into a [`Corpus`].
//!
//! Accepted inputs are a JSON array of product objects, a single product
//! object, or JSON Lines (`.jsonl`, one object per line). Every product must
//! carry a string `pid`, unique within the file. The remaining attributes are
//! checked later, when documents are extracted.

use crate::document::{Corpus, RawDocument};
use crate::error::LoadError;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let reader = BufReader::new(file);

    let mut loader = CorpusBuilder { path, corpus: Corpus::new() };
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
            if line.trim().is_empty() { continue; }
            let value: Value = serde_json::from_str(&line).map_err(|source| LoadError::JsonLine {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
            loader.push(idx, value)?;
        }
    } else {
        let json: Value = serde_json::from_reader(reader)
            .map_err(|source| LoadError::Json { path: path.to_path_buf(), source })?;
        match json {
            Value::Array(arr) => {
                for (idx, value) in arr.into_iter().enumerate() {
                    loader.push(idx, value)?;
                }
            }
            obj @ Value::Object(_) => loader.push(0, obj)?,
            _ => return Err(LoadError::UnsupportedShape { path: path.to_path_buf() }),
        }
    }

    tracing::info!(path = %path.display(), documents = loader.corpus.len(), "loaded corpus");
    Ok(loader.corpus)
}

struct CorpusBuilder<'a> {
    path: &'a Path,
    corpus: Corpus,
}

impl CorpusBuilder<'_> {
    fn push(&mut self, position: usize, value: Value) -> Result<(), LoadError> {
        let object: RawDocument = match value {
            Value::Object(map) => map,
            _ => return Err(LoadError::NotAnObject { path: self.path.to_path_buf(), position }),
        };
        let pid = match object.get("pid") {
            Some(Value::String(pid)) => pid.clone(),
            _ => return Err(LoadError::MissingPid { path: self.path.to_path_buf(), position }),
        };
        if self.corpus.contains_key(&pid) {
            return Err(LoadError::DuplicatePid { path: self.path.to_path_buf(), pid });
        }
        self.corpus.insert(pid, object);
        Ok(())
    }
}
