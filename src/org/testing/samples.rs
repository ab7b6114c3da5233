//! Sample document loader
//!
//! The documents under `docs/samples/` are the curated inputs for parser tests. `Orgplore`
//! resolves a sample by name and hands back its source, parsed document or view.

use crate::org::error::OrgError;
use crate::org::loader::DocumentLoader;
use crate::org::parsing::Document;
use crate::org::query::OrgQuery;
use std::fs;
use std::path::{Path, PathBuf};

const SAMPLES_DIR: &str = "docs/samples";

/// Handle on one sample document
#[derive(Debug, Clone)]
pub struct Orgplore {
    path: PathBuf,
}

impl Orgplore {
    /// The sample `docs/samples/<name>.org`
    pub fn sample(name: &str) -> Self {
        Orgplore {
            path: samples_dir().join(format!("{name}.org")),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Orgplore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Names of every available sample, sorted
    pub fn list() -> Result<Vec<String>, OrgError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(samples_dir())? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("org") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> Result<String, OrgError> {
        DocumentLoader::new().load_source(&self.path)
    }

    pub fn parse(&self) -> Result<Document, OrgError> {
        DocumentLoader::new().load_and_parse(&self.path)
    }

    pub fn query(&self) -> Result<OrgQuery, OrgError> {
        DocumentLoader::new().load_and_query(&self.path)
    }
}

fn samples_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(SAMPLES_DIR)
}
