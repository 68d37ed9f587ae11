//! Eagerly loaded, read-only view of one run directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::error::ViewError;
use super::roles::DocumentRole;

/// A document found on disk.
#[derive(Debug, Clone)]
pub enum Document {
    Loaded(Value),
    /// The file exists but could not be read or parsed (non-strict mode only).
    Unreadable { error: String },
}

impl Document {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Document::Loaded(value) => Some(value),
            Document::Unreadable { .. } => None,
        }
    }
}

/// A JSON file in the run directory outside the fixed document set.
#[derive(Debug, Clone)]
pub struct ExtraDocument {
    pub file_name: String,
    pub path: PathBuf,
    pub document: Document,
}

/// Load options for [`RunContext::load`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Propagate unreadable or malformed files instead of recording them.
    pub strict: bool,
    /// Also load `*.json` files outside the fixed set.
    pub include_extras: bool,
}

#[derive(Debug, Clone)]
pub struct RunContext {
    directory: PathBuf,
    documents: HashMap<DocumentRole, Document>,
    extras: Vec<ExtraDocument>,
}

impl RunContext {
    /// Load every known document (and optionally every extra JSON file) up front.
    ///
    /// Absent files are not an error; they simply have no entry.
    pub fn load(directory: &Path, options: LoadOptions) -> Result<Self, ViewError> {
        if !directory.is_dir() {
            return Err(ViewError::MissingDirectory(directory.to_path_buf()));
        }

        let mut documents = HashMap::new();
        for role in DocumentRole::ALL {
            let path = directory.join(role.filename());
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "Known document missing");
                continue;
            }
            documents.insert(role, load_document(&path, options.strict)?);
        }

        let extras = if options.include_extras {
            extra_json_files(directory)?
                .into_iter()
                .map(|(file_name, path)| {
                    let document = load_document(&path, options.strict)?;
                    Ok(ExtraDocument {
                        file_name,
                        path,
                        document,
                    })
                })
                .collect::<Result<Vec<_>, ViewError>>()?
        } else {
            Vec::new()
        };

        tracing::debug!(
            directory = %directory.display(),
            documents = documents.len(),
            extras = extras.len(),
            "Loaded run directory"
        );

        Ok(Self {
            directory: directory.to_path_buf(),
            documents,
            extras,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, role: DocumentRole) -> PathBuf {
        self.directory.join(role.filename())
    }

    pub fn document(&self, role: DocumentRole) -> Option<&Document> {
        self.documents.get(&role)
    }

    /// Parsed value of a role, if it was present and readable.
    pub fn value(&self, role: DocumentRole) -> Option<&Value> {
        self.document(role).and_then(Document::value)
    }

    pub fn extras(&self) -> &[ExtraDocument] {
        &self.extras
    }
}

/// Read and parse a JSON file.
pub fn load_json(path: &Path) -> Result<Value, ViewError> {
    let contents = fs::read_to_string(path).map_err(|source| ViewError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ViewError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_document(path: &Path, strict: bool) -> Result<Document, ViewError> {
    match load_json(path) {
        Ok(value) => Ok(Document::Loaded(value)),
        Err(err) if !strict => {
            tracing::warn!(path = %path.display(), error = %err, "Unreadable document");
            Ok(Document::Unreadable {
                error: err.to_string(),
            })
        }
        Err(err) => Err(err),
    }
}

/// `*.json` files outside the fixed document set, sorted by file name.
fn extra_json_files(directory: &Path) -> Result<Vec<(String, PathBuf)>, ViewError> {
    let entries = fs::read_dir(directory).map_err(|source| ViewError::Read {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            DocumentRole::from_filename(&name)
                .is_none()
                .then_some((name, path))
        })
        .collect();
    files.sort();
    Ok(files)
}
