//! Module metadata read from a manifest's dictionary literal.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use crate::base::FileId;
use crate::parser::{Expr, SourceFile};
use crate::syntax::{dict_entries, first_dict_literal, str_list_value, string_value};

/// Snapshot of one manifest file.
///
/// `id` is always the name of the module directory; `name` is the display
/// name declared in the manifest. Unrecognized or malformed values default to
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDescriptor {
    pub module_dir: PathBuf,
    pub manifest: FileId,
    pub id: SmolStr,
    pub name: String,
    pub version: String,
    pub description: String,
    pub authors: Vec<String>,
    pub website: String,
    pub depends: Vec<SmolStr>,
    pub data: Vec<String>,
    pub demo: Vec<String>,
    pub license: String,
}

impl ManifestDescriptor {
    /// Parse the manifest `source` of the module at `module_dir`.
    ///
    /// Returns `None` when the file holds no dictionary literal.
    pub fn parse(module_dir: &Path, manifest: FileId, source: &SourceFile) -> Option<Self> {
        let id = SmolStr::new(module_dir.file_name()?.to_str()?);
        let dict = first_dict_literal(source)?;

        let mut descriptor = Self {
            module_dir: module_dir.to_path_buf(),
            manifest,
            id,
            name: String::new(),
            version: String::new(),
            description: String::new(),
            authors: Vec::new(),
            website: String::new(),
            depends: Vec::new(),
            data: Vec::new(),
            demo: Vec::new(),
            license: String::new(),
        };

        for (key, value) in dict_entries(&dict) {
            match key.as_str() {
                "name" => set_string(&mut descriptor.name, &value),
                "version" => set_string(&mut descriptor.version, &value),
                "description" => set_string(&mut descriptor.description, &value),
                "website" => set_string(&mut descriptor.website, &value),
                "license" => set_string(&mut descriptor.license, &value),
                "author" => {
                    if let Some(author) = string_value(&value) {
                        descriptor.authors = vec![author];
                    } else if value.clone().unparenthesized().sequence_elements().is_some() {
                        descriptor.authors = str_list_value(&value).unwrap_or_default();
                    }
                }
                "depends" => {
                    descriptor.depends = string_list(&value).into_iter().map(SmolStr::from).collect();
                }
                "data" => descriptor.data = string_list(&value),
                "demo" => descriptor.demo = string_list(&value),
                _ => {}
            }
        }

        Some(descriptor)
    }
}

fn set_string(field: &mut String, value: &Expr) {
    if let Some(s) = string_value(value) {
        *field = s;
    }
}

fn string_list(value: &Expr) -> Vec<String> {
    str_list_value(value).unwrap_or_default()
}
