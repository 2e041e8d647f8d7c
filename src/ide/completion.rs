//! Completion variants for model and module references.

use smol_str::SmolStr;

use crate::base::{FileId, TextSize};
use crate::hir::{Database, Module};

use super::references::{ReferenceKind, reference_at};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Model,
    Module,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Model => 7,  // Class
            CompletionKind::Module => 9, // Module
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: SmolStr,
    pub kind: CompletionKind,
    /// Display name of a module, when its manifest declares one.
    pub detail: Option<String>,
}

impl CompletionItem {
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Completions for the string literal under `offset`.
///
/// Model positions offer every model id visible from the file's module;
/// `depends` entries offer every other module. Anything else offers nothing.
pub fn completions(db: &Database, file: FileId, offset: TextSize) -> Vec<CompletionItem> {
    let Some(reference) = reference_at(db, file, offset) else {
        return Vec::new();
    };
    let Some(module) = Module::for_file(db, file) else {
        return Vec::new();
    };

    match reference.kind {
        ReferenceKind::ModelName => model_variants(&module),
        ReferenceKind::ModuleName => module_variants(db, &module),
        ReferenceKind::DataFile => Vec::new(),
    }
}

pub fn model_variants(module: &Module<'_>) -> Vec<CompletionItem> {
    module
        .models(true)
        .into_iter()
        .map(|id| CompletionItem::new(id, CompletionKind::Model))
        .collect()
}

pub fn module_variants(db: &Database, current: &Module<'_>) -> Vec<CompletionItem> {
    Module::all(db)
        .into_iter()
        .filter(|module| module.name() != current.name())
        .map(|module| {
            let item = CompletionItem::new(module.name().clone(), CompletionKind::Module);
            match module.descriptor().map(|d| d.name.clone()) {
                Some(name) if !name.is_empty() => item.with_detail(name),
                _ => item,
            }
        })
        .collect()
}
