//! Model identity read from a class body.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::constants::{
    MODEL_DESCRIPTION_ATTR, MODEL_INHERIT_ATTR, MODEL_INHERITS_ATTR, MODEL_NAME_ATTR,
};
use crate::hir::ClassPtr;
use crate::parser::{ClassDef, Expr};
use crate::syntax::{dict_value, str_list_value, string_value};

/// Snapshot of one class contributing to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub class: ClassPtr,
    /// Logical model id; never empty.
    pub id: SmolStr,
    pub description: String,
    pub inherit: Vec<SmolStr>,
    /// Delegated model id → name of the linking field.
    pub inherits: IndexMap<SmolStr, SmolStr>,
}

impl ModelDescriptor {
    /// Parse the class attributes of `class`.
    ///
    /// An explicit `_name` wins; otherwise the first `_inherit` entry is the
    /// id. A class with neither is not a model and yields `None`.
    pub fn parse(ptr: ClassPtr, class: &ClassDef) -> Option<Self> {
        let attribute = |name: &str| class.attribute(name).and_then(|a| a.value());

        let name = attribute(MODEL_NAME_ATTR).and_then(|v| string_value(&v));
        let description = attribute(MODEL_DESCRIPTION_ATTR)
            .and_then(|v| string_value(&v))
            .unwrap_or_default();
        let inherit: Vec<SmolStr> = attribute(MODEL_INHERIT_ATTR)
            .map(|v| inherit_list(&v))
            .unwrap_or_default();

        let id = name
            .filter(|n| !n.is_empty())
            .map(SmolStr::from)
            .or_else(|| inherit.first().filter(|i| !i.is_empty()).cloned())?;

        let inherits = attribute(MODEL_INHERITS_ATTR)
            .and_then(|v| dict_value(&v))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(model, field)| Some((SmolStr::from(model), SmolStr::from(string_value(&field)?))))
            .collect();

        Some(Self {
            class: ptr,
            id,
            description,
            inherit,
            inherits,
        })
    }
}

/// `_inherit` is a single string or a list of strings.
fn inherit_list(value: &Expr) -> Vec<SmolStr> {
    if let Some(single) = string_value(value) {
        return vec![SmolStr::from(single)];
    }
    str_list_value(value)
        .unwrap_or_default()
        .into_iter()
        .map(SmolStr::from)
        .collect()
}
