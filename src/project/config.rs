//! Project-level settings.

use smol_str::SmolStr;

use crate::base::constants::{ADDONS_NAMESPACE, BASE_MODULE};

/// Settings that differ between framework distributions.
///
/// The defaults match the standard layout; forks that rename the platform
/// module or the addons namespace override them here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Module every module implicitly depends on.
    pub base_module: SmolStr,
    /// Reserved import prefix in front of module names (`odoo.addons`).
    pub addons_namespace: Vec<SmolStr>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            base_module: SmolStr::new_static(BASE_MODULE),
            addons_namespace: ADDONS_NAMESPACE.iter().map(|s| SmolStr::new(s)).collect(),
        }
    }
}

impl ProjectConfig {
    pub fn with_base_module(mut self, name: impl Into<SmolStr>) -> Self {
        self.base_module = name.into();
        self
    }

    pub fn with_addons_namespace<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.addons_namespace = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Qualified names whose members are addon modules: the full namespace
    /// (`odoo.addons`) and its last segment alone (`addons`).
    pub fn addons_member_qnames(&self) -> Vec<String> {
        let full = self.addons_namespace.join(".");
        let mut names = vec![full];
        if self.addons_namespace.len() > 1
            && let Some(last) = self.addons_namespace.last()
        {
            names.push(last.to_string());
        }
        names
    }
}
