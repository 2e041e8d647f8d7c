//! Domain constants for Odoo addon trees.

/// Recognized manifest file names, canonical name first, legacy alias second.
pub const MANIFEST_FILES: [&str; 2] = ["__manifest__.py", "__openerp__.py"];

/// Marker file that makes a directory a Python package.
pub const INIT_FILE: &str = "__init__.py";

/// The platform module every module implicitly depends on.
pub const BASE_MODULE: &str = "base";

/// Reserved two-segment prefix of synthetic addon imports (`odoo.addons.<module>`).
pub const ADDONS_NAMESPACE: [&str; 2] = ["odoo", "addons"];

/// Qualified names whose members are the visible addon modules.
pub const ADDONS_MEMBER_QNAMES: [&str; 2] = ["odoo.addons", "addons"];

/// Extension of Python source files.
pub const PYTHON_EXTENSION: &str = "py";

// ============================================================================
// MODEL CLASS ATTRIBUTES
// ============================================================================

pub const MODEL_NAME_ATTR: &str = "_name";
pub const MODEL_DESCRIPTION_ATTR: &str = "_description";
pub const MODEL_INHERIT_ATTR: &str = "_inherit";
pub const MODEL_INHERITS_ATTR: &str = "_inherits";

/// Namespace whose calls declare model fields (`fields.Char(...)`).
pub const FIELDS_NAMESPACE: &str = "fields";

// ============================================================================
// MANIFEST KEYS
// ============================================================================

/// Manifest keys whose string entries name other modules.
pub const MANIFEST_MODULE_KEYS: [&str; 1] = ["depends"];

/// Manifest keys whose string entries are paths relative to the module.
pub const MANIFEST_FILE_KEYS: [&str; 5] = ["data", "demo", "images", "qweb", "test"];
