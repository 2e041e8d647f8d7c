//! Model fields: class attributes assigned from a `fields.*(...)` call.

use smol_str::SmolStr;

use crate::base::TextRange;
use crate::base::constants::FIELDS_NAMESPACE;
use crate::parser::{AstNode, ClassDef, Expr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: SmolStr,
    /// Field type, the callee's last segment (`Char`, `Many2one`, ...).
    pub kind: SmolStr,
    pub range: TextRange,
}

impl FieldDescriptor {
    /// Fields declared in the body of `class`, in declaration order.
    pub fn collect(class: &ClassDef) -> Vec<Self> {
        class
            .attributes()
            .filter_map(|assignment| {
                let target = assignment.target_name()?;
                let Expr::Call(call) = assignment.value()? else {
                    return None;
                };
                let callee = call.callee()?;
                let mut segments = callee.segments();
                let namespace = segments.next()?;
                let kind = segments.next()?;
                if namespace.text() != FIELDS_NAMESPACE || segments.next().is_some() {
                    return None;
                }
                Some(Self {
                    name: SmolStr::new(target.text()),
                    kind: SmolStr::new(kind.text()),
                    range: assignment.syntax().text_range(),
                })
            })
            .collect()
    }
}
