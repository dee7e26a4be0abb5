//! Typed component registry

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::Role;
use crate::error::{PizzeriaError, Result};
use crate::stages::Component;

/// Components keyed by the role they play
///
/// Each role and each name may be registered once.
#[derive(Default)]
pub(crate) struct Registry {
    components: HashMap<Role, Arc<dyn Component>>,
}

impl Registry {
    /// Check that `component` can be added without clashing
    pub fn check(&self, component: &dyn Component) -> Result<()> {
        if let Some(existing) = self.components.get(&component.role()) {
            return Err(PizzeriaError::DuplicateRole {
                role: component.role(),
                existing: existing.name().to_string(),
            });
        }
        if self.by_name(component.name()).is_some() {
            return Err(PizzeriaError::DuplicateComponent {
                name: component.name().to_string(),
            });
        }
        Ok(())
    }

    pub fn insert(&mut self, component: Arc<dyn Component>) {
        self.components.insert(component.role(), component);
    }

    pub fn by_role(&self, role: Role) -> Option<&Arc<dyn Component>> {
        self.components.get(&role)
    }

    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn Component>> {
        self.components.values().find(|c| c.name() == name)
    }

    /// First role without a component, if any
    pub fn missing_role(&self) -> Option<Role> {
        Role::ALL.into_iter().find(|role| !self.components.contains_key(role))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }
}
