//! Parameter-to-field bindings for model-backed parameters.
//!
//! # Responsibilities
//! - Decide which model field each model-bound parameter is looked up by
//! - Reject the reserved `route` parameter name
//!
//! # Design Decisions
//! - An explicit `field` attribute wins over the model's URL capability
//! - Parameters without a resolvable field are left out (they never resolve)

use std::collections::HashMap;

use crate::routing::error::{RouterError, RouterResult};
use crate::routing::model::URL_FIELD;
use crate::routing::params::ParameterRegistry;

/// Reserved key selecting a pattern explicitly when building URLs.
pub const RESERVED_PARAM: &str = "route";

/// Resolved `parameter -> field` bindings.
#[derive(Debug, Clone, Default)]
pub struct FieldBindings {
    fields: HashMap<String, String>,
}

impl FieldBindings {
    pub fn build(registry: &ParameterRegistry) -> RouterResult<Self> {
        if registry.contains(RESERVED_PARAM) {
            tracing::error!(param = RESERVED_PARAM, "Reserved parameter name registered");
            return Err(RouterError::ReservedParam);
        }

        let mut fields = HashMap::new();
        for (name, attributes) in registry.iter() {
            let field = match (attributes.explicit_field(), attributes.bound_model()) {
                (Some(field), _) => Some(field.to_string()),
                (None, Some(model)) if model.has_url_field() => Some(URL_FIELD.to_string()),
                _ => None,
            };
            match field {
                Some(field) => {
                    fields.insert(name.to_string(), field);
                }
                None if attributes.bound_model().is_some() => {
                    tracing::debug!(param = %name, "Model-bound parameter has no resolvable field");
                }
                None => {}
            }
        }
        Ok(Self { fields })
    }

    /// Field bound to `param`, if any.
    pub fn get(&self, param: &str) -> Option<&str> {
        self.fields.get(param).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
