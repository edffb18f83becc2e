//! VariableStore - resolves end-user variables for the dialogue engine

use crate::document_store::{DocPath, DocumentStore};
use serde_json::{Map, Value};
use shared::StoreError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Field of the end-user document holding the variable bag
pub const VARIABLES_FIELD: &str = "variables";

/// Variable name -> value mapping of one end-user
pub type VariableBag = Map<String, Value>;

/// `null`, `false`, `0` and `""`
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Read-only access to end-user variable bags
#[derive(Clone)]
pub struct VariableStore {
    store: Arc<dyn DocumentStore>,
}

impl VariableStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the raw `variables` field of an end-user document.
    ///
    /// `Ok(None)` when the document or the field does not exist.
    async fn fetch_variables(&self, path: &DocPath) -> Result<Option<Value>, StoreError> {
        debug!(path = %path, "Fetching end-user variables");

        match self.store.get_document(path).await {
            Ok(document) => Ok(document.and_then(|document| match document {
                Value::Object(mut fields) => fields.remove(VARIABLES_FIELD),
                _ => None,
            })),
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to fetch end-user document");
                Err(e)
            }
        }
    }

    /// Fetch the whole variable bag of an end-user.
    ///
    /// `Ok(None)` when the document does not exist or its `variables` field is
    /// missing or falsy. A truthy `variables` value that is not an object is
    /// reported as `Malformed`; store faults are returned as `Err`.
    pub async fn get_all_variables(
        &self,
        org_id: &str,
        end_user_id: &str,
    ) -> Result<Option<VariableBag>, StoreError> {
        let path = DocPath::end_user(org_id, end_user_id)?;

        match self.fetch_variables(&path).await? {
            Some(Value::Object(bag)) => Ok(Some(bag)),
            Some(value) if !is_falsy(&value) => Err(StoreError::Malformed {
                path: path.to_string(),
                reason: format!("'{}' is not an object", VARIABLES_FIELD),
            }),
            _ => Ok(None),
        }
    }

    /// Resolve one variable.
    ///
    /// A missing document, a falsy or non-object bag, and a missing key all
    /// yield `Ok(None)`; callers cannot tell them apart. Only store faults
    /// are errors.
    pub async fn get_variable(
        &self,
        org_id: &str,
        end_user_id: &str,
        name: &str,
    ) -> Result<Option<Value>, StoreError> {
        let path = DocPath::end_user(org_id, end_user_id)?;

        let Some(Value::Object(bag)) = self.fetch_variables(&path).await? else {
            return Ok(None);
        };
        Ok(bag.get(name).filter(|v| !v.is_null()).cloned())
    }

    /// View bound to a single end-user
    pub fn for_end_user(&self, org_id: impl Into<String>, end_user_id: impl Into<String>) -> EndUserVariables {
        EndUserVariables {
            store: self.clone(),
            org_id: org_id.into(),
            end_user_id: end_user_id.into(),
        }
    }
}

/// Variables of one end-user, as used during a single conversation turn
#[derive(Clone)]
pub struct EndUserVariables {
    store: VariableStore,
    org_id: String,
    end_user_id: String,
}

impl EndUserVariables {
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn end_user_id(&self) -> &str {
        &self.end_user_id
    }

    pub async fn all(&self) -> Result<Option<VariableBag>, StoreError> {
        self.store.get_all_variables(&self.org_id, &self.end_user_id).await
    }

    pub async fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        self.store.get_variable(&self.org_id, &self.end_user_id, name).await
    }
}
