//! Adapter for hosts whose validation logic is a plain synchronous function

use super::traits::ValidationEngine;
use crate::state::{FormErrors, FormValues};
use anyhow::Result;
use async_trait::async_trait;

/// Wraps a synchronous closure as a `ValidationEngine`
pub struct ClosureEngine<F> {
    rules: F,
}

impl<F> ClosureEngine<F>
where
    F: Fn(&FormValues) -> FormErrors + Send + Sync,
{
    pub fn new(rules: F) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl<F> ValidationEngine for ClosureEngine<F>
where
    F: Fn(&FormValues) -> FormErrors + Send + Sync,
{
    async fn validate(&self, values: &FormValues) -> Result<FormErrors> {
        Ok((self.rules)(values))
    }
}
