//! Enrichment steps applied to every generated operation and parameter.
//!
//! A [`FilterChain`] holds two ordered lists of filters. Parameter filters
//! run on each non-body parameter while an operation is being generated;
//! operation filters run once on the finished operation. Filters run in
//! registration order, each exactly once per item per build pass. Any filter
//! error aborts the pass.

pub mod header;
pub mod parameter;

use crate::description::{ApiOperation, ApiParameter};
use crate::document::{HttpMethod, Operation, Parameter};
use crate::error::FilterError;

pub use header::{ACCEPT_LANGUAGE, DEFAULT_ACCEPT_LANGUAGE, accept_language_header};
pub use parameter::{fill_description, merge_required};

/// What an operation filter knows about the operation it is enriching.
#[derive(Debug, Clone, Copy)]
pub struct OperationFilterContext<'a> {
    pub group_name: &'a str,
    pub path: &'a str,
    pub method: HttpMethod,
    pub api_operation: &'a ApiOperation,
}

/// What a parameter filter knows about the parameter it is enriching.
#[derive(Debug, Clone, Copy)]
pub struct ParameterFilterContext<'a> {
    pub group_name: &'a str,
    pub api_operation: &'a ApiOperation,
    pub api_parameter: &'a ApiParameter,
}

pub type OperationFilter = Box<
    dyn Fn(&mut Operation, &OperationFilterContext<'_>) -> Result<(), FilterError> + Send + Sync,
>;

pub type ParameterFilter = Box<
    dyn Fn(&mut Parameter, &ParameterFilterContext<'_>) -> Result<(), FilterError> + Send + Sync,
>;

/// Ordered operation and parameter filters.
pub struct FilterChain {
    operation_filters: Vec<OperationFilter>,
    parameter_filters: Vec<ParameterFilter>,
}

impl FilterChain {
    /// A chain with no filters.
    pub fn empty() -> Self {
        Self {
            operation_filters: Vec::new(),
            parameter_filters: Vec::new(),
        }
    }

    /// The standard chain with a custom `Accept-Language` example.
    pub fn standard(accept_language_example: &str) -> Self {
        Self::empty()
            .with_operation_filter(accept_language_header(accept_language_example))
            .with_parameter_filter(fill_description)
            .with_parameter_filter(merge_required)
    }

    pub fn with_operation_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&mut Operation, &OperationFilterContext<'_>) -> Result<(), FilterError>
            + Send
            + Sync
            + 'static,
    {
        self.operation_filters.push(Box::new(filter));
        self
    }

    pub fn with_parameter_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&mut Parameter, &ParameterFilterContext<'_>) -> Result<(), FilterError>
            + Send
            + Sync
            + 'static,
    {
        self.parameter_filters.push(Box::new(filter));
        self
    }

    pub fn operation_filter_count(&self) -> usize {
        self.operation_filters.len()
    }

    pub fn parameter_filter_count(&self) -> usize {
        self.parameter_filters.len()
    }

    pub fn apply_to_operation(
        &self,
        operation: &mut Operation,
        ctx: &OperationFilterContext<'_>,
    ) -> Result<(), FilterError> {
        for filter in &self.operation_filters {
            filter(operation, ctx)?;
        }
        Ok(())
    }

    pub fn apply_to_parameter(
        &self,
        parameter: &mut Parameter,
        ctx: &ParameterFilterContext<'_>,
    ) -> Result<(), FilterError> {
        for filter in &self.parameter_filters {
            filter(parameter, ctx)?;
        }
        Ok(())
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::standard(DEFAULT_ACCEPT_LANGUAGE)
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("operation_filters", &self.operation_filters.len())
            .field("parameter_filters", &self.parameter_filters.len())
            .finish()
    }
}
