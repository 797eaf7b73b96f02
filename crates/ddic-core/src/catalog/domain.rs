//! Internal layer: domains, value ranges and data elements.

use std::sync::Arc;

use super::types::{require_name, DataType};
use crate::error::{Error, Result};

/// Allowed values for a domain.
///
/// Values keep their insertion order and duplicates collapse. An empty range
/// places no restriction on values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueRange {
    fixed_values: Vec<String>,
}

impl ValueRange {
    /// Create an unconstrained value range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a value range from a list of fixed values.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut range = Self::new();
        for value in values {
            range.add_fixed_value(value);
        }
        range
    }

    /// Add a single allowed value.
    pub fn add_fixed_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !self.fixed_values.contains(&value) {
            self.fixed_values.push(value);
        }
    }

    /// Allowed values in insertion order.
    pub fn fixed_values(&self) -> &[String] {
        &self.fixed_values
    }

    /// Check if the range places no restriction.
    pub fn is_empty(&self) -> bool {
        self.fixed_values.is_empty()
    }

    /// Check whether a value is within the allowed range.
    pub fn is_valid(&self, value: &str) -> bool {
        self.fixed_values.is_empty() || self.fixed_values.iter().any(|v| v == value)
    }
}

/// A domain: the technical attributes of a field.
///
/// Domains are the lowest building block of the dictionary and describe
/// physical storage: data type, length, decimal places and optionally the
/// set of allowed values.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    name: String,
    data_type: DataType,
    length: u32,
    decimals: u32,
    description: Option<String>,
    value_range: Option<ValueRange>,
}

impl Domain {
    /// Create a domain without decimal places.
    pub fn new(name: impl Into<String>, data_type: DataType, length: u32) -> Result<Self> {
        Self::with_decimals(name, data_type, length, 0)
    }

    /// Create a domain with decimal places (relevant for [`DataType::Decimal`]).
    pub fn with_decimals(
        name: impl Into<String>,
        data_type: DataType,
        length: u32,
        decimals: u32,
    ) -> Result<Self> {
        let name = require_name("Domain name", name)?;
        if length == 0 {
            return Err(Error::invalid("Length must be positive"));
        }
        Ok(Self {
            name,
            data_type,
            length,
            decimals,
            description: None,
            value_range: None,
        })
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the allowed value range.
    pub fn with_value_range(mut self, range: ValueRange) -> Self {
        self.value_range = Some(range);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value_range(&self) -> Option<&ValueRange> {
        self.value_range.as_ref()
    }

    /// Check a value against the domain's value range, if any.
    pub fn accepts(&self, value: &str) -> bool {
        self.value_range
            .as_ref()
            .map_or(true, |range| range.is_valid(value))
    }
}

/// A data element: semantic labels on top of a domain.
///
/// The element holds a shared handle to its domain. The consistency
/// validator requires that handle to be the very instance registered in the
/// catalog under the domain's name.
#[derive(Debug, Clone)]
pub struct DataElement {
    name: String,
    domain: Arc<Domain>,
    short_label: Option<String>,
    medium_label: Option<String>,
    long_label: Option<String>,
    documentation: Option<String>,
}

impl DataElement {
    /// Create a data element referencing a domain.
    pub fn new(name: impl Into<String>, domain: Arc<Domain>) -> Result<Self> {
        Ok(Self {
            name: require_name("Data element name", name)?,
            domain,
            short_label: None,
            medium_label: None,
            long_label: None,
            documentation: None,
        })
    }

    /// Set the short field label.
    pub fn with_short_label(mut self, label: impl Into<String>) -> Self {
        self.short_label = Some(label.into());
        self
    }

    /// Set the medium field label.
    pub fn with_medium_label(mut self, label: impl Into<String>) -> Self {
        self.medium_label = Some(label.into());
        self
    }

    /// Set the long field label.
    pub fn with_long_label(mut self, label: impl Into<String>) -> Self {
        self.long_label = Some(label.into());
        self
    }

    /// Set the documentation text.
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The referenced domain.
    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    pub fn short_label(&self) -> Option<&str> {
        self.short_label.as_deref()
    }

    pub fn medium_label(&self) -> Option<&str> {
        self.medium_label.as_deref()
    }

    pub fn long_label(&self) -> Option<&str> {
        self.long_label.as_deref()
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }
}
