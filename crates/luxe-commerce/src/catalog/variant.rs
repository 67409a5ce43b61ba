//! Variant axes and selections.
//!
//! A product declares the axes it varies on (Size, Color, ...); a cart
//! line carries a selection holding one choice per declared axis. A
//! selection keeps its choices sorted by axis name, so two selections
//! made in different orders compare equal.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A variant axis a product offers, with the values it accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantAxis {
    /// Axis name (e.g., "Size", "Color").
    pub name: String,
    /// The values this axis offers.
    pub values: Vec<String>,
}

impl VariantAxis {
    /// Create a new axis.
    pub fn new(
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if the axis offers a value.
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// An axis with at most one value never needs an explicit choice.
    pub fn is_fixed(&self) -> bool {
        self.values.len() <= 1
    }
}

/// One chosen value on one axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VariantChoice {
    /// Axis name.
    pub axis: String,
    /// Chosen value.
    pub value: String,
}

/// The set of axis choices identifying a cart line.
///
/// Choices stay sorted by axis name, so equality and hashing are
/// order-independent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VariantSelection(Vec<VariantChoice>);

impl VariantSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, axis: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(axis, value);
        self
    }

    /// Set the choice for an axis, replacing any existing choice.
    pub fn set(&mut self, axis: impl Into<String>, value: impl Into<String>) {
        let axis = axis.into();
        let value = value.into();
        match self.0.binary_search_by(|c| c.axis.cmp(&axis)) {
            Ok(i) => self.0[i].value = value,
            Err(i) => self.0.insert(i, VariantChoice { axis, value }),
        }
    }

    /// Get the chosen value for an axis.
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.0
            .binary_search_by(|c| c.axis.as_str().cmp(&axis))
            .ok()
            .map(|i| self.0[i].value.as_str())
    }

    /// Check if no choices have been made.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the choices in axis order.
    pub fn iter(&self) -> impl Iterator<Item = &VariantChoice> {
        self.0.iter()
    }

    /// Display label joining the chosen values (e.g., "Black / M").
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(|c| c.value.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl fmt::Display for VariantSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Resolve a requested selection against a product's declared axes.
///
/// Fixed axes (one value) are auto-filled. Multi-value axes require an
/// explicit, offered value. Choices on undeclared axes are rejected.
/// Returns the canonical, fully-populated selection.
pub fn resolve_selection(
    axes: &[VariantAxis],
    requested: &VariantSelection,
) -> Result<VariantSelection, CommerceError> {
    for choice in requested.iter() {
        let axis = axes
            .iter()
            .find(|a| a.name == choice.axis)
            .ok_or_else(|| CommerceError::UnknownAxis {
                axis: choice.axis.clone(),
            })?;
        if !axis.has_value(&choice.value) {
            return Err(CommerceError::UnknownAxisValue {
                axis: choice.axis.clone(),
                value: choice.value.clone(),
            });
        }
    }

    let mut resolved = VariantSelection::new();
    for axis in axes {
        match requested.get(&axis.name) {
            Some(value) => resolved.set(axis.name.clone(), value),
            None => {
                if let Some(only) = axis.values.first() {
                    if axis.is_fixed() {
                        resolved.set(axis.name.clone(), only.clone());
                    } else {
                        return Err(CommerceError::MissingSelection {
                            axis: axis.name.clone(),
                        });
                    }
                }
                // An axis with no values at all contributes nothing.
            }
        }
    }
    Ok(resolved)
}
