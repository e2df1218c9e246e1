use crate::models::PropertyType;
use serde::{Deserialize, Serialize};

/// Listing type constraint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Rent,
    Sale,
}

impl TypeFilter {
    pub fn accepts(&self, kind: PropertyType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Rent => kind == PropertyType::Rent,
            TypeFilter::Sale => kind == PropertyType::Sale,
        }
    }
}

impl From<PropertyType> for TypeFilter {
    fn from(kind: PropertyType) -> Self {
        match kind {
            PropertyType::Rent => TypeFilter::Rent,
            PropertyType::Sale => TypeFilter::Sale,
        }
    }
}

/// Structured constraints applied to the property list.
///
/// `None` bounds and `TypeFilter::All` leave the list unconstrained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Minimum price, inclusive
    pub min_price: Option<i64>,
    /// Maximum price, inclusive
    pub max_price: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TypeFilter,
    /// Minimum number of bedrooms, inclusive
    pub min_bedrooms: Option<u32>,
}

/// Single-field edit merged into a [`FilterState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    MinPrice(Option<i64>),
    MaxPrice(Option<i64>),
    Type(TypeFilter),
    MinBedrooms(Option<u32>),
}

impl FilterState {
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterState::default()
    }

    /// Merges the changes field by field; fields not mentioned keep their value
    pub fn apply(&mut self, changes: impl IntoIterator<Item = FilterChange>) {
        for change in changes {
            match change {
                FilterChange::MinPrice(value) => self.min_price = value,
                FilterChange::MaxPrice(value) => self.max_price = value,
                FilterChange::Type(value) => self.kind = value,
                FilterChange::MinBedrooms(value) => self.min_bedrooms = value,
            }
        }
    }

    pub fn merged(mut self, changes: impl IntoIterator<Item = FilterChange>) -> Self {
        self.apply(changes);
        self
    }
}
