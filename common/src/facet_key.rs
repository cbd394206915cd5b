//! Facet keys and their wire names.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacetKey {
    DepartmentId,
    CategoryId,
    SubcategoryId,
    ApparelId,
    BrandId,
    LineId,
    Collection,
    StyleId,
    PatternId,
    FitId,
    GenderId,
    MaterialId,
    SizeId,
    ColorId,
    Nationality,
    Years,
    Months,
    Days,
    MinPrice,
    MaxPrice,
    Condition,
    SortBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetCardinality {
    Single,
    Multi,
}

impl FacetKey {
    pub const ALL: [FacetKey; 22] = [
        FacetKey::DepartmentId,
        FacetKey::CategoryId,
        FacetKey::SubcategoryId,
        FacetKey::ApparelId,
        FacetKey::BrandId,
        FacetKey::LineId,
        FacetKey::Collection,
        FacetKey::StyleId,
        FacetKey::PatternId,
        FacetKey::FitId,
        FacetKey::GenderId,
        FacetKey::MaterialId,
        FacetKey::SizeId,
        FacetKey::ColorId,
        FacetKey::Nationality,
        FacetKey::Years,
        FacetKey::Months,
        FacetKey::Days,
        FacetKey::MinPrice,
        FacetKey::MaxPrice,
        FacetKey::Condition,
        FacetKey::SortBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetKey::DepartmentId => "departmentId",
            FacetKey::CategoryId => "categoryId",
            FacetKey::SubcategoryId => "subcategoryId",
            FacetKey::ApparelId => "apparelId",
            FacetKey::BrandId => "brandId",
            FacetKey::LineId => "lineId",
            FacetKey::Collection => "collection",
            FacetKey::StyleId => "styleId",
            FacetKey::PatternId => "patternId",
            FacetKey::FitId => "fitId",
            FacetKey::GenderId => "genderId",
            FacetKey::MaterialId => "materialId",
            FacetKey::SizeId => "sizeId",
            FacetKey::ColorId => "colorId",
            FacetKey::Nationality => "nationality",
            FacetKey::Years => "years",
            FacetKey::Months => "months",
            FacetKey::Days => "days",
            FacetKey::MinPrice => "minPrice",
            FacetKey::MaxPrice => "maxPrice",
            FacetKey::Condition => "condition",
            FacetKey::SortBy => "sortBy",
        }
    }

    /// Unknown names yield `None`; callers drop them silently.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }

    pub fn cardinality(&self) -> FacetCardinality {
        match self {
            FacetKey::GenderId
            | FacetKey::Years
            | FacetKey::Months
            | FacetKey::Days
            | FacetKey::MinPrice
            | FacetKey::MaxPrice
            | FacetKey::Condition
            | FacetKey::SortBy => FacetCardinality::Single,
            _ => FacetCardinality::Multi,
        }
    }

    pub fn is_multi(&self) -> bool {
        self.cardinality() == FacetCardinality::Multi
    }
}

impl Display for FacetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFacetKey(pub String);

impl Display for UnknownFacetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown facet key: {}", self.0)
    }
}

impl FromStr for FacetKey {
    type Err = UnknownFacetKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownFacetKey(s.to_string()))
    }
}
