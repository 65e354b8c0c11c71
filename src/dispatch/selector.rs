use std::fmt;
use std::str::FromStr;

use crate::error::{DispatchError, NestError};

/// Every message name the shape protocol understands.
///
/// Names follow keyword-message spelling: one trailing `:` per argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Id,
    IdPrefix,
    Vertices,
    ContainsPt,
    Encloses,
    IsClosed,
    IsCurved,
    Commands,
    LineSegments,
    DistanceTo,
    Specialize,
    LocalRoot,
    String,
    ParseAsParagraph,
    FindTightestContainerIn,
    RerootUnder,
}

impl Selector {
    pub const ALL: [Selector; 16] = [
        Self::Id,
        Self::IdPrefix,
        Self::Vertices,
        Self::ContainsPt,
        Self::Encloses,
        Self::IsClosed,
        Self::IsCurved,
        Self::Commands,
        Self::LineSegments,
        Self::DistanceTo,
        Self::Specialize,
        Self::LocalRoot,
        Self::String,
        Self::ParseAsParagraph,
        Self::FindTightestContainerIn,
        Self::RerootUnder,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::IdPrefix => "idPrefix",
            Self::Vertices => "vertices",
            Self::ContainsPt => "containsPt:",
            Self::Encloses => "encloses:",
            Self::IsClosed => "isClosed",
            Self::IsCurved => "isCurved",
            Self::Commands => "commands",
            Self::LineSegments => "lineSegments",
            Self::DistanceTo => "distanceTo:",
            Self::Specialize => "specialize",
            Self::LocalRoot => "localRoot",
            Self::String => "string",
            Self::ParseAsParagraph => "parseAsParagraph",
            Self::FindTightestContainerIn => "findTightestContainerIn:",
            Self::RerootUnder => "rerootUnder:",
        }
    }

    /// Number of arguments, equal to the number of `:` in the name.
    #[must_use]
    pub fn arity(self) -> usize {
        self.name().matches(':').count()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Selector {
    type Err = NestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sel| sel.name() == s)
            .ok_or_else(|| DispatchError::UnknownSelectorName(s.to_owned()).into())
    }
}
