//! Legend types

/// Chart legend
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Legend {
    /// Whether the legend is drawn
    pub visible: bool,
    /// Position
    pub position: LegendPosition,
}

impl Legend {
    /// Create a visible legend
    pub fn new(position: LegendPosition) -> Self {
        Self {
            visible: true,
            position,
        }
    }

    /// A legend that is not drawn
    pub fn hidden() -> Self {
        Self {
            visible: false,
            position: LegendPosition::default(),
        }
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::new(LegendPosition::default())
    }
}

/// Legend position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}
