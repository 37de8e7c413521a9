//! Closed classification of raw node labels.

use std::fmt;

/// Category assigned to a node from its raw label.
///
/// The label is classified once when the graph is built and stored on the
/// node; nothing downstream re-derives it from strings.
///
/// # Examples
/// ```
/// use infodemics_core::Category;
///
/// assert_eq!(Category::classify("5G_Conspiracy_Graph"), Category::Conspiracy);
/// assert_eq!(Category::classify("Non_Conspiracy_Graph"), Category::NonConspiracy);
/// assert_eq!(Category::classify("Other_Graph"), Category::NonConspiracy);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Category {
    /// The node spreads the claim; it starts every run infected.
    Conspiracy,
    /// Every other node, including labels that match neither marker.
    #[default]
    NonConspiracy,
}

const NON_CONSPIRACY_MARKER: &str = "Non_Conspiracy";
const CONSPIRACY_MARKER: &str = "Conspiracy";

impl Category {
    /// Classifies a raw label by substring.
    ///
    /// `Non_Conspiracy` is checked first because it also contains the
    /// `Conspiracy` marker.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        if label.contains(NON_CONSPIRACY_MARKER) {
            Self::NonConspiracy
        } else if label.contains(CONSPIRACY_MARKER) {
            Self::Conspiracy
        } else {
            Self::NonConspiracy
        }
    }

    /// Returns the display name used by presentation layers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conspiracy => "Conspiracy",
            Self::NonConspiracy => "Non-Conspiracy",
        }
    }

    /// Returns `true` for [`Category::Conspiracy`].
    #[must_use]
    pub const fn is_conspiracy(self) -> bool {
        matches!(self, Self::Conspiracy)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
