use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseError;

macro_rules! named_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseError::unknown($kind, wanted))
            }
        }
    };
}

/// Every value a cell can hold. Palette members, fill colors and the reset
/// color all come from this one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    White,
    Orange,
    Pink,
    Black,
    Gray,
}

named_enum!(Color, "color", {
    Red => "red",
    Green => "green",
    Blue => "blue",
    Yellow => "yellow",
    Purple => "purple",
    White => "white",
    Orange => "orange",
    Pink => "pink",
    Black => "black",
    Gray => "gray",
});

impl Color {
    pub const COUNT: usize = Color::ALL.len();

    /// Lowercase CSS-style name. The checksum is computed over these bytes.
    pub fn name(self) -> &'static str {
        self.as_str()
    }

    /// Stable slot for table lookups, in `0..Color::COUNT`.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::Red => [255, 0, 0],
            Color::Green => [0, 128, 0],
            Color::Blue => [0, 0, 255],
            Color::Yellow => [255, 255, 0],
            Color::Purple => [128, 0, 128],
            Color::White => [255, 255, 255],
            Color::Orange => [255, 165, 0],
            Color::Pink => [255, 192, 203],
            Color::Black => [0, 0, 0],
            Color::Gray => [128, 128, 128],
        }
    }
}

/// Most recent command, overwritten on every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum LastAction {
    Click(usize),
    DoubleClick(usize),
    Randomize,
    Reset,
}

impl fmt::Display for LastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastAction::Click(index) => write!(f, "click:{index}"),
            LastAction::DoubleClick(index) => write!(f, "doubleClick:{index}"),
            LastAction::Randomize => f.write_str("randomize"),
            LastAction::Reset => f.write_str("reset"),
        }
    }
}

/// Opaque per-controller identifier. Display/keying only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Named bundles of grid constants, one per known widget variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPreset {
    #[default]
    ColorChaos,
    Chaos,
    HugeChaos,
    /// Reset fills with the initial color and randomize covers every cell.
    Corrected,
}

named_enum!(GridPreset, "preset", {
    ColorChaos => "color_chaos",
    Chaos => "chaos",
    HugeChaos => "huge_chaos",
    Corrected => "corrected",
});

/// Which prefix of the grid `randomize` rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomizeCoverage {
    #[default]
    CeilHalf,
    FloorHalf,
    Full,
}

named_enum!(RandomizeCoverage, "randomize coverage", {
    CeilHalf => "ceil_half",
    FloorHalf => "floor_half",
    Full => "full",
});

impl RandomizeCoverage {
    /// Number of leading cells rewritten on a grid of `len` cells.
    pub fn limit(self, len: usize) -> usize {
        match self {
            RandomizeCoverage::CeilHalf => len.div_ceil(2),
            RandomizeCoverage::FloorHalf => len / 2,
            RandomizeCoverage::Full => len,
        }
    }
}

/// How a single cell contributes to the checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellEncoding {
    /// Sum of every character code of the color name.
    #[default]
    FullName,
    /// Character code of the first letter only.
    Initial,
}

named_enum!(CellEncoding, "checksum encoding", {
    FullName => "full_name",
    Initial => "initial",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumScheme {
    pub encoding: CellEncoding,
    pub modulus: u32,
}

impl Default for ChecksumScheme {
    fn default() -> Self {
        Self {
            encoding: CellEncoding::FullName,
            modulus: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_action_renders_tag_text() {
        assert_eq!(LastAction::Click(3).to_string(), "click:3");
        assert_eq!(LastAction::DoubleClick(24).to_string(), "doubleClick:24");
        assert_eq!(LastAction::Randomize.to_string(), "randomize");
        assert_eq!(LastAction::Reset.to_string(), "reset");
    }

    #[test]
    fn color_parses_case_insensitively() {
        assert_eq!("Purple".parse::<Color>().expect("purple"), Color::Purple);
        assert_eq!(" white ".parse::<Color>().expect("white"), Color::White);
        assert!("magenta".parse::<Color>().is_err());
    }

    #[test]
    fn color_ordinals_cover_the_lookup_table() {
        assert_eq!(Color::ALL.len(), Color::COUNT);
        for (slot, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.ordinal(), slot);
        }
    }

    #[test]
    fn coverage_limits_for_odd_grid() {
        assert_eq!(RandomizeCoverage::CeilHalf.limit(25), 13);
        assert_eq!(RandomizeCoverage::FloorHalf.limit(25), 12);
        assert_eq!(RandomizeCoverage::Full.limit(25), 25);
        assert_eq!(RandomizeCoverage::CeilHalf.limit(1), 1);
        assert_eq!(RandomizeCoverage::FloorHalf.limit(1), 0);
    }

    #[test]
    fn session_token_displays_as_32_hex_chars() {
        let token = SessionToken::from_random_bytes([0xab; 16]);
        let text = token.to_string();
        assert_eq!(text.len(), 32);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(token.as_uuid().get_version_num(), 4);
    }
}
