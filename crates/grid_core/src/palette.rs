//! Ordered color cycle used by `click`.

use shared::domain::Color;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,
    #[error("palette lists {0} more than once")]
    Duplicate(Color),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
    positions: [Option<usize>; Color::COUNT],
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }

        let mut positions = [None; Color::COUNT];
        for (position, color) in colors.iter().enumerate() {
            let slot = &mut positions[color.ordinal()];
            if slot.is_some() {
                return Err(PaletteError::Duplicate(*color));
            }
            *slot = Some(position);
        }

        Ok(Self { colors, positions })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn first(&self) -> Color {
        self.colors[0]
    }

    pub fn get(&self, position: usize) -> Option<Color> {
        self.colors.get(position).copied()
    }

    pub fn position(&self, color: Color) -> Option<usize> {
        self.positions[color.ordinal()]
    }

    /// Next color in the cycle. Colors outside the palette restart at the
    /// first entry.
    pub fn advance(&self, color: Color) -> Color {
        match self.position(color) {
            Some(position) => self.colors[(position + 1) % self.colors.len()],
            None => self.first(),
        }
    }
}
