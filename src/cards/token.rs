//! Token specifications.
//!
//! Tokens are the only cards the engine fabricates itself. A `TokenSpec`
//! carries the freeform fields a player types in; `into_card` turns it into
//! ordinary card metadata shared by every token created from it.

use serde::{Deserialize, Serialize};

use super::definition::{Card, Color};

/// Freeform description of a token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpec {
    pub name: String,
    pub type_line: String,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub colors: Vec<Color>,
    pub image_ref: Option<String>,
}

impl TokenSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, type_line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: type_line.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_power_toughness(
        mut self,
        power: impl Into<String>,
        toughness: impl Into<String>,
    ) -> Self {
        self.power = Some(power.into());
        self.toughness = Some(toughness.into());
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Synthesize card metadata. Tokens have no cost.
    #[must_use]
    pub fn into_card(self) -> Card {
        Card {
            name: self.name,
            type_line: self.type_line,
            power: self.power,
            toughness: self.toughness,
            colors: self.colors,
            image_ref: self.image_ref,
            ..Card::default()
        }
    }
}
