//! Card metadata - static card data.
//!
//! `Card` holds what is printed on a card: name, cost, type line, rules text,
//! power/toughness. It is supplied pre-populated by a metadata collaborator;
//! the engine only fabricates one when creating tokens.
//!
//! Instance-specific data (zone, tapped, counters) lives in `CardInstance`.

use serde::{Deserialize, Serialize};

/// One of the five colors of mana.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

/// Static card metadata.
///
/// Power and toughness are strings because printed values can be `*`.
///
/// ## Example
///
/// ```
/// use commander_table::cards::Card;
///
/// let atraxa = Card::new("Atraxa, Praetors' Voice", "Legendary Creature — Phyrexian Angel Horror")
///     .with_mana_cost("{G}{W}{U}{B}", 4)
///     .with_power_toughness("4", "4");
///
/// assert!(atraxa.is_legendary());
/// assert!(atraxa.is_creature());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub mana_cost: String,
    pub converted_mana_cost: u32,
    pub type_line: String,
    pub oracle_text: String,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub colors: Vec<Color>,
    pub image_ref: Option<String>,

    /// Identifier in the external card catalog.
    pub catalog_id: Option<String>,
}

impl Card {
    /// Create a card with a name and type line.
    #[must_use]
    pub fn new(name: impl Into<String>, type_line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: type_line.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mana_cost(mut self, cost: impl Into<String>, converted: u32) -> Self {
        self.mana_cost = cost.into();
        self.converted_mana_cost = converted;
        self
    }

    #[must_use]
    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
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

    #[must_use]
    pub fn with_catalog_id(mut self, id: impl Into<String>) -> Self {
        self.catalog_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn is_legendary(&self) -> bool {
        self.type_line.contains("Legendary")
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.type_line.contains("Creature")
    }

    /// Basic lands are exempt from the singleton rule.
    #[must_use]
    pub fn is_basic_land(&self) -> bool {
        self.type_line.contains("Basic") && self.type_line.contains("Land")
    }

    /// Whether this card can be listed by `all_commanders`.
    #[must_use]
    pub fn is_legendary_creature(&self) -> bool {
        self.type_line.contains("Legendary Creature")
    }
}
