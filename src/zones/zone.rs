//! The fixed set of zones a card instance can occupy.

use serde::{Deserialize, Serialize};

/// A named location for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Exile,
    CommandZone,
    Stack,
}

impl Zone {
    /// Every zone, in display order.
    pub const ALL: [Zone; 7] = [
        Zone::Library,
        Zone::Hand,
        Zone::Battlefield,
        Zone::Graveyard,
        Zone::Exile,
        Zone::CommandZone,
        Zone::Stack,
    ];

    /// Zones where an instance may be controlled by someone other than its owner.
    #[must_use]
    pub const fn supports_control(self) -> bool {
        matches!(self, Zone::Battlefield | Zone::Stack)
    }

    /// Zones whose contents are grouped by controller rather than owner.
    #[must_use]
    pub const fn grouped_by_controller(self) -> bool {
        matches!(self, Zone::Battlefield)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Library => "Library",
            Zone::Hand => "Hand",
            Zone::Battlefield => "Battlefield",
            Zone::Graveyard => "Graveyard",
            Zone::Exile => "Exile",
            Zone::CommandZone => "Command Zone",
            Zone::Stack => "Stack",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_zones() {
        for zone in Zone::ALL {
            let expected = matches!(zone, Zone::Battlefield | Zone::Stack);
            assert_eq!(zone.supports_control(), expected, "{zone}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Zone::CommandZone.to_string(), "Command Zone");
    }
}
