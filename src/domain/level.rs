//! Closed five-level scales for rating, wifi strength and power sockets.

/// Position on a scale, from nothing to four units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    None,
    One,
    Two,
    Three,
    Four,
}

impl Level {
    pub fn all() -> &'static [Self] {
        &[Self::None, Self::One, Self::Two, Self::Three, Self::Four]
    }

    /// Number of units this level stands for (0..=4).
    pub fn units(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

/// The three attributes a cafe is scored on. Each has its own symbol set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Rating,
    Wifi,
    Power,
}

const NONE_SYMBOL: &str = "✘";

impl Scale {
    pub fn all() -> &'static [Self] {
        &[Self::Rating, Self::Wifi, Self::Power]
    }

    /// Form field name, also the column name.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Wifi => "wifi",
            Self::Power => "power",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rating => "Cafe Rating",
            Self::Wifi => "Wifi Strength Rating",
            Self::Power => "Power Socket Availability",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            Self::Rating => "☕",
            Self::Wifi => "💪",
            Self::Power => "🔌",
        }
    }

    pub fn symbol(&self, level: Level) -> String {
        match level {
            Level::None => NONE_SYMBOL.to_string(),
            other => self.unit().repeat(other.units()),
        }
    }

    /// Exact-match lookup; anything outside the five symbols is rejected.
    pub fn parse(&self, s: &str) -> Option<Level> {
        Level::all()
            .iter()
            .copied()
            .find(|level| self.symbol(*level) == s)
    }

    /// Symbols in ascending order, as offered in the form.
    pub fn choices(&self) -> Vec<String> {
        Level::all().iter().map(|l| self.symbol(*l)).collect()
    }
}
