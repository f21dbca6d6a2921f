use std::fmt;
use std::str::FromStr;

use crate::RouteMode;

/// Set of vehicle modes a query may ride.
///
/// Passed by value into each query; walking transfers are never filtered and
/// routes of mode [`RouteMode::Other`] never pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeFilter {
    bits: u8,
}

impl ModeFilter {
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    pub fn all() -> Self {
        RouteMode::FILTERABLE.into_iter().collect()
    }

    pub fn only(mode: RouteMode) -> Self {
        Self::none().with(mode)
    }

    #[must_use]
    pub fn with(mut self, mode: RouteMode) -> Self {
        self.bits |= Self::bit(mode);
        self
    }

    #[must_use]
    pub fn without(mut self, mode: RouteMode) -> Self {
        self.bits &= !Self::bit(mode);
        self
    }

    pub fn contains(self, mode: RouteMode) -> bool {
        self.bits & Self::bit(mode) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn modes(self) -> impl Iterator<Item = RouteMode> {
        RouteMode::FILTERABLE
            .into_iter()
            .filter(move |&mode| self.contains(mode))
    }

    const fn bit(mode: RouteMode) -> u8 {
        match mode {
            RouteMode::Bus => 1,
            RouteMode::Train => 1 << 1,
            RouteMode::Tram => 1 << 2,
            RouteMode::Metro => 1 << 3,
            RouteMode::Other => 0,
        }
    }
}

impl FromIterator<RouteMode> for ModeFilter {
    fn from_iter<I: IntoIterator<Item = RouteMode>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl FromStr for ModeFilter {
    type Err = String;

    /// Parses a comma separated list such as `"bus,Train"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut filter = Self::none();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let mode = match token.to_ascii_lowercase().as_str() {
                "bus" => RouteMode::Bus,
                "train" => RouteMode::Train,
                "tram" => RouteMode::Tram,
                "metro" => RouteMode::Metro,
                _ => {
                    return Err(format!(
                        "unknown mode {token:?}, expected bus, train, tram or metro"
                    ));
                }
            };
            filter = filter.with(mode);
        }

        if filter.is_empty() {
            return Err("at least one mode is required".to_string());
        }
        Ok(filter)
    }
}

impl fmt::Display for ModeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.modes().map(RouteMode::as_str).collect();
        f.write_str(&names.join(","))
    }
}
