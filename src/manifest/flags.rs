//! Location flags declared by connectors

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::error::{Result, unknown_flag};

/// Set of location flags, folded into a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LocationFlags(u32);

const NAMES: [(&str, LocationFlags); 4] = [
    ("localfs", LocationFlags::LOCALFS),
    ("file", LocationFlags::FILE),
    ("stream", LocationFlags::STREAM),
    ("needack", LocationFlags::NEEDACK),
];

impl LocationFlags {
    /// The location refers to the local file system
    pub const LOCALFS: Self = Self(1 << 0);
    /// The location refers to a single file
    pub const FILE: Self = Self(1 << 1);
    /// The connector works on a stream
    pub const STREAM: Self = Self(1 << 2);
    /// The connector expects acknowledgements
    pub const NEEDACK: Self = Self(1 << 3);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Look up a single flag by name
    pub fn parse_flag(token: &str) -> Result<Self> {
        NAMES
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, flag)| *flag)
            .ok_or_else(|| unknown_flag(token))
    }

    /// Fold a list of flag names; the first unknown name aborts
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        tokens.iter().try_fold(Self::empty(), |flags, token| {
            Ok(flags | Self::parse_flag(token.as_ref())?)
        })
    }
}

impl BitOr for LocationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LocationFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for LocationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        write!(f, "{}", names.join(","))
    }
}
