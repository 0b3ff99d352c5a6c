/// What the player knows about a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Hidden,
    /// Safe tile showing its adjacent mine count (0-8).
    Revealed(u8),
    RevealedMine,
    Flagged,
}

impl Tile {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    /// True for safe tiles that have been opened. A revealed mine does not count.
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}
