//! Built-in maze layouts and the character set they are written in.

/// Cell symbols of the ASCII layout format.
///
/// The first line of a layout is the top row of the maze, i.e. the row with
/// the largest `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutSymbol {
    Wall,
    Empty,
    Food,
    Capsule,
    Agent,
    Threat,
}

impl LayoutSymbol {
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '%' => Some(Self::Wall),
            ' ' => Some(Self::Empty),
            '.' => Some(Self::Food),
            'o' => Some(Self::Capsule),
            'P' => Some(Self::Agent),
            'G' => Some(Self::Threat),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Wall => '%',
            Self::Empty => ' ',
            Self::Food => '.',
            Self::Capsule => 'o',
            Self::Agent => 'P',
            Self::Threat => 'G',
        }
    }
}

/// Layouts shipped with the crate, one per standard grid kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinLayout {
    /// 7×7 small grid.
    SmallGrid,
    /// 20×11 classic maze.
    MediumClassic,
}

impl BuiltinLayout {
    pub const ALL: [BuiltinLayout; 2] = [BuiltinLayout::SmallGrid, BuiltinLayout::MediumClassic];

    pub const fn name(self) -> &'static str {
        match self {
            Self::SmallGrid => "small_grid",
            Self::MediumClassic => "medium_classic",
        }
    }

    pub const fn source(self) -> &'static str {
        match self {
            Self::SmallGrid => include_str!("../data/layouts/small_grid.lay"),
            Self::MediumClassic => include_str!("../data/layouts/medium_classic.lay"),
        }
    }
}
