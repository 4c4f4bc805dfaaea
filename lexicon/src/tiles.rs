use std::convert::TryInto;
use std::fmt;

// 27 values: A-Z, Blank
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct Tile(u8);

/// Points per tile, indexed by `Tile::as_index`
pub static POINTS_EN: [u32; Tile::_MAX] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, // A-M
    1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10, // N-Z
    0, // ?
];

/// Number of tiles of each kind in a standard English bag, indexed by `Tile::as_index`
pub static DISTRIB_EN: [u32; Tile::_MAX] = [
    9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, // A-M
    6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1, // N-Z
    2, // ?
];

impl Tile {
    pub const BLANK: Self = Tile(26);
    pub const _MAX: usize = 27;

    /// Case-insensitive; `None` for anything that is not a letter or `?`
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A'..='Z' => Some(Tile((c as u32 - 'A' as u32).try_into().ok()?)),
            'a'..='z' => Some(Tile((c as u32 - 'a' as u32).try_into().ok()?)),
            '?' => Some(Tile::BLANK),
            _ => None,
        }
    }

    pub fn into_char(self) -> char {
        assert!((self.0 as usize) < Self::_MAX);
        match self {
            Tile::BLANK => '?',
            _ => (b'A' + self.0) as char,
        }
    }

    pub fn as_index(self) -> usize {
        assert!((self.0 as usize) < Self::_MAX);
        self.0 as usize
    }

    pub fn from_index(i: usize) -> Tile {
        assert!(i < Self::_MAX);
        Tile(i as u8)
    }

    pub fn points(self) -> u32 {
        POINTS_EN[self.as_index()]
    }

    pub fn bag_count(self) -> u32 {
        DISTRIB_EN[self.as_index()]
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_char())
    }
}

/// Sum of tile points over `word`. Characters without a tile score nothing.
pub fn word_points(word: &str) -> u32 {
    word.chars()
        .filter_map(Tile::from_char)
        .map(Tile::points)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_chars() {
        assert_eq!(Tile::from_char('a'), Tile::from_char('A'));
        assert_eq!(Tile::from_char('?'), Some(Tile::BLANK));
        assert_eq!(Tile::from_char('_'), None);
        assert_eq!(Tile::from_char('é'), None);
        for i in 0..Tile::_MAX {
            let tile = Tile::from_index(i);
            assert_eq!(Tile::from_char(tile.into_char()), Some(tile));
        }
    }

    #[test]
    fn test_tables() {
        assert_eq!(DISTRIB_EN.iter().sum::<u32>(), 100);
        assert_eq!(POINTS_EN.iter().sum::<u32>(), 87);
        assert_eq!(Tile::BLANK.points(), 0);
        assert_eq!(Tile::BLANK.bag_count(), 2);
        assert_eq!(Tile::from_char('E').map(Tile::bag_count), Some(12));
        assert_eq!(Tile::from_char('q').map(Tile::points), Some(10));
    }

    #[test]
    fn test_word_points() {
        assert_eq!(word_points("CAT"), 5);
        assert_eq!(word_points("cat"), 5);
        assert_eq!(word_points("QUIZ"), 22);
        assert_eq!(word_points("CAN'T"), 6);
        assert_eq!(word_points(""), 0);
    }
}
