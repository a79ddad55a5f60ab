//! Viseme identity - which mouth shape the avatar should show
//!
//! Visemes are indexed 0..=14 to match the production mapping used by the
//! speech backend. Index 0 is always neutral/silence.

use std::fmt;

/// Number of distinct mouth shapes in the standard set (ids 0..=14).
pub const VISEME_COUNT: u8 = 15;

/// Viseme identifier - index into the avatar's mouth-shape set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct VisemeId(pub u8);

impl VisemeId {
    /// Closed/neutral mouth (silence).
    pub const NEUTRAL: VisemeId = VisemeId(0);

    #[inline]
    pub fn new(id: u8) -> Self {
        VisemeId(id)
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_neutral(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for VisemeId {
    #[inline]
    fn from(id: u8) -> Self {
        VisemeId(id)
    }
}

impl fmt::Debug for VisemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Viseme({})", self.0)
    }
}

impl fmt::Display for VisemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic mouth shapes behind the numeric ids.
///
/// Articulation groups follow the standard phoneme-to-viseme table the
/// speech backend ships: consonants grouped by place of articulation,
/// vowels by openness and rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouthShape {
    #[default]
    Silence, // 0: closed/neutral
    Bilabial,         // 1: p, b, m (lips together)
    Labiodental,      // 2: f, v (teeth on lip)
    Dental,           // 3: th, dh (tongue between teeth)
    Alveolar,         // 4: t, d, n, l, s, z
    PostAlveolar,     // 5: sh, zh, ch, jh, r
    Velar,            // 6: k, g, ng, y, w
    Glottal,          // 7: h
    OpenBack,         // 8: aa, ao (jaw open)
    OpenFront,        // 9: ae, ah
    MidVowel,         // 10: eh, er
    CloseFront,       // 11: ih, iy
    BackRounded,      // 12: ow, oo, uh, uw
    FrontDiphthong,   // 13: ay, ey
    ComplexDiphthong, // 14: oy, aw
}

impl MouthShape {
    /// Resolve a numeric id; unknown ids fall back to silence.
    pub fn from_id(id: VisemeId) -> Self {
        match id.as_u8() {
            1 => MouthShape::Bilabial,
            2 => MouthShape::Labiodental,
            3 => MouthShape::Dental,
            4 => MouthShape::Alveolar,
            5 => MouthShape::PostAlveolar,
            6 => MouthShape::Velar,
            7 => MouthShape::Glottal,
            8 => MouthShape::OpenBack,
            9 => MouthShape::OpenFront,
            10 => MouthShape::MidVowel,
            11 => MouthShape::CloseFront,
            12 => MouthShape::BackRounded,
            13 => MouthShape::FrontDiphthong,
            14 => MouthShape::ComplexDiphthong,
            _ => MouthShape::Silence,
        }
    }

    /// The numeric id the avatar set indexes with.
    pub fn id(self) -> VisemeId {
        let id = match self {
            MouthShape::Silence => 0,
            MouthShape::Bilabial => 1,
            MouthShape::Labiodental => 2,
            MouthShape::Dental => 3,
            MouthShape::Alveolar => 4,
            MouthShape::PostAlveolar => 5,
            MouthShape::Velar => 6,
            MouthShape::Glottal => 7,
            MouthShape::OpenBack => 8,
            MouthShape::OpenFront => 9,
            MouthShape::MidVowel => 10,
            MouthShape::CloseFront => 11,
            MouthShape::BackRounded => 12,
            MouthShape::FrontDiphthong => 13,
            MouthShape::ComplexDiphthong => 14,
        };
        VisemeId::new(id)
    }
}
