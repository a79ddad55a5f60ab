//! Phoneme and letter to viseme mapping
//!
//! The tables mirror the production backend's standard viseme map:
//! consonants grouped by place of articulation, vowels by openness and
//! rounding, ids 0..=14 with 0 as silence.

use visage_core::VisemeId;

/// Map a phoneme label to its viseme id. Unknown phonemes map to silence.
pub fn viseme_for_phoneme(phoneme: &str) -> VisemeId {
    let id = match phoneme.trim().to_lowercase().as_str() {
        "sil" | "sp" | "" => 0,
        // Bilabial
        "p" | "b" | "m" => 1,
        // Labiodental
        "f" | "v" => 2,
        // Dental
        "th" | "dh" => 3,
        // Alveolar
        "t" | "d" | "n" | "l" | "s" | "z" => 4,
        // Post-alveolar
        "sh" | "zh" | "ch" | "jh" | "r" => 5,
        // Velar
        "k" | "g" | "ng" | "y" | "w" => 6,
        // Glottal
        "h" => 7,
        // Open back vowels (jaw open)
        "aa" | "ao" => 8,
        // Open front vowels
        "ae" | "ah" => 9,
        // Mid vowels
        "eh" | "er" => 10,
        // Close front vowels
        "ih" | "iy" => 11,
        // Back rounded vowels
        "ow" | "oo" | "uh" | "uw" => 12,
        // Diphthongs
        "ay" | "ey" => 13,
        "oy" | "aw" => 14,
        _ => 0,
    };
    VisemeId::new(id)
}

/// Letter-level approximation for text without phoneme alignment.
///
/// Coarser than the phoneme table on purpose; it only has to look
/// plausible when distributed across a word's share of the audio.
pub fn viseme_for_letter(letter: char) -> VisemeId {
    let id = match letter.to_ascii_lowercase() {
        'a' => 8,
        'e' => 10,
        'i' => 11,
        'o' | 'u' => 12,
        'p' | 'b' | 'm' => 1,
        'f' | 'v' => 2,
        't' | 'd' | 'n' | 'l' | 's' => 4,
        'r' => 5,
        'k' | 'g' | 'w' | 'y' => 6,
        'h' => 7,
        _ => 0,
    };
    VisemeId::new(id)
}
