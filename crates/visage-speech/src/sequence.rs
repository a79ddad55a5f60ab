//! Text-driven viseme sequence generation
//!
//! When the backend has no phoneme alignment for an utterance it
//! approximates one: the audio duration is split evenly across words,
//! each word's share evenly across its letters, and every letter becomes
//! one viseme event. Crude, but it keeps the mouth moving in rough
//! correspondence with the text.

use std::time::Duration;

use visage_core::{MediaTime, VisemeEvent};

use crate::mapping::viseme_for_letter;

/// Generate a contiguous viseme sequence for `text` spread over
/// `audio_duration`. Returns an empty vector for empty or
/// whitespace-only text.
pub fn visemes_for_text(text: &str, audio_duration: Duration) -> Vec<VisemeEvent> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let word_share = audio_duration.as_secs_f64() / words.len() as f64;
    let mut events = Vec::new();

    for (word_index, word) in words.iter().enumerate() {
        let letters: Vec<char> = word.chars().collect();
        if letters.is_empty() {
            continue;
        }
        let word_start = word_index as f64 * word_share;
        let letter_share = word_share / letters.len() as f64;

        for (letter_index, letter) in letters.iter().enumerate() {
            let offset = word_start + letter_index as f64 * letter_share;
            events.push(VisemeEvent::new(
                viseme_for_letter(*letter),
                MediaTime::from_secs_f64(offset),
                Duration::from_secs_f64(letter_share),
            ));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use visage_core::VisemeId;

    use super::*;

    #[test]
    fn test_empty_text_yields_no_events() {
        assert!(visemes_for_text("", Duration::from_secs(1)).is_empty());
        assert!(visemes_for_text("   ", Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_single_word_splits_evenly() {
        let events = visemes_for_text("hi", Duration::from_secs(1));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].viseme, VisemeId::new(7));
        assert_eq!(events[1].viseme, VisemeId::new(11));
        assert_eq!(events[0].offset, MediaTime::ZERO);
        assert_eq!(events[1].offset, MediaTime::from_millis(500));
        assert_eq!(events[0].duration, Duration::from_millis(500));
    }

    #[test]
    fn test_words_get_equal_shares() {
        let events = visemes_for_text("go on", Duration::from_secs(2));
        // Second word starts exactly at the half-way point.
        let second_word = events
            .iter()
            .find(|e| e.offset >= MediaTime::from_secs_f64(1.0))
            .unwrap();
        assert_eq!(second_word.offset, MediaTime::from_secs_f64(1.0));
    }

    #[test]
    fn test_sequence_is_contiguous() {
        let events = visemes_for_text("hello world", Duration::from_secs(2));
        assert_eq!(events.len(), 10);
        for pair in events.windows(2) {
            let gap = pair[1].offset.delta(pair[0].end()).as_micros().abs();
            // Float splitting leaves sub-microsecond drift at worst.
            assert!(gap <= 1, "gap of {gap}us between events");
        }
    }

    #[test]
    fn test_sequence_covers_duration() {
        let duration = Duration::from_secs_f64(1.7);
        let events = visemes_for_text("testing coverage here", duration);
        let last_end = events.last().unwrap().end();
        let drift = last_end.delta(MediaTime::from_secs_f64(1.7)).as_micros().abs();
        assert!(drift <= 2, "sequence ends {drift}us away from audio end");
    }
}
