//! Exact keying sequences for single characters and short messages

#[cfg(test)]
mod tests {
    use crate::{encode, record};
    use beacon_core::KeyEvent::{self, Key, Wait};

    /// ON, hold, OFF, trailing mark gap
    fn mark(hold: u32, gap: u32) -> [KeyEvent; 4] {
        [Key(true), Wait(hold), Key(false), Wait(gap)]
    }

    #[test]
    fn test_letter_a_at_70ms() {
        let timeline = record("A", 70);

        let mut expected = Vec::new();
        expected.extend(mark(70, 70));
        expected.extend(mark(210, 70));
        expected.push(Wait(140));

        assert_eq!(timeline.events(), expected);
        assert_eq!(timeline.to_morse_string(70).as_str(), ".-");
        println!("✓ A keyed as {}", timeline.to_morse_string(70));
    }

    #[test]
    fn test_space_is_gap_only() {
        let timeline = record(" ", 70);
        assert_eq!(timeline.events(), [Wait(210)]);
        assert!(timeline.transitions().is_empty());
    }

    #[test]
    fn test_slash_at_70ms() {
        let timeline = record("/", 70);

        let mut expected = Vec::new();
        for hold in [210, 70, 70, 210, 70] {
            expected.extend(mark(hold, 70));
        }
        expected.push(Wait(140));

        assert_eq!(timeline.events(), expected);
        assert_eq!(timeline.to_morse_string(70).as_str(), "-..-.");
    }

    #[test]
    fn test_unsupported_between_letters() {
        assert_eq!(encode("A!B", 70), encode("AB", 70));
        assert_eq!(record("A!B", 70).events(), record("AB", 70).events());
    }

    #[test]
    fn test_only_unsupported_is_silent() {
        let timeline = record("!?#abc", 70);
        assert!(timeline.is_empty());
        assert_eq!(timeline.total_ms(), 0);
    }

    #[test]
    fn test_trailing_space_not_trimmed() {
        let with_space = encode("E ", 70);
        let without = encode("E", 70);
        assert_eq!(with_space.len(), without.len() + 1);
        assert_eq!(with_space.last(), Some(&Wait(210)));
    }

    #[test]
    fn test_spacing_between_characters_totals_three_units() {
        // E E: ... OFF, 1U mark gap, 2U char gap, ON ...
        let events = encode("EE", 50);
        assert_eq!(&events[2..6], &[Key(false), Wait(50), Wait(100), Key(true)]);
    }

    #[test]
    fn test_word_gap_follows_character_gap() {
        // 1U + 2U after the character, then 3U for the space
        let events = encode("E E", 10);
        assert_eq!(
            events,
            [
                Key(true), Wait(10), Key(false), Wait(10), Wait(20),
                Wait(30),
                Key(true), Wait(10), Key(false), Wait(10), Wait(20),
            ]
        );
    }

    #[test]
    fn test_reference_message() {
        let timeline = record("VVV DE VE3WCC/B FN15XI", 70);
        assert_eq!(
            timeline.to_morse_string(70).as_str(),
            "...- ...- ...- / -.. . / ...- . ...-- .-- -.-. -.-. -..-. -... / ..-. -. .---- ..... -..- .."
        );
        // Transitions always come in ON/OFF pairs and end key-up
        let transitions = timeline.transitions();
        assert!(transitions.chunks(2).all(|pair| pair == [true, false]));
        println!("✓ Reference message: {}ms", timeline.total_ms());
    }
}
