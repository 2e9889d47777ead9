//! Property-based tests over arbitrary units and messages

#[cfg(test)]
mod tests {
    use crate::encode;
    use beacon_core::{message_duration_ms, ConfigError, KeyEvent, Symbol, TimingProfile};
    use proptest::prelude::*;

    fn supported_message() -> impl Strategy<Value = String> {
        "[A-Z0-9/ ]{0,24}"
    }

    fn any_message() -> impl Strategy<Value = String> {
        "[A-Za-z0-9/ !?.,#\\-]{0,24}"
    }

    proptest! {
        #[test]
        fn prop_timing_ratios(unit in 1u32..=TimingProfile::MAX_UNIT_MS) {
            let profile = TimingProfile::new(unit).unwrap();
            prop_assert_eq!(profile.dit, unit);
            prop_assert_eq!(profile.dah, 3 * profile.dit);
            prop_assert_eq!(profile.inter_mark_gap, profile.dit);
            prop_assert_eq!(profile.inter_char_gap, 2 * profile.dit);
            prop_assert_eq!(profile.inter_word_gap, 3 * profile.dit);
            prop_assert_eq!(profile.tone_hold, 5000);
        }

        #[test]
        fn prop_oversized_unit_rejected(unit in TimingProfile::MAX_UNIT_MS + 1..=u32::MAX) {
            prop_assert_eq!(TimingProfile::new(unit), Err(ConfigError::UnitTooLarge));
        }

        #[test]
        fn prop_encoding_is_idempotent(message in any_message(), unit in 1u32..500) {
            prop_assert_eq!(encode(&message, unit), encode(&message, unit));
        }

        #[test]
        fn prop_unsupported_characters_are_invisible(
            message in supported_message(),
            noise in "[a-z!?.,#]{1,4}",
            position in 0usize..25,
        ) {
            let at = position.min(message.len());
            let mut noisy = message.clone();
            noisy.insert_str(at, &noise);
            prop_assert_eq!(encode(&noisy, 70), encode(&message, 70));
        }

        #[test]
        fn prop_key_alternates_and_ends_up(message in any_message()) {
            let mut key_down = false;
            for event in encode(&message, 10) {
                if let KeyEvent::Key(state) = event {
                    prop_assert_ne!(state, key_down);
                    key_down = state;
                }
            }
            prop_assert!(!key_down);
        }

        #[test]
        fn prop_duration_matches_symbol_units(
            message in any_message(),
            unit in 1u32..=TimingProfile::MAX_UNIT_MS,
        ) {
            let profile = TimingProfile::new(unit).unwrap();
            let expected: u64 = message
                .chars()
                .map(|ch| u64::from(Symbol::classify(ch).keyed_units()) * u64::from(unit))
                .sum();
            let actual = message_duration_ms(&message, profile);
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_waits_are_unit_multiples(message in supported_message(), unit in 1u32..200) {
            for event in encode(&message, unit) {
                if let KeyEvent::Wait(ms) = event {
                    prop_assert_eq!(ms % unit, 0);
                    prop_assert!(ms >= unit && ms <= 3 * unit);
                }
            }
        }
    }
}
