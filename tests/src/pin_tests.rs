//! Key output over embedded-hal pins, checked against pin mock transactions

#[cfg(test)]
mod tests {
    use beacon_core::hal::mock::MockDelay;
    use beacon_core::{send_message, EmbeddedHalKeyOutput, OutputKey, TimingProfile};
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    #[test]
    fn test_active_high_key_drives_pin() {
        let expectations = [
            // A: dit, dah
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ];
        let mut key = EmbeddedHalKeyOutput::new(PinMock::new(&expectations), false);
        let mut delay = MockDelay::new();

        send_message("A", TimingProfile::new(70).unwrap(), &mut key, &mut delay).unwrap();

        assert!(!key.get_state().unwrap());
        assert_eq!(delay.total_ms(), 70 + 70 + 210 + 70 + 140);
        key.release().done();
    }

    #[test]
    fn test_inverted_key_drives_pin_low() {
        let expectations = [Transaction::set(State::Low), Transaction::set(State::High)];
        let mut key = EmbeddedHalKeyOutput::new(PinMock::new(&expectations), true);
        let mut delay = MockDelay::new();

        send_message("E", TimingProfile::new(70).unwrap(), &mut key, &mut delay).unwrap();
        key.release().done();
    }

    #[test]
    fn test_space_never_touches_pin() {
        let expectations: [Transaction; 0] = [];
        let mut key = EmbeddedHalKeyOutput::new(PinMock::new(&expectations), false);
        let mut delay = MockDelay::new();

        send_message("   ", TimingProfile::new(70).unwrap(), &mut key, &mut delay).unwrap();

        assert_eq!(delay.calls(), 3);
        assert_eq!(delay.total_ms(), 630);
        key.release().done();
    }
}
