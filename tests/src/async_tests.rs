//! Async executor tests: the cooperative variant keys exactly like the blocking one

#[cfg(test)]
mod tests {
    use crate::{encode, record};
    use beacon_core::test_utils::Timeline;
    use beacon_core::{play_async, Beacon, BeaconConfig, CyclePhase, MessageEncoder, TimingProfile};

    #[tokio::test]
    async fn test_play_async_matches_blocking() {
        let timeline = Timeline::new();
        let (mut key, mut delay) = timeline.ports();
        let profile = TimingProfile::new(70).unwrap();

        play_async(MessageEncoder::new("VE3WCC/B", profile), &mut key, &mut delay)
            .await
            .unwrap();

        assert_eq!(timeline.events(), record("VE3WCC/B", 70).events());
    }

    #[tokio::test]
    async fn test_async_cycle() {
        let timeline = Timeline::new();
        let (key, delay) = timeline.ports();
        let mut beacon = Beacon::new(BeaconConfig::new("CQ", 50), key, delay).unwrap();

        beacon.run_cycle_async().await.unwrap();

        let identify = encode("CQ", 50);
        let events = timeline.events();
        assert_eq!(&events[..identify.len()], &identify[..]);
        let waits = timeline.waits();
        assert_eq!(&waits[waits.len() - 3..], &[400, 5000, 400]);
        assert_eq!(events.len(), identify.len() + 5);
        assert_eq!(beacon.phase(), CyclePhase::Identify);
    }

    #[test]
    fn test_async_step_with_block_on() {
        let timeline = Timeline::new();
        let (key, delay) = timeline.ports();
        let mut beacon = Beacon::new(BeaconConfig::new("E", 10), key, delay).unwrap();

        let phase = tokio_test::block_on(beacon.step_async()).unwrap();
        assert_eq!(phase, CyclePhase::Tone);
        assert_eq!(timeline.waits(), [10, 10, 20]);

        let phase = tokio_test::block_on(beacon.step_async()).unwrap();
        assert_eq!(phase, CyclePhase::Identify);
        assert_eq!(timeline.total_ms(), 40 + 5800);
    }

    #[test]
    fn test_async_sub_millisecond_delay_rounds_up() {
        use embedded_hal_async::delay::DelayNs;

        let timeline = Timeline::new();
        let (_key, mut delay) = timeline.ports();
        tokio_test::block_on(delay.delay_ns(250_000));
        tokio_test::block_on(delay.delay_ns(2_000_001));
        assert_eq!(timeline.waits(), [1, 3]);
    }
}
