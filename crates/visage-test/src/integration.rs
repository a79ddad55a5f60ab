//! End-to-end pipeline tests: backend JSON -> clip -> track -> driver.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use visage_core::VisemeId;
    use visage_engine::{
        AudioTransportEvent, DriverConfig, FrameDriver, LipSyncScheduler, MonotonicClock,
    };
    use visage_speech::SpeechClip;

    use crate::harness::RecordingSink;

    fn backend_body() -> String {
        format!(
            r#"{{
                "success": true,
                "audio_data": "{}",
                "duration": 2.0,
                "visemes": [
                    {{"viseme_id": 7, "time_offset": 0.0, "duration": 0.5}},
                    {{"viseme_id": 10, "time_offset": 0.5, "duration": 0.5}},
                    {{"viseme_id": 4, "time_offset": 1.0, "duration": 1.0}}
                ],
                "sample_rate": 24000,
                "format": "mp3",
                "text": "hello",
                "language": "en"
            }}"#,
            BASE64.encode(b"mp3-bytes")
        )
    }

    #[tokio::test]
    async fn test_clip_plays_through_driver() {
        let clip = SpeechClip::from_json(&backend_body()).unwrap();
        assert_eq!(clip.visemes.len(), 3);

        let sink = RecordingSink::new();
        let scheduler = LipSyncScheduler::new(MonotonicClock::new(), sink.clone());
        let driver = FrameDriver::spawn(scheduler, DriverConfig::default());

        driver.start(clip.track(), None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        driver
            .audio_event(AudioTransportEvent::Ended)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        driver.shutdown().await.unwrap();

        let frames = sink.frames();
        assert!(frames.len() > 1);
        // The utterance ends back at the closed mouth.
        assert_eq!(frames.last(), Some(&(VisemeId::NEUTRAL, 0.0)));
        // The first cue's shape is what the smoothed value climbs toward.
        assert!(frames.iter().any(|(v, _)| v.as_u8() > 0));
    }

    #[tokio::test]
    async fn test_generated_text_track_plays() {
        let events = visage_speech::visemes_for_text("okay", Duration::from_secs(1));
        let track = visage_timeline::VisemeTrack::new(events);

        let sink = RecordingSink::new();
        let scheduler = LipSyncScheduler::new(MonotonicClock::new(), sink.clone());
        let driver = FrameDriver::spawn(scheduler, DriverConfig::default());

        driver.start(track, None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        driver.stop().await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        driver.shutdown().await.unwrap();

        let frames = sink.frames();
        assert!(!frames.is_empty());
        assert_eq!(frames.last(), Some(&(VisemeId::NEUTRAL, 0.0)));
    }
}
