// Unit tests for the transcript accumulator ordering and reset contracts.

use vision_live::{SpeakerRole, TranscriptAccumulator, TranscriptEntry};

#[test]
fn test_entries_keep_exact_append_order() {
    let transcript = TranscriptAccumulator::new();

    // Interleaved roles; order must be append order, never grouped by role.
    let fragments = [
        (SpeakerRole::User, "hello"),
        (SpeakerRole::Model, "hi"),
        (SpeakerRole::Model, "how can I help?"),
        (SpeakerRole::User, "what do you see"),
        (SpeakerRole::Model, "a desk"),
    ];

    for (role, text) in fragments {
        transcript.append(TranscriptEntry::new(role, text));
    }

    let entries = transcript.current_sequence();
    assert_eq!(entries.len(), fragments.len());
    for (entry, (role, text)) in entries.iter().zip(fragments) {
        assert_eq!(entry.role, role);
        assert_eq!(entry.text, text);
    }
}

#[test]
fn test_reset_clears_previous_session_contents() {
    let transcript = TranscriptAccumulator::new();

    transcript.append(TranscriptEntry::new(SpeakerRole::User, "old session"));
    transcript.append(TranscriptEntry::new(SpeakerRole::Model, "old reply"));
    assert_eq!(transcript.len(), 2);

    transcript.reset();

    assert!(transcript.is_empty());
    assert!(transcript.current_sequence().is_empty());
}

#[test]
fn test_snapshot_is_independent_of_later_appends() {
    let transcript = TranscriptAccumulator::new();
    transcript.append(TranscriptEntry::new(SpeakerRole::User, "first"));

    let snapshot = transcript.current_sequence();
    transcript.append(TranscriptEntry::new(SpeakerRole::Model, "second"));

    assert_eq!(snapshot.len(), 1);
    assert_eq!(transcript.len(), 2);
}

#[tokio::test]
async fn test_subscribers_observe_every_change() {
    let transcript = TranscriptAccumulator::new();
    let mut rx = transcript.subscribe();
    let initial = *rx.borrow_and_update();

    transcript.append(TranscriptEntry::new(SpeakerRole::User, "one"));
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), initial + 1);

    transcript.reset();
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), initial + 2);
}

#[test]
fn test_speaker_role_wire_format_is_lowercase() {
    // The backend tags fragments with lowercase role strings.
    assert_eq!(serde_json::to_string(&SpeakerRole::User).unwrap(), "\"user\"");
    assert_eq!(
        serde_json::to_string(&SpeakerRole::Model).unwrap(),
        "\"model\""
    );
}
