use ledsync_core::pulse::Channel;
use ledsync_core::sequence::{MatchEvent, SequenceMatcher, TargetUpdate};

fn matcher_with(seq: &[i32]) -> SequenceMatcher {
    let mut m = SequenceMatcher::new();
    assert_eq!(
        m.set_target_sequence(seq),
        TargetUpdate::Replaced { len: seq.len() }
    );
    m
}

#[test]
fn batches_walk_sequence_in_order() {
    let mut m = matcher_with(&[3, 7, 9]);

    let r = m.observe(&[3]);
    assert_eq!(
        r.matches,
        vec![MatchEvent {
            value: 3,
            index: 0,
            is_final: false
        }]
    );
    assert_eq!(m.cursor(), 1);

    let r = m.observe(&[5, 7]);
    assert_eq!(r.mismatches.len(), 1);
    assert_eq!(r.mismatches[0].value, 5);
    assert_eq!(r.mismatches[0].expected, 7);
    assert_eq!(r.matches.len(), 1);
    assert_eq!(r.matches[0].value, 7);
    assert_eq!(r.matches[0].channel(), Channel::Intermediate);
    assert_eq!(m.cursor(), 2);

    let r = m.observe(&[9]);
    assert_eq!(r.matches.len(), 1);
    assert!(r.matches[0].is_final);
    assert_eq!(r.matches[0].channel(), Channel::Final);
    assert_eq!(m.cursor(), 3);

    let r = m.observe(&[9]);
    assert!(r.matches.is_empty());
    assert!(r.mismatches.is_empty());
    assert_eq!(r.skipped, 1);
    assert_eq!(m.cursor(), 3);
}

#[test]
fn out_of_order_detection_is_discarded() {
    let mut m = matcher_with(&[1, 2]);

    let r = m.observe(&[2, 1]);
    assert_eq!(r.mismatches.len(), 1);
    assert_eq!(r.mismatches[0].value, 2);
    assert_eq!(r.matches.len(), 1);
    assert_eq!(r.matches[0].value, 1);
    assert!(!r.matches[0].is_final);
    assert_eq!(m.cursor(), 1);
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut m = matcher_with(&[1, 2]);
    m.observe(&[1]);

    let r = m.observe(&[]);
    assert!(r.matches.is_empty());
    assert!(r.mismatches.is_empty());
    assert_eq!(r.skipped, 0);
    assert_eq!(m.cursor(), 1);
}

#[test]
fn cursor_only_moves_on_expected_value() {
    let seq = [10, 20, 30, 40];
    let noise = [0, 11, 19, 31, -10, 40, 30, 20];

    for c in 0..seq.len() {
        let mut m = matcher_with(&seq);
        m.observe(&seq[..c]);
        assert_eq!(m.cursor(), c);

        for v in noise.iter().copied().filter(|v| *v != seq[c]) {
            m.observe(&[v]);
            assert_eq!(m.cursor(), c, "value {v} moved cursor at {c}");
        }

        m.observe(&[seq[c]]);
        assert_eq!(m.cursor(), c + 1);
    }
}

#[test]
fn identical_announcement_keeps_progress() {
    let mut m = matcher_with(&[5, 6, 7]);
    m.observe(&[5, 6]);

    assert_eq!(m.set_target_sequence(&[5, 6, 7]), TargetUpdate::Unchanged);
    assert_eq!(m.cursor(), 2);

    // Same ids in a different order are a different sequence.
    assert_eq!(
        m.set_target_sequence(&[7, 6, 5]),
        TargetUpdate::Replaced { len: 3 }
    );
    assert_eq!(m.cursor(), 0);
}

#[test]
fn different_announcement_always_resets() {
    let start = [1, 2, 3];
    let next: [&[i32]; 4] = [&[1, 2], &[1, 2, 3, 4], &[9], &[]];

    for progress in 0..=start.len() {
        for seq in next {
            let mut m = matcher_with(&start);
            m.observe(&start[..progress]);

            let update = m.set_target_sequence(seq);
            assert_eq!(update, TargetUpdate::Replaced { len: seq.len() });
            assert_eq!(m.cursor(), 0);
        }
    }
}

#[test]
fn only_last_step_is_final() {
    let seq = [4, 8, 15, 16, 23, 42];
    let mut m = matcher_with(&seq);

    let finals: Vec<bool> = seq
        .iter()
        .flat_map(|v| m.observe(&[*v]).matches)
        .map(|e| e.is_final)
        .collect();

    assert_eq!(finals, vec![false, false, false, false, false, true]);
}

#[test]
fn reset_after_completion_rearms_matching() {
    let mut m = matcher_with(&[1]);
    assert!(m.observe(&[1]).final_match().is_some());
    assert!(m.is_complete());

    m.set_target_sequence(&[2, 1]);
    assert!(!m.is_complete());
    assert_eq!(m.expected(), Some(2));
    assert!(m.observe(&[2, 1]).final_match().is_some());
}
