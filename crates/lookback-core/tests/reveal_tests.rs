// Host-side tests for the one-shot text reveal.

use lookback_core::*;

fn trail(kind: RevealKind, text: &str) -> TextReveal {
    TextReveal::new(
        text,
        RevealOptions {
            kind,
            delay_ms: 100.0,
            duration_ms: 600.0,
            stagger_ms: 40.0,
            trigger: RevealTrigger::OnView,
        },
    )
}

#[test]
fn letters_keep_every_char() {
    let units = split_units("HOW FAR", RevealKind::LetterByLetter);
    assert_eq!(units, vec!["H", "O", "W", " ", "F", "A", "R"]);
}

#[test]
fn words_keep_trailing_spaces_except_last() {
    let units = split_units("how far back", RevealKind::WordByWord);
    assert_eq!(units, vec!["how ", "far ", "back"]);
    assert_eq!(units.concat(), "how far back");
}

#[test]
fn block_kinds_are_one_unit() {
    assert_eq!(split_units("a b c", RevealKind::FadeUp).len(), 1);
    assert_eq!(split_units("a b c", RevealKind::ScaleIn).len(), 1);
}

#[test]
fn untriggered_reveal_holds_the_from_state() {
    let r = trail(RevealKind::WordByWord, "one two");
    let s = r.unit_style(0, 10_000.0);
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.offset_y, constants::TRAIL_OFFSET_PX);
    assert!(!r.is_settled(10_000.0));
}

#[test]
fn trigger_is_one_shot() {
    let mut r = trail(RevealKind::LetterByLetter, "abc");
    assert!(r.trigger(1_000.0));
    assert!(!r.trigger(5_000.0));
    // timing still measured from the first trigger
    assert!(r.is_settled(1_000.0 + r.total_ms()));
}

#[test]
fn units_start_in_index_order() {
    let mut r = trail(RevealKind::LetterByLetter, "abcdef");
    r.trigger(0.0);
    for i in 1..r.units().len() {
        assert!(r.unit_start_ms(i) > r.unit_start_ms(i - 1));
    }
    // midway through, earlier letters are further along
    let now = 100.0 + 120.0;
    let opacities: Vec<f32> = (0..6).map(|i| r.unit_style(i, now).opacity).collect();
    assert!(opacities.windows(2).all(|w| w[0] >= w[1]), "{opacities:?}");
    assert!(opacities[0] > 0.0);
    assert_eq!(opacities[5], 0.0);
}

#[test]
fn trail_finishes_after_last_unit_runs_half_duration() {
    let mut r = trail(RevealKind::WordByWord, "a b c d");
    r.trigger(0.0);
    // delay + 3 * stagger + duration / 2
    assert_eq!(r.total_ms(), 100.0 + 3.0 * 40.0 + 300.0);
    assert!(!r.is_settled(r.total_ms() - 1.0));
    assert!(r.is_settled(r.total_ms()));
    for i in 0..4 {
        assert_eq!(r.unit_style(i, r.total_ms()), UnitStyle::SETTLED);
    }
}

#[test]
fn scale_in_grows_from_eighty_percent() {
    let mut r = TextReveal::new(
        "Chandra",
        RevealOptions {
            kind: RevealKind::ScaleIn,
            ..RevealOptions::default()
        },
    );
    assert_eq!(r.unit_style(0, 0.0).scale, constants::SCALE_IN_FROM);
    r.trigger(0.0);
    let mid = r.unit_style(0, 300.0).scale;
    assert!(mid > constants::SCALE_IN_FROM && mid < 1.0);
    assert_eq!(r.unit_style(0, 600.0).scale, 1.0);
}

#[test]
fn options_from_attributes() {
    let o = RevealOptions::from_attributes(Some("letters"), Some("200"), Some("900ms"), Some("immediate"));
    assert_eq!(o.kind, RevealKind::LetterByLetter);
    assert_eq!(o.delay_ms, 200.0);
    assert_eq!(o.duration_ms, 900.0);
    assert_eq!(o.trigger, RevealTrigger::Immediate);

    let o = RevealOptions::from_attributes(Some("wobble"), Some("x"), None, Some("view"));
    assert_eq!(o, RevealOptions::default());
}
