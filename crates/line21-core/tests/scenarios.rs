//! End-to-end decoding scenarios over parity-encoded unit streams.

use line21_core::{BufferSlot, Command, ControlCode, Decoder, Mode, Parser, Snapshot, parity_word};

fn encode_text(text: &str) -> Vec<u16> {
    text.as_bytes()
        .chunks(2)
        .map(|pair| {
            let lo = pair.get(1).copied().unwrap_or(0);
            u16::from_be_bytes([pair[0], lo])
        })
        .collect()
}

fn control(code: ControlCode) -> u16 {
    code.unit()
}

fn run(decoder: &mut Decoder, units: &[u16]) -> Vec<String> {
    let raw: Vec<u16> = units.iter().copied().map(parity_word).collect();
    decoder.feed(&raw)
}

#[test]
fn fresh_decoder_reports_unknown_mode() {
    let d = Decoder::new();
    let snap = d.snapshot();
    assert_eq!(snap.mode, Mode::Unknown);
    assert_eq!(snap.rollup, 0);
    assert_eq!(snap.row, 0);
    assert_eq!(snap.col, 0);
    assert!(snap.content.is_empty());
}

#[test]
fn pop_on_caption_is_presented_on_end_of_caption() {
    let mut d = Decoder::new();
    let mut units = vec![control(ControlCode::ResumeCaptionLoading)];
    units.extend(encode_text("HI"));
    units.push(control(ControlCode::EndOfCaption));

    let captions = run(&mut d, &units);
    assert_eq!(captions, vec!["HI"]);
    assert_eq!(d.to_string(), "HI");
    assert_eq!(d.snapshot().mode, Mode::PopOn);
    assert_eq!(d.active_slot(), Some(BufferSlot::Back));
    assert!(d.back().is_empty());
}

#[test]
fn roll_up_two_shows_previous_and_current_line() {
    let mut d = Decoder::new();
    let mut units = vec![control(ControlCode::RollUp2)];
    units.extend(encode_text("ONE"));
    units.push(control(ControlCode::CarriageReturn));
    units.extend(encode_text("TWO"));

    run(&mut d, &units);
    assert_eq!(d.to_string(), "ONE\nTWO");
    let snap = d.snapshot();
    assert_eq!(snap.mode, Mode::PaintOn);
    assert_eq!(snap.rollup, 2);
    assert_eq!(snap.content, "ONE\nTWO");
}

#[test]
fn text_without_established_mode_is_dropped() {
    let mut d = Decoder::new();
    let captions = run(&mut d, &encode_text("ABCD"));
    assert!(captions.is_empty());
    assert_eq!(d.to_string(), "");
    assert_eq!(d.snapshot(), Snapshot::default());
}

#[test]
fn extended_character_erases_preceding_basic_character() {
    let mut d = Decoder::new();
    let mut units = vec![control(ControlCode::ResumeDirectCaptioning)];
    // 0x1230 is capital A grave, replacing the basic "A" fallback.
    units.extend(encode_text("A"));
    units.push(0x1230);

    run(&mut d, &units);
    assert_eq!(d.to_string(), "\u{C0}");
    assert_eq!(d.cursor().col, 1);
}

#[test]
fn parity_errors_are_silently_skipped() {
    let mut d = Decoder::new();
    let mut raw: Vec<u16> = [control(ControlCode::ResumeDirectCaptioning)]
        .into_iter()
        .chain(encode_text("OKAY"))
        .map(parity_word)
        .collect();
    // Corrupt the "OK" pair.
    raw[1] ^= 0x8000;

    d.feed(&raw);
    assert_eq!(d.to_string(), "AY");
}

#[test]
fn repeated_end_of_caption_swaps_only_once() {
    let mut d = Decoder::new();
    let eoc = control(ControlCode::EndOfCaption);
    let rcl = control(ControlCode::ResumeCaptionLoading);
    let mut units = vec![rcl, rcl];
    units.extend(encode_text("FIRST"));
    units.extend([eoc, eoc]);

    let captions = run(&mut d, &units);
    assert_eq!(captions, vec!["FIRST"]);
    // A second swap would have brought the empty buffer forward.
    assert_eq!(d.to_string(), "FIRST");
}

#[test]
fn erase_displayed_memory_presents_blank_screen() {
    let mut d = Decoder::new();
    let mut units = vec![control(ControlCode::RollUp3)];
    units.extend(encode_text("GONE"));
    units.push(control(ControlCode::EraseDisplayedMemory));

    let captions = run(&mut d, &units);
    assert_eq!(captions.last().map(String::as_str), Some(""));
    assert_eq!(d.to_string(), "");
    // The mode survives the erase.
    assert_eq!(d.snapshot().mode, Mode::PaintOn);
}

#[test]
fn mode_switch_from_roll_up_to_pop_on() {
    let mut d = Decoder::new();
    let mut units = vec![control(ControlCode::RollUp2)];
    units.extend(encode_text("LIVE"));
    units.push(control(ControlCode::ResumeCaptionLoading));
    units.extend(encode_text("STAGED"));

    run(&mut d, &units);
    assert_eq!(d.to_string(), "LIVE");
    assert_eq!(d.back().to_string(), "STAGED");

    run(&mut d, &[control(ControlCode::EndOfCaption)]);
    assert_eq!(d.to_string(), "STAGED");
    assert_eq!(d.snapshot().mode, Mode::PopOn);
}

#[test]
fn parser_reset_at_splice_accepts_repeated_control() {
    let mut parser = Parser::new();
    let mut d = Decoder::new();
    let eoc = control(ControlCode::EndOfCaption);
    let mut units = vec![control(ControlCode::ResumeCaptionLoading)];
    units.extend(encode_text("HI"));
    units.push(eoc);
    for unit in units {
        if let Some(command) = parser.advance(parity_word(unit)) {
            d.apply(command);
        }
    }
    assert_eq!(d.to_string(), "HI");
    assert_eq!(parser.last_unit(), eoc);

    // Without a reset the next source's EOC reads as the second half of a pair.
    assert_eq!(parser.clone().advance(parity_word(eoc)), None);

    parser.reset();
    assert_eq!(parser.last_unit(), 0);
    let command = parser.advance(parity_word(eoc));
    assert_eq!(command, Some(Command::Control(ControlCode::EndOfCaption)));
    if let Some(command) = command {
        assert!(d.apply(command).ready);
    }
    assert_eq!(d.to_string(), "");
}
