//! Controller autodetection from ROM bytes.
//!
//! The console has no way to report which controller a cartridge expects,
//! but game code betrays it: reading a port's fire-button line, scanning
//! both keypad columns, or walking a mouse/trackball movement table each
//! leave short, recognizable 6502 instruction sequences in the ROM image.
//! [`detect`] runs an ordered cascade of substring searches for those
//! sequences and returns the first matching kind.
//!
//! The cascade order *is* the tie-break policy: a ROM matching several
//! signatures resolves to whichever check runs first, and anything
//! matching nothing falls through to a plain joystick. The heuristic is
//! deliberately best-effort; do not reorder the checks without evidence
//! from real cartridges.

use crate::mode::Jack;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical controller families a cartridge may expect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    #[default]
    Joystick,
    Paddles,
    Keypad,
    Genesis,
    TrakBall,
    AtariMouse,
    AmigaMouse,
    SaveKey,
    // selectable but not autodetected
    BoosterGrip,
    Driving,
    CompuMate,
    AtariVox,
}

impl ControllerKind {
    pub fn name(self) -> &'static str {
        match self {
            ControllerKind::Joystick => "Joystick",
            ControllerKind::Paddles => "Paddles",
            ControllerKind::Keypad => "Keypad",
            ControllerKind::Genesis => "Sega Genesis",
            ControllerKind::TrakBall => "TrakBall",
            ControllerKind::AtariMouse => "Atari Mouse",
            ControllerKind::AmigaMouse => "Amiga Mouse",
            ControllerKind::SaveKey => "SaveKey",
            ControllerKind::BoosterGrip => "BoosterGrip",
            ControllerKind::Driving => "Driving",
            ControllerKind::CompuMate => "CompuMate",
            ControllerKind::AtariVox => "AtariVox",
        }
    }

    /// Case-insensitive parse of a configured controller name; `auto`
    /// and anything unrecognized yield `None` (= autodetect).
    pub fn from_name(name: &str) -> Option<ControllerKind> {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "joystick" => Some(ControllerKind::Joystick),
            "paddles" => Some(ControllerKind::Paddles),
            "keypad" | "keyboard" => Some(ControllerKind::Keypad),
            "genesis" | "sega genesis" => Some(ControllerKind::Genesis),
            "trakball" => Some(ControllerKind::TrakBall),
            "atarimouse" | "atari mouse" => Some(ControllerKind::AtariMouse),
            "amigamouse" | "amiga mouse" => Some(ControllerKind::AmigaMouse),
            "savekey" => Some(ControllerKind::SaveKey),
            "boostergrip" => Some(ControllerKind::BoosterGrip),
            "driving" => Some(ControllerKind::Driving),
            "compumate" => Some(ControllerKind::CompuMate),
            "atarivox" => Some(ControllerKind::AtariVox),
            _ => None,
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Autodetect the controller a ROM expects on the given jack.
///
/// Pure function of the image bytes; always returns a value, defaulting
/// to [`ControllerKind::Joystick`] when nothing matches.
pub fn detect(image: &[u8], jack: Jack) -> ControllerKind {
    if probably_save_key(image, jack) {
        ControllerKind::SaveKey
    } else if uses_joystick_button(image, jack) {
        if probably_trak_ball(image) {
            ControllerKind::TrakBall
        } else if probably_atari_mouse(image) {
            ControllerKind::AtariMouse
        } else if probably_amiga_mouse(image) {
            ControllerKind::AmigaMouse
        } else if uses_keypad(image, jack) {
            ControllerKind::Keypad
        } else if uses_genesis_button(image, jack) {
            ControllerKind::Genesis
        } else {
            ControllerKind::Joystick
        }
    } else if uses_paddle(image, jack) {
        ControllerKind::Paddles
    } else {
        ControllerKind::Joystick
    }
}

/// Resolve the effective controller kind for a jack, honoring an
/// explicit user override. The override wins; autodetection still runs
/// and a disagreement is logged so misconfigured setups are visible.
pub fn resolve_controller(
    image: &[u8],
    jack: Jack,
    selected: Option<ControllerKind>,
) -> ControllerKind {
    let detected = detect(image, jack);
    match selected {
        None => detected,
        Some(kind) => {
            if kind != detected {
                warn!(
                    "controller autodetection disagrees on {:?} jack: selected {}, detected {}",
                    jack, kind, detected
                );
            }
            kind
        }
    }
}

/// Linear byte-for-byte substring search; a single hit suffices.
fn search(image: &[u8], signature: &[u8]) -> bool {
    !signature.is_empty() && image.windows(signature.len()).any(|w| w == signature)
}

fn search_any(image: &[u8], signatures: &[&[u8]]) -> bool {
    signatures.iter().any(|sig| search(image, sig))
}

// Fire-button line reads (INPT4 for the left jack, INPT5/indexed INPT4
// for the right). A ROM that never touches these lines is not driving a
// button-bearing stick on that jack.
const LEFT_BUTTON_SIGS: &[&[u8]] = &[
    &[0x24, 0x0c, 0x10], // bit INPT4; bpl
    &[0x24, 0x0c, 0x30], // bit INPT4; bmi
    &[0xa5, 0x0c, 0x10], // lda INPT4; bpl
    &[0xa5, 0x0c, 0x30], // lda INPT4; bmi
    &[0xb5, 0x0c, 0x10], // lda INPT4,x; bpl
    &[0xb5, 0x0c, 0x30], // lda INPT4,x; bmi
    &[0x24, 0x3c, 0x10], // bit INPT4|$30; bpl
    &[0x24, 0x3c, 0x30], // bit INPT4|$30; bmi
    &[0xa5, 0x3c, 0x10], // lda INPT4|$30; bpl
    &[0xa5, 0x3c, 0x30], // lda INPT4|$30; bmi
    &[0xb5, 0x3c, 0x10], // lda INPT4|$30,x; bpl
    &[0xb5, 0x3c, 0x30], // lda INPT4|$30,x; bmi
    &[0xb4, 0x0c, 0x30], // ldy INPT4|$30,x; bmi
    &[0xa5, 0x3c, 0x2a], // ldy INPT4|$30; rol
    &[0xa6, 0x3c, 0x8e], // ldx INPT4|$30; stx
    &[0xa4, 0x3c, 0x8c], // ldy INPT4; sty
    &[0xa5, 0x0c, 0x8d], // lda INPT4; sta
    &[0xa4, 0x0c, 0x30], // ldy INPT4; bmi
    &[0xa4, 0x3c, 0x30], // ldy INPT4|$30; bmi
    &[0xa5, 0x0c, 0x25], // lda INPT4; and
    &[0xa6, 0x3c, 0x30], // ldx INPT4|$30; bmi
    &[0xa6, 0x0c, 0x30], // ldx INPT4; bmi
    &[0xa5, 0x0c, 0x0a], // lda INPT4; asl
    &[0xb9, 0x0c, 0x00, 0x10], // lda INPT4,y; bpl
    &[0xb9, 0x0c, 0x00, 0x30], // lda INPT4,y; bmi
    &[0xb9, 0x3c, 0x00, 0x10], // lda INPT4|$30,y; bpl
    &[0xb9, 0x3c, 0x00, 0x30], // lda INPT4|$30,y; bmi
    &[0xa5, 0x0c, 0x0a, 0xb0], // lda INPT4; asl; bcs
    &[0xb5, 0x0c, 0x29, 0x80], // lda INPT4,x; and #$80
    &[0xb5, 0x3c, 0x29, 0x80], // lda INPT4|$30,x; and #$80
    &[0xa5, 0x0c, 0x29, 0x80], // lda INPT4; and #$80
    &[0xa5, 0x3c, 0x29, 0x80], // lda INPT4|$30; and #$80
    &[0xa5, 0x0c, 0x25, 0x0d, 0x10], // lda INPT4; and INPT5; bpl
    &[0xa5, 0x0c, 0x25, 0x0d, 0x30], // lda INPT4; and INPT5; bmi
    &[0xa5, 0x3c, 0x25, 0x3d, 0x10], // lda INPT4|$30; and INPT5|$30; bpl
    &[0xa5, 0x3c, 0x25, 0x3d, 0x30], // lda INPT4|$30; and INPT5|$30; bmi
    &[0xb5, 0x38, 0x29, 0x80, 0xd0], // lda INPT0|$30,y; and #$80; bne
    &[0xa9, 0x80, 0x24, 0x0c, 0xd0], // lda #$80; bit INPT4; bne
    &[0xa5, 0x0c, 0x29, 0x80, 0xd0], // lda INPT4; and #$80; bne
    &[0xa5, 0x3c, 0x29, 0x80, 0xd0], // lda INPT4|$30; and #$80; bne
    &[0xad, 0x0c, 0x00, 0x29, 0x80], // lda.w INPT4|$30; and #$80
];

const RIGHT_BUTTON_SIGS: &[&[u8]] = &[
    &[0x24, 0x0d, 0x10], // bit INPT5; bpl
    &[0x24, 0x0d, 0x30], // bit INPT5; bmi
    &[0xa5, 0x0d, 0x10], // lda INPT5; bpl
    &[0xa5, 0x0d, 0x30], // lda INPT5; bmi
    &[0xb5, 0x0c, 0x10], // lda INPT4,x; bpl
    &[0xb5, 0x0c, 0x30], // lda INPT4,x; bmi
    &[0x24, 0x3d, 0x10], // bit INPT5|$30; bpl
    &[0x24, 0x3d, 0x30], // bit INPT5|$30; bmi
    &[0xa5, 0x3d, 0x10], // lda INPT5|$30; bpl
    &[0xa5, 0x3d, 0x30], // lda INPT5|$30; bmi
    &[0xb5, 0x3c, 0x10], // lda INPT4|$30,x; bpl
    &[0xb5, 0x3c, 0x30], // lda INPT4|$30,x; bmi
    &[0xa4, 0x3d, 0x30], // ldy INPT5; bmi
    &[0xa5, 0x0d, 0x25], // lda INPT5; and
    &[0xa6, 0x3d, 0x30], // ldx INPT5|$30; bmi
    &[0xa6, 0x0d, 0x30], // ldx INPT5; bmi
    &[0xb9, 0x0c, 0x00, 0x10], // lda INPT4,y; bpl
    &[0xb9, 0x0c, 0x00, 0x30], // lda INPT4,y; bmi
    &[0xb9, 0x3c, 0x00, 0x10], // lda INPT4|$30,y; bpl
    &[0xb9, 0x3c, 0x00, 0x30], // lda INPT4|$30,y; bmi
    &[0xb5, 0x0c, 0x29, 0x80], // lda INPT4,x; and #$80
    &[0xb5, 0x3c, 0x29, 0x80], // lda INPT4|$30,x; and #$80
    &[0xa5, 0x3d, 0x29, 0x80], // lda INPT5|$30; and #$80
    &[0xb5, 0x38, 0x29, 0x80, 0xd0], // lda INPT0|$30,y; and #$80; bne
    &[0xa9, 0x80, 0x24, 0x0d, 0xd0], // lda #$80; bit INPT5; bne
    &[0xad, 0x0d, 0x00, 0x29, 0x80], // lda.w INPT5|$30; and #$80
];

fn uses_joystick_button(image: &[u8], jack: Jack) -> bool {
    match jack {
        Jack::Left => search_any(image, LEFT_BUTTON_SIGS),
        Jack::Right => search_any(image, RIGHT_BUTTON_SIGS),
    }
}

// Keypad controllers scan two input lines per jack; both must be read
// for the check to pass, so plain one-button sticks don't false-match.
const LEFT_KEYPAD_COL0_SIGS: &[&[u8]] = &[
    &[0x24, 0x38, 0x30], // bit INPT0|$30; bmi
    &[0xa5, 0x38, 0x10], // lda INPT0|$30; bpl
    &[0xa4, 0x38, 0x30], // ldy INPT0|$30; bmi
    &[0xb5, 0x38, 0x30], // lda INPT0|$30,x; bmi
    &[0x24, 0x08, 0x30], // bit INPT0; bmi
    &[0xa6, 0x08, 0x30], // ldx INPT0; bmi
    &[0xb5, 0x38, 0x29, 0x80, 0xd0], // lda INPT0,x; and #$80; bne
];

const LEFT_KEYPAD_COL1_SIGS: &[&[u8]] = &[
    &[0x24, 0x39, 0x10], // bit INPT1|$30; bpl
    &[0x24, 0x39, 0x30], // bit INPT1|$30; bmi
    &[0xa5, 0x39, 0x10], // lda INPT1|$30; bpl
    &[0xa4, 0x39, 0x30], // ldy INPT1|$30; bmi
    &[0xb5, 0x38, 0x30], // lda INPT0|$30,x; bmi
    &[0x24, 0x09, 0x30], // bit INPT1; bmi
    &[0xa6, 0x09, 0x30], // ldx INPT1; bmi
    &[0xb5, 0x38, 0x29, 0x80, 0xd0], // lda INPT0,x; and #$80; bne
];

const RIGHT_KEYPAD_COL0_SIGS: &[&[u8]] = &[
    &[0x24, 0x3a, 0x30], // bit INPT2|$30; bmi
    &[0xa5, 0x3a, 0x10], // lda INPT2|$30; bpl
    &[0xa4, 0x3a, 0x30], // ldy INPT2|$30; bmi
    &[0x24, 0x0a, 0x30], // bit INPT2; bmi
    &[0xa6, 0x0a, 0x30], // ldx INPT2; bmi
    &[0xb5, 0x38, 0x29, 0x80, 0xd0], // lda INPT2,x; and #$80; bne
];

const RIGHT_KEYPAD_COL1_SIGS: &[&[u8]] = &[
    &[0x24, 0x3b, 0x30], // bit INPT3|$30; bmi
    &[0xa5, 0x3b, 0x10], // lda INPT3|$30; bpl
    &[0xa4, 0x3b, 0x30], // ldy INPT3|$30; bmi
    &[0x24, 0x0b, 0x30], // bit INPT3; bmi
    &[0xa6, 0x0b, 0x30], // ldx INPT3; bmi
    &[0xb5, 0x38, 0x29, 0x80, 0xd0], // lda INPT2,x; and #$80; bne
];

fn uses_keypad(image: &[u8], jack: Jack) -> bool {
    match jack {
        Jack::Left => {
            search_any(image, LEFT_KEYPAD_COL0_SIGS)
                && search_any(image, LEFT_KEYPAD_COL1_SIGS)
        }
        Jack::Right => {
            search_any(image, RIGHT_KEYPAD_COL0_SIGS)
                && search_any(image, RIGHT_KEYPAD_COL1_SIGS)
        }
    }
}

// Genesis-style pads expose a second button on the paddle input line
// (INPT1 left, INPT3 right).
const LEFT_GENESIS_SIGS: &[&[u8]] = &[
    &[0x24, 0x09, 0x10], // bit INPT1; bpl
    &[0x24, 0x09, 0x30], // bit INPT1; bmi
    &[0xa5, 0x09, 0x10], // lda INPT1; bpl
    &[0xa5, 0x09, 0x30], // lda INPT1; bmi
    &[0xa4, 0x09, 0x30], // ldy INPT1; bmi
    &[0xa6, 0x09, 0x30], // ldx INPT1; bmi
    &[0x24, 0x39, 0x10], // bit INPT1|$30; bpl
    &[0x24, 0x39, 0x30], // bit INPT1|$30; bmi
    &[0xa5, 0x39, 0x10], // lda INPT1|$30; bpl
    &[0xa5, 0x39, 0x30], // lda INPT1|$30; bmi
    &[0xa4, 0x39, 0x30], // ldy INPT1|$30; bmi
    &[0xa5, 0x39, 0x6a], // lda INPT1|$30; ror
    &[0xa6, 0x39, 0x8e], // ldx INPT1|$30; stx
    &[0xa4, 0x39, 0x8c], // ldy INPT1|$30; sty
    &[0xa5, 0x09, 0x8d], // lda INPT1; sta
    &[0xa5, 0x09, 0x29], // lda INPT1; and
    &[0x25, 0x39, 0x30], // and INPT1|$30; bmi
    &[0x25, 0x09, 0x10], // and INPT1; bpl
];

const RIGHT_GENESIS_SIGS: &[&[u8]] = &[
    &[0x24, 0x0b, 0x10], // bit INPT3; bpl
    &[0x24, 0x0b, 0x30], // bit INPT3; bmi
    &[0xa5, 0x0b, 0x10], // lda INPT3; bpl
    &[0xa5, 0x0b, 0x30], // lda INPT3; bmi
    &[0x24, 0x3b, 0x10], // bit INPT3|$30; bpl
    &[0x24, 0x3b, 0x30], // bit INPT3|$30; bmi
    &[0xa5, 0x3b, 0x10], // lda INPT3|$30; bpl
    &[0xa5, 0x3b, 0x30], // lda INPT3|$30; bmi
    &[0xa6, 0x3b, 0x8e], // ldx INPT3|$30; stx
    &[0x25, 0x0b, 0x10], // and INPT3; bpl
];

fn uses_genesis_button(image: &[u8], jack: Jack) -> bool {
    match jack {
        Jack::Left => search_any(image, LEFT_GENESIS_SIGS),
        Jack::Right => search_any(image, RIGHT_GENESIS_SIGS),
    }
}

// Paddle position reads (INPT0/INPT2). Only sequences that joystick
// games are not known to emit are listed; ambiguous ones were culled.
const LEFT_PADDLE_SIGS: &[&[u8]] = &[
    &[0xa5, 0x08, 0x10], // lda INPT0; bpl
    &[0xa5, 0x08, 0x30], // lda INPT0; bmi
    &[0xb5, 0x08, 0x30], // lda INPT0,x; bmi
    &[0x24, 0x38, 0x10], // bit INPT0|$30; bpl
    &[0x24, 0x38, 0x30], // bit INPT0|$30; bmi
    &[0xa5, 0x38, 0x10], // lda INPT0|$30; bpl
    &[0xa5, 0x38, 0x30], // lda INPT0|$30; bmi
    &[0xb5, 0x38, 0x10], // lda INPT0|$30,x; bpl
    &[0xb5, 0x38, 0x30], // lda INPT0|$30,x; bmi
    &[0x68, 0x48, 0x10], // pla; pha; bpl
    &[0xa5, 0x08, 0x4c], // lda INPT0; jmp
    &[0xa4, 0x38, 0x30], // ldy INPT0; bmi
    &[0xb9, 0x08, 0x00, 0x30], // lda INPT0,y; bmi
    &[0xb9, 0x38, 0x00, 0x30], // lda INPT0|$30,y; bmi
    &[0x24, 0x08, 0x30, 0x02], // bit INPT0; bmi +2
    &[0xb5, 0x38, 0x29, 0x80, 0xd0], // lda INPT0|$30,x; and #$80; bne
    &[0x24, 0x38, 0x85, 0x08, 0x10], // bit INPT0|$30; sta COLUPF; bpl
    &[0xb5, 0x38, 0x49, 0xff, 0x0a], // lda INPT0|$30,x; eor #$ff; asl
    &[0xb1, 0xf2, 0x30, 0x02, 0xe6], // lda ($f2),y; bmi; inc
];

const RIGHT_PADDLE_SIGS: &[&[u8]] = &[
    &[0x24, 0x0a, 0x10], // bit INPT2; bpl
    &[0x24, 0x0a, 0x30], // bit INPT2; bmi
    &[0xa5, 0x0a, 0x10], // lda INPT2; bpl
    &[0xa5, 0x0a, 0x30], // lda INPT2; bmi
    &[0xb5, 0x0a, 0x10], // lda INPT2,x; bpl
    &[0xb5, 0x0a, 0x30], // lda INPT2,x; bmi
    &[0xb5, 0x08, 0x10], // lda INPT0,x; bpl
    &[0xb5, 0x08, 0x30], // lda INPT0,x; bmi
    &[0x24, 0x3a, 0x10], // bit INPT2|$30; bpl
    &[0x24, 0x3a, 0x30], // bit INPT2|$30; bmi
    &[0xa5, 0x3a, 0x10], // lda INPT2|$30; bpl
    &[0xa5, 0x3a, 0x30], // lda INPT2|$30; bmi
    &[0xb5, 0x3a, 0x10], // lda INPT2|$30,x; bpl
    &[0xb5, 0x3a, 0x30], // lda INPT2|$30,x; bmi
    &[0xb5, 0x38, 0x10], // lda INPT0|$30,x; bpl
    &[0xb5, 0x38, 0x30], // lda INPT0|$30,x; bmi
    &[0xa4, 0x3a, 0x30], // ldy INPT2|$30; bmi
    &[0xa5, 0x3b, 0x30], // lda INPT3|$30; bmi (ports swapped)
    &[0xb9, 0x38, 0x00, 0x30], // lda INPT0|$30,y; bmi
    &[0xb5, 0x38, 0x29, 0x80, 0xd0], // lda INPT0|$30,x; and #$80; bne
    &[0x24, 0x38, 0x85, 0x08, 0x10], // bit INPT2|$30; sta COLUPF; bpl
    &[0xb5, 0x38, 0x49, 0xff, 0x0a], // lda INPT0|$30,x; eor #$ff; asl
];

fn uses_paddle(image: &[u8], jack: Jack) -> bool {
    match jack {
        Jack::Left => search_any(image, LEFT_PADDLE_SIGS),
        Jack::Right => search_any(image, RIGHT_PADDLE_SIGS),
    }
}

// Quadrature movement tables unique to each rotary device.
const TRAK_BALL_SIGS: &[&[u8]] = &[
    &[0b1010, 0b1000, 0b1000, 0b1010, 0b0010, 0b0000],
    &[0x00, 0x07, 0x87, 0x07, 0x88, 0x01],
    &[0x00, 0x01, 0x81, 0x01, 0x82, 0x03],
];

const ATARI_MOUSE_SIGS: &[&[u8]] = &[
    &[0b0101, 0b0111, 0b0100, 0b0110, 0b1101, 0b1111],
    &[0x00, 0x87, 0x07, 0x00, 0x08, 0x81],
    &[0x00, 0x81, 0x01, 0x00, 0x02, 0x83],
];

const AMIGA_MOUSE_SIGS: &[&[u8]] = &[
    &[0b1100, 0b1000, 0b0100, 0b0000, 0b1101, 0b1001],
    &[0x00, 0x88, 0x07, 0x01, 0x08, 0x00],
    &[0x00, 0x82, 0x01, 0x03, 0x02, 0x00],
    &[0b100, 0b000, 0b000, 0b000, 0b101, 0b001],
];

fn probably_trak_ball(image: &[u8]) -> bool {
    search_any(image, TRAK_BALL_SIGS)
}

fn probably_atari_mouse(image: &[u8]) -> bool {
    search_any(image, ATARI_MOUSE_SIGS)
}

fn probably_amiga_mouse(image: &[u8]) -> bool {
    search_any(image, AMIGA_MOUSE_SIGS)
}

// I2C start sequences of the SaveKey EEPROM driver; the device only
// ever sits in the right jack.
const SAVE_KEY_SIGS: &[&[u8]] = &[
    &[0xa9, 0x08, 0x8d, 0x80, 0x02, 0xa9, 0x0c, 0x8d, 0x81],
    &[0xa9, 0x18, 0x8d, 0x80, 0x02, 0x4a, 0x8d, 0x81, 0x02],
    &[0xa2, 0x08, 0x8e, 0x80, 0x02, 0xa2, 0x0c, 0x8e, 0x81],
    &[0xa9, 0x08, 0x8d, 0x80, 0x02, 0xea, 0xa9, 0x0c, 0x8d],
];

fn probably_save_key(image: &[u8], jack: Jack) -> bool {
    jack == Jack::Right && search_any(image, SAVE_KEY_SIGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom_with(sigs: &[&[u8]]) -> Vec<u8> {
        let mut rom = vec![0xeau8; 64]; // nop padding
        for sig in sigs {
            rom.extend_from_slice(sig);
            rom.extend_from_slice(&[0xea; 16]);
        }
        rom
    }

    #[test]
    fn empty_rom_defaults_to_joystick() {
        assert_eq!(detect(&[], Jack::Left), ControllerKind::Joystick);
        assert_eq!(detect(&[0u8; 4096], Jack::Right), ControllerKind::Joystick);
    }

    #[test]
    fn button_line_access_detects_joystick() {
        let rom = rom_with(&[&[0xa5, 0x0c, 0x10]]); // lda INPT4; bpl
        assert_eq!(detect(&rom, Jack::Left), ControllerKind::Joystick);
        // same bytes don't imply a right-jack button read
        assert_eq!(detect(&rom, Jack::Right), ControllerKind::Joystick);
    }

    #[test]
    fn paddle_access_without_button_line_detects_paddles() {
        let rom = rom_with(&[&[0xa5, 0x08, 0x10]]); // lda INPT0; bpl
        assert_eq!(detect(&rom, Jack::Left), ControllerKind::Paddles);
    }

    #[test]
    fn keypad_requires_both_columns() {
        let one_col = rom_with(&[&[0xa5, 0x0c, 0x10], &[0x24, 0x08, 0x30]]);
        assert_ne!(detect(&one_col, Jack::Left), ControllerKind::Keypad);

        let both = rom_with(&[
            &[0xa5, 0x0c, 0x10], // button line
            &[0x24, 0x08, 0x30], // column 0
            &[0x24, 0x09, 0x30], // column 1
        ]);
        assert_eq!(detect(&both, Jack::Left), ControllerKind::Keypad);
    }

    #[test]
    fn genesis_needs_button_line_plus_second_button() {
        let rom = rom_with(&[&[0xa5, 0x0c, 0x10], &[0xa5, 0x09, 0x8d]]);
        assert_eq!(detect(&rom, Jack::Left), ControllerKind::Genesis);
    }

    #[test]
    fn trak_ball_outranks_keypad_and_genesis() {
        let rom = rom_with(&[
            &[0xa5, 0x0c, 0x10],
            &[0x00, 0x07, 0x87, 0x07, 0x88, 0x01],
            &[0xa5, 0x09, 0x8d],
        ]);
        assert_eq!(detect(&rom, Jack::Left), ControllerKind::TrakBall);
    }

    #[test]
    fn save_key_outranks_paddles_on_right_jack() {
        let rom = rom_with(&[
            SAVE_KEY_SIGS[0],
            &[0xa5, 0x0a, 0x10], // paddle read on right jack
        ]);
        assert_eq!(detect(&rom, Jack::Right), ControllerKind::SaveKey);
        // the left jack never hosts a SaveKey
        assert_ne!(detect(&rom, Jack::Left), ControllerKind::SaveKey);
    }

    #[test]
    fn detection_is_deterministic() {
        let rom = rom_with(&[&[0xa5, 0x0c, 0x10], &[0xa5, 0x09, 0x29]]);
        let first = detect(&rom, Jack::Left);
        for _ in 0..10 {
            assert_eq!(detect(&rom, Jack::Left), first);
        }
    }

    #[test]
    fn signature_at_image_tail_still_matches() {
        let mut rom = vec![0u8; 32];
        rom.extend_from_slice(&[0xa5, 0x08, 0x10]);
        assert_eq!(detect(&rom, Jack::Left), ControllerKind::Paddles);
    }

    #[test]
    fn override_wins_but_detection_still_runs() {
        let rom = rom_with(&[&[0xa5, 0x08, 0x10]]);
        let kind = resolve_controller(&rom, Jack::Left, Some(ControllerKind::Driving));
        assert_eq!(kind, ControllerKind::Driving);
        assert_eq!(resolve_controller(&rom, Jack::Left, None), ControllerKind::Paddles);
    }

    #[test]
    fn controller_names_round_trip() {
        for kind in [
            ControllerKind::Joystick,
            ControllerKind::Paddles,
            ControllerKind::Keypad,
            ControllerKind::Genesis,
            ControllerKind::TrakBall,
            ControllerKind::AtariMouse,
            ControllerKind::AmigaMouse,
            ControllerKind::SaveKey,
            ControllerKind::BoosterGrip,
            ControllerKind::Driving,
            ControllerKind::CompuMate,
            ControllerKind::AtariVox,
        ] {
            assert_eq!(ControllerKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ControllerKind::from_name("AUTO"), None);
    }
}
