// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsi (CP1252) encoding for text drawn with the PDF built-in fonts.

/// Byte used for characters the built-in fonts cannot show.
pub const REPLACEMENT: u8 = b'?';

/// A line of text encoded for a `/WinAnsiEncoding` font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinAnsiText {
    /// One byte per input character.
    pub bytes: Vec<u8>,
    /// Number of characters replaced with [`REPLACEMENT`].
    pub replaced: usize,
}

/// Encode `text` as WinAnsi bytes. Characters outside the encoding become
/// `?`; the returned count says how many.
pub fn encode_win_ansi(text: &str) -> WinAnsiText {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            Some(byte) => bytes.push(byte),
            None => {
                replaced += 1;
                bytes.push(REPLACEMENT);
            }
        }
    }
    WinAnsiText { bytes, replaced }
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        '\u{0000}'..='\u{007F}' | '\u{00A0}'..='\u{00FF}' => ch as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}
