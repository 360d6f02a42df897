use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

use super::{Animation, Frame};
use crate::color::{BLACK, Rgb, wheel};
use crate::surface::PixelSurface;

const DEFAULT_MESSAGE: &str = "HELLO";

/// Longest dot, dash or gap accepted from params, in pixels.
pub const MAX_MORSE_RUN: u32 = 32;
/// Longest scrolling pattern built from one message.
pub const MAX_PATTERN_LEN: usize = 4096;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MorseCodeParams {
    pub message: String,
    /// Pixels scrolled per frame
    pub speed: f32,
    pub dot_length: u32,
    pub dash_length: u32,
    /// Gap between symbols of one letter
    pub symbol_space: u32,
    pub letter_space: u32,
    pub word_space: u32,
}

impl Default for MorseCodeParams {
    fn default() -> Self {
        Self {
            message: String::from(DEFAULT_MESSAGE),
            speed: 0.5,
            dot_length: 2,
            dash_length: 4,
            symbol_space: 2,
            letter_space: 3,
            word_space: 5,
        }
    }
}

/// International Morse code for `c`, or `""` for unsupported characters.
pub const fn morse_code(c: char) -> &'static str {
    match c.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '.' => ".-.-.-",
        ',' => "--..--",
        '?' => "..--..",
        '!' => "-.-.--",
        '-' => "-....-",
        '/' => "-..-.",
        '@' => ".--.-.",
        _ => "",
    }
}

/// Scrolling Morse rendition of a message, each word in its own color.
#[derive(Debug, Clone)]
pub struct MorseCodeAnimation {
    pattern: Vec<Rgb>,
    speed: f32,
    step: u64,
}

impl Default for MorseCodeAnimation {
    fn default() -> Self {
        Self::new(&MorseCodeParams::default())
    }
}

impl MorseCodeAnimation {
    pub fn new(params: &MorseCodeParams) -> Self {
        Self {
            pattern: build_pattern(params),
            speed: params.speed,
            step: 0,
        }
    }

    /// One full repetition of the scrolling pattern.
    pub fn pattern(&self) -> &[Rgb] {
        &self.pattern
    }
}

#[allow(clippy::cast_possible_truncation)]
fn build_pattern(params: &MorseCodeParams) -> Vec<Rgb> {
    let mut words: Vec<&str> = params.message.split(' ').filter(|word| !word.is_empty()).collect();
    if words.is_empty() {
        words.push(DEFAULT_MESSAGE);
    }

    let run = |pattern: &mut Vec<Rgb>, color: Rgb, length: u32| {
        let length = length.min(MAX_MORSE_RUN) as usize;
        let room = MAX_PATTERN_LEN - pattern.len();
        pattern.extend(core::iter::repeat_n(color, length.min(room)));
    };
    let gap = |pattern: &mut Vec<Rgb>, length: u32| run(pattern, BLACK, length);

    let mut pattern = Vec::new();
    let word_count = words.len();
    for (word_index, word) in words.iter().enumerate() {
        let color = wheel(((word_index * 255) / word_count) as u8);
        let letters: Vec<&str> = word.chars().map(morse_code).filter(|code| !code.is_empty()).collect();

        for (letter_index, code) in letters.iter().enumerate() {
            let symbols = code.as_bytes();
            for (symbol_index, &symbol) in symbols.iter().enumerate() {
                let length = if symbol == b'.' {
                    params.dot_length
                } else {
                    params.dash_length
                };
                run(&mut pattern, color, length);
                if symbol_index + 1 < symbols.len() {
                    gap(&mut pattern, params.symbol_space);
                }
            }
            if letter_index + 1 < letters.len() {
                gap(&mut pattern, params.letter_space);
            }
        }

        if word_index + 1 < word_count {
            gap(&mut pattern, params.word_space);
        }
    }

    if pattern.is_empty() {
        pattern.push(Rgb::new(255, 255, 255));
    }
    pattern
}

impl Animation for MorseCodeAnimation {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, _frame: Frame) {
        let period = self.pattern.len();
        let offset = (self.step as f32 * self.speed) as usize % period;
        for index in 0..surface.len() {
            surface.set_pixel(index, self.pattern[(offset + index) % period]);
        }
        self.step = self.step.wrapping_add(1);
    }
}
