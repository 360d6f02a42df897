//! Animation system with a closed set of variants
//!
//! Every animation is stored in [`AnimationSlot`] so switching animations is
//! a plain value replacement. Each variant implements [`Animation`] and keeps
//! all of its per-frame state inside the instance.

mod chaos;
mod color_ranges;
mod color_run;
mod fade;
mod fire;
mod jump;
mod mandelbrot;
mod morse_code;
mod rainbow;
mod solid;
mod starlight;
mod stroboscope;
mod theater_chase;
mod two_color_blend;
mod wave;

use embassy_time::Instant;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use chaos::{ChaosAnimation, ChaosParams};
pub use color_ranges::{ColorRangesAnimation, ColorRangesParams};
pub use color_run::ColorRunAnimation;
pub use fire::{FireAnimation, FireParams, MAX_START_OFFSET};
pub use jump::{Ball, JumpAnimation};
pub use mandelbrot::{MAX_ITERATIONS, MandelbrotAnimation, MandelbrotParams};
pub use morse_code::{
    MAX_MORSE_RUN, MAX_PATTERN_LEN, MorseCodeAnimation, MorseCodeParams, morse_code,
};
pub use rainbow::RainbowAnimation;
pub use solid::{SolidAnimation, SolidParams};
pub use starlight::{MAX_STAR_PHASE_MS, StarlightAnimation, StarlightParams};
pub use stroboscope::{StroboscopeAnimation, StroboscopeParams};
pub use theater_chase::{TheaterChaseAnimation, TheaterChaseParams};
pub use two_color_blend::{TwoColorBlendAnimation, TwoColorBlendParams};
pub use wave::{WaveAnimation, WaveParams};

use crate::error::ShowError;
use crate::log::show_log;
use crate::surface::PixelSurface;

const ANIMATION_NAME_SOLID: &str = "Solid";
const ANIMATION_NAME_COLOR_RANGES: &str = "ColorRanges";
const ANIMATION_NAME_TWO_COLOR_BLEND: &str = "TwoColorBlend";
const ANIMATION_NAME_STARLIGHT: &str = "Starlight";
const ANIMATION_NAME_STROBOSCOPE: &str = "Stroboscope";
const ANIMATION_NAME_COLOR_RUN: &str = "ColorRun";
const ANIMATION_NAME_JUMP: &str = "Jump";
const ANIMATION_NAME_RAINBOW: &str = "Rainbow";
const ANIMATION_NAME_WAVE: &str = "Wave";
const ANIMATION_NAME_THEATER_CHASE: &str = "TheaterChase";
const ANIMATION_NAME_MORSE_CODE: &str = "MorseCode";
const ANIMATION_NAME_CHAOS: &str = "Chaos";
const ANIMATION_NAME_MANDELBROT: &str = "Mandelbrot";
const ANIMATION_NAME_FIRE: &str = "Fire";

const ANIMATION_ID_SOLID: u8 = 0;
const ANIMATION_ID_COLOR_RANGES: u8 = 1;
const ANIMATION_ID_TWO_COLOR_BLEND: u8 = 2;
const ANIMATION_ID_STARLIGHT: u8 = 3;
const ANIMATION_ID_STROBOSCOPE: u8 = 4;
const ANIMATION_ID_COLOR_RUN: u8 = 5;
const ANIMATION_ID_JUMP: u8 = 6;
const ANIMATION_ID_RAINBOW: u8 = 7;
const ANIMATION_ID_WAVE: u8 = 8;
const ANIMATION_ID_THEATER_CHASE: u8 = 9;
const ANIMATION_ID_MORSE_CODE: u8 = 10;
const ANIMATION_ID_CHAOS: u8 = 11;
const ANIMATION_ID_MANDELBROT: u8 = 12;
const ANIMATION_ID_FIRE: u8 = 13;

/// Position of a frame in the show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Frames rendered since the controller started
    pub index: u64,
    /// Time the frame is rendered for
    pub now: Instant,
}

impl Frame {
    pub const fn new(index: u64, now: Instant) -> Self {
        Self { index, now }
    }
}

pub trait Animation {
    /// Draw one frame onto `surface`.
    ///
    /// Implementations never flush; the caller pushes the frame out.
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame);

    /// Whether the output has settled and will not change any more.
    fn is_complete(&self) -> bool {
        false
    }
}

/// Known animations that can be requested by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AnimationId {
    Solid = ANIMATION_ID_SOLID,
    ColorRanges = ANIMATION_ID_COLOR_RANGES,
    TwoColorBlend = ANIMATION_ID_TWO_COLOR_BLEND,
    Starlight = ANIMATION_ID_STARLIGHT,
    Stroboscope = ANIMATION_ID_STROBOSCOPE,
    ColorRun = ANIMATION_ID_COLOR_RUN,
    Jump = ANIMATION_ID_JUMP,
    Rainbow = ANIMATION_ID_RAINBOW,
    Wave = ANIMATION_ID_WAVE,
    TheaterChase = ANIMATION_ID_THEATER_CHASE,
    MorseCode = ANIMATION_ID_MORSE_CODE,
    Chaos = ANIMATION_ID_CHAOS,
    Mandelbrot = ANIMATION_ID_MANDELBROT,
    Fire = ANIMATION_ID_FIRE,
}

impl AnimationId {
    /// Every registered animation, in display order.
    pub const ALL: [Self; 14] = [
        Self::Solid,
        Self::ColorRanges,
        Self::TwoColorBlend,
        Self::Starlight,
        Self::Stroboscope,
        Self::ColorRun,
        Self::Jump,
        Self::Rainbow,
        Self::Wave,
        Self::TheaterChase,
        Self::MorseCode,
        Self::Chaos,
        Self::Mandelbrot,
        Self::Fire,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ANIMATION_ID_SOLID => Self::Solid,
            ANIMATION_ID_COLOR_RANGES => Self::ColorRanges,
            ANIMATION_ID_TWO_COLOR_BLEND => Self::TwoColorBlend,
            ANIMATION_ID_STARLIGHT => Self::Starlight,
            ANIMATION_ID_STROBOSCOPE => Self::Stroboscope,
            ANIMATION_ID_COLOR_RUN => Self::ColorRun,
            ANIMATION_ID_JUMP => Self::Jump,
            ANIMATION_ID_RAINBOW => Self::Rainbow,
            ANIMATION_ID_WAVE => Self::Wave,
            ANIMATION_ID_THEATER_CHASE => Self::TheaterChase,
            ANIMATION_ID_MORSE_CODE => Self::MorseCode,
            ANIMATION_ID_CHAOS => Self::Chaos,
            ANIMATION_ID_MANDELBROT => Self::Mandelbrot,
            ANIMATION_ID_FIRE => Self::Fire,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Solid => ANIMATION_NAME_SOLID,
            Self::ColorRanges => ANIMATION_NAME_COLOR_RANGES,
            Self::TwoColorBlend => ANIMATION_NAME_TWO_COLOR_BLEND,
            Self::Starlight => ANIMATION_NAME_STARLIGHT,
            Self::Stroboscope => ANIMATION_NAME_STROBOSCOPE,
            Self::ColorRun => ANIMATION_NAME_COLOR_RUN,
            Self::Jump => ANIMATION_NAME_JUMP,
            Self::Rainbow => ANIMATION_NAME_RAINBOW,
            Self::Wave => ANIMATION_NAME_WAVE,
            Self::TheaterChase => ANIMATION_NAME_THEATER_CHASE,
            Self::MorseCode => ANIMATION_NAME_MORSE_CODE,
            Self::Chaos => ANIMATION_NAME_CHAOS,
            Self::Mandelbrot => ANIMATION_NAME_MANDELBROT,
            Self::Fire => ANIMATION_NAME_FIRE,
        }
    }

    /// Human readable summary for animation listings.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Solid => "Solid color (default: white)",
            Self::ColorRanges => "Single color or color sections (flags, patterns)",
            Self::TwoColorBlend => "Gradient between two colors",
            Self::Starlight => "Twinkling stars effect",
            Self::Stroboscope => "Flashing strobe effect",
            Self::ColorRun => "Running colors",
            Self::Jump => "Jumping lights",
            Self::Rainbow => "Rainbow color cycle",
            Self::Wave => "Propagating wave with rainbow colors",
            Self::TheaterChase => "Marquee-style chase with rainbow colors",
            Self::MorseCode => "Scrolling Morse code text display",
            Self::Chaos => "Chaotic pattern",
            Self::Mandelbrot => "Mandelbrot fractal zoom",
            Self::Fire => "Rising flames from a simulated heat field",
        }
    }

    /// Look an animation up by its registry name. Names are case sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Build a fresh instance from a JSON parameter document.
    ///
    /// An empty document means "all defaults". Unknown keys are ignored and
    /// missing keys take their defaults. Any key that cannot be used, and a
    /// document that is not a JSON object at all, is an error.
    pub fn try_create(self, params: &str, seed: u64) -> Result<AnimationSlot, ShowError> {
        match self.create_reporting(params, seed) {
            (animation, None) => Ok(animation),
            (_, Some(error)) => Err(error),
        }
    }

    /// Like [`AnimationId::try_create`] but never fails: unusable keys fall
    /// back to their defaults one by one.
    pub fn create(self, params: &str, seed: u64) -> AnimationSlot {
        self.create_reporting(params, seed).0
    }

    /// Instance with every parameter at its default.
    pub fn defaults(self, seed: u64) -> AnimationSlot {
        self.create("", seed)
    }

    /// Build with per-key fallback and report whether anything fell back.
    pub fn create_reporting(self, params: &str, seed: u64) -> (AnimationSlot, Option<ShowError>) {
        let (animation, error) = match self {
            Self::Solid => with_params(params, |p| AnimationSlot::Solid(SolidAnimation::new(p))),
            Self::ColorRanges => {
                with_params(params, |p| AnimationSlot::ColorRanges(ColorRangesAnimation::new(p)))
            }
            Self::TwoColorBlend => with_params(params, |p| {
                AnimationSlot::TwoColorBlend(TwoColorBlendAnimation::new(p))
            }),
            Self::Starlight => with_params(params, |p| {
                AnimationSlot::Starlight(StarlightAnimation::new(p, seed))
            }),
            Self::Stroboscope => {
                with_params(params, |p| AnimationSlot::Stroboscope(StroboscopeAnimation::new(p)))
            }
            Self::ColorRun => (AnimationSlot::ColorRun(ColorRunAnimation::new(seed)), None),
            Self::Jump => (AnimationSlot::Jump(JumpAnimation::new()), None),
            Self::Rainbow => (AnimationSlot::Rainbow(RainbowAnimation::new()), None),
            Self::Wave => with_params(params, |p| AnimationSlot::Wave(WaveAnimation::new(p))),
            Self::TheaterChase => with_params(params, |p| {
                AnimationSlot::TheaterChase(TheaterChaseAnimation::new(p))
            }),
            Self::MorseCode => {
                with_params(params, |p| AnimationSlot::MorseCode(MorseCodeAnimation::new(&p)))
            }
            Self::Chaos => with_params(params, |p| AnimationSlot::Chaos(ChaosAnimation::new(p))),
            Self::Mandelbrot => {
                with_params(params, |p| AnimationSlot::Mandelbrot(MandelbrotAnimation::new(p)))
            }
            Self::Fire => with_params(params, |p| AnimationSlot::Fire(FireAnimation::new(p, seed))),
        };
        if error.is_some() {
            show_log!("[show] {}: unusable params, defaults filled in", self.name());
        }
        (animation, error)
    }
}

fn with_params<P, F>(params: &str, build: F) -> (AnimationSlot, Option<ShowError>)
where
    P: DeserializeOwned + Default,
    F: FnOnce(P) -> AnimationSlot,
{
    let (parsed, error) = parse_params(params);
    (build(parsed), error)
}

/// Parse a parameter object, dropping the keys that do not deserialize.
///
/// Every params struct is `#[serde(default)]`, so a dropped key takes its
/// default. A document that is not an object yields all defaults.
fn parse_params<P: DeserializeOwned + Default>(params: &str) -> (P, Option<ShowError>) {
    let params = params.trim();
    if params.is_empty() {
        return (P::default(), None);
    }
    let Ok(Value::Object(document)) = serde_json::from_str::<Value>(params) else {
        return (P::default(), Some(ShowError::ParamParseFailure));
    };
    if let Ok(parsed) = serde_json::from_value(Value::Object(document.clone())) {
        return (parsed, None);
    }

    let mut accepted = Map::new();
    for (key, value) in document {
        accepted.insert(key.clone(), value);
        if serde_json::from_value::<P>(Value::Object(accepted.clone())).is_err() {
            show_log!("[show] ignoring param `{}`", key.as_str());
            accepted.remove(&key);
        }
    }
    let parsed = serde_json::from_value(Value::Object(accepted)).unwrap_or_default();
    (parsed, Some(ShowError::ParamParseFailure))
}

/// Animation slot - enum containing all possible animations
#[derive(Debug, Clone)]
pub enum AnimationSlot {
    Solid(SolidAnimation),
    ColorRanges(ColorRangesAnimation),
    TwoColorBlend(TwoColorBlendAnimation),
    Starlight(StarlightAnimation),
    Stroboscope(StroboscopeAnimation),
    ColorRun(ColorRunAnimation),
    Jump(JumpAnimation),
    Rainbow(RainbowAnimation),
    Wave(WaveAnimation),
    TheaterChase(TheaterChaseAnimation),
    MorseCode(MorseCodeAnimation),
    Chaos(ChaosAnimation),
    Mandelbrot(MandelbrotAnimation),
    Fire(FireAnimation),
}

impl Default for AnimationSlot {
    fn default() -> Self {
        Self::Rainbow(RainbowAnimation::new())
    }
}

impl AnimationSlot {
    /// Get the animation ID for external observation
    pub const fn id(&self) -> AnimationId {
        match self {
            Self::Solid(_) => AnimationId::Solid,
            Self::ColorRanges(_) => AnimationId::ColorRanges,
            Self::TwoColorBlend(_) => AnimationId::TwoColorBlend,
            Self::Starlight(_) => AnimationId::Starlight,
            Self::Stroboscope(_) => AnimationId::Stroboscope,
            Self::ColorRun(_) => AnimationId::ColorRun,
            Self::Jump(_) => AnimationId::Jump,
            Self::Rainbow(_) => AnimationId::Rainbow,
            Self::Wave(_) => AnimationId::Wave,
            Self::TheaterChase(_) => AnimationId::TheaterChase,
            Self::MorseCode(_) => AnimationId::MorseCode,
            Self::Chaos(_) => AnimationId::Chaos,
            Self::Mandelbrot(_) => AnimationId::Mandelbrot,
            Self::Fire(_) => AnimationId::Fire,
        }
    }
}

impl Animation for AnimationSlot {
    fn execute<S: PixelSurface + ?Sized>(&mut self, surface: &mut S, frame: Frame) {
        match self {
            Self::Solid(animation) => animation.execute(surface, frame),
            Self::ColorRanges(animation) => animation.execute(surface, frame),
            Self::TwoColorBlend(animation) => animation.execute(surface, frame),
            Self::Starlight(animation) => animation.execute(surface, frame),
            Self::Stroboscope(animation) => animation.execute(surface, frame),
            Self::ColorRun(animation) => animation.execute(surface, frame),
            Self::Jump(animation) => animation.execute(surface, frame),
            Self::Rainbow(animation) => animation.execute(surface, frame),
            Self::Wave(animation) => animation.execute(surface, frame),
            Self::TheaterChase(animation) => animation.execute(surface, frame),
            Self::MorseCode(animation) => animation.execute(surface, frame),
            Self::Chaos(animation) => animation.execute(surface, frame),
            Self::Mandelbrot(animation) => animation.execute(surface, frame),
            Self::Fire(animation) => animation.execute(surface, frame),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Solid(animation) => animation.is_complete(),
            Self::ColorRanges(animation) => animation.is_complete(),
            Self::TwoColorBlend(animation) => animation.is_complete(),
            Self::Starlight(_)
            | Self::Stroboscope(_)
            | Self::ColorRun(_)
            | Self::Jump(_)
            | Self::Rainbow(_)
            | Self::Wave(_)
            | Self::TheaterChase(_)
            | Self::MorseCode(_)
            | Self::Chaos(_)
            | Self::Mandelbrot(_)
            | Self::Fire(_) => false,
        }
    }
}
