mod utils;

use smart_leds::RGB8;

pub use utils::{BLACK, black_body, dim, lerp, rgb_from_u32, rgb_to_u32, wheel};

pub type Rgb = RGB8;
