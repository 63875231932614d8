pub mod lunar;
pub mod zodiac;

pub use lunar::{LunarCategory, LunarPhase, LunarState};
pub use zodiac::ZodiacSign;
