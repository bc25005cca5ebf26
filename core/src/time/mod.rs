pub mod clock;
pub mod division;
pub mod tempo;
pub mod ticks;

pub use self::clock::ClockTime;
pub use self::division::Division;
pub use self::tempo::Tempo;
pub use self::ticks::TicksTime;
