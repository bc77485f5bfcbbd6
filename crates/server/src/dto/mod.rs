mod journey;
mod line;
mod stop;

pub use journey::*;
pub use line::*;
pub use stop::*;
