mod health;
mod network;
mod routing;

pub use health::*;
pub use network::*;
pub use routing::*;
