mod base;
mod ant;
mod colony;

pub use ant::{Ant, Phase};
pub use base::city::City;
pub use base::power::{Approximate, Power, PowerEnum, Precise};
pub use colony::Colony;
