mod energy;
mod furnace;
mod persist;
mod slots;
mod views;

pub use energy::*;
pub use furnace::*;
pub use persist::*;
pub use slots::*;
pub use views::*;
