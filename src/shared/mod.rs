pub mod shutdown;
pub mod time;

pub use shutdown::*;
pub use time::*;
