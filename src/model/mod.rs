//! Pure data structures: the diners, their lifecycle state and the table they share.

pub mod philosopher;
pub mod state;
pub mod table;

pub use philosopher::*;
pub use state::*;
pub use table::*;
