//! FreshBooks API model types.

pub mod date;
mod detail;
mod identity;
mod invoice;
mod journal_entry;
mod line;
mod money;
mod status;

pub use detail::*;
pub use identity::*;
pub use invoice::*;
pub use journal_entry::*;
pub use line::*;
pub use money::*;
pub use status::*;
