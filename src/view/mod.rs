//! Views
//!
//! Template instantiation and the mount surface the router renders into.

mod surface;
mod template;

pub use surface::{Surface, TransactionDialog};
pub use template::{slot, Content, TransactionRow, View, ViewId};
