//! Post-parse operations on a built [`Structure`](crate::Structure).

mod altloc;

pub use altloc::{AltLocPolicy, AltLocReport, resolve_alternate_locations};
