//! Static frontend served by the same process
//!
//! Only the known pages and asset folders are exposed. Anything else in the
//! directory (`.env`, backend sources, ...) stays unreachable.

pub mod routes;
