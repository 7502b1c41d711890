//! Authentication: argon2 credential storage, 30-day bearer tokens, and
//! the route-level guards built on them.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod token;
