//! Authentication module for the valuation server
//!
//! Registration and login, stateless session tokens carried in the `token`
//! cookie, and the route guard protecting everything that is not public.

pub mod extractor;
pub mod guard;
pub mod handlers;
mod service;
pub mod token;

pub use extractor::AuthenticatedUser;
pub use guard::route_guard;
pub use service::AuthService;
pub use token::{Claims, TokenService, SESSION_COOKIE};
