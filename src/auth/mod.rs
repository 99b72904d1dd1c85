pub mod csrf;
pub mod middleware;
pub mod session;
pub mod token;
pub mod validate;
