//! Authentication: password hashing, session identity and the access gate.

mod gate;
mod password;
mod session;

pub use gate::{authorize, Denied};
pub use password::{hash_password, verify_password};
pub use session::{RequestContext, FLASH_KEY, SESSION_USERNAME_KEY};
