//! Authentication state: the stored session and its backing storage.
//!
//! This module provides:
//! - `Session`: bearer token and user profile, read on every request
//! - `Storage`: persistent key-value storage (`FileStorage` on disk,
//!   `MemoryStorage` for tests and throwaway sessions)
//!
//! The session is created by a successful login and destroyed on logout or
//! when the server answers 401.

pub mod session;
pub mod storage;

pub use session::{Session, TOKEN_KEY, USER_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
