//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256 signing, Base64, secrets)
//! - Password hashing (Argon2id)
//! - Cookie header parsing and building

pub mod cookie;
pub mod crypto;
pub mod password;
