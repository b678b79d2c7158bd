// src/crypto/mod.rs

//! Cryptographic building blocks: key derivation, chunk authentication and
//! injectable randomness. HMAC and secret buffer types live in `aliases.rs`.

pub mod chunk_mac;
pub mod kdf;
pub mod rng;
