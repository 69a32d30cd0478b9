//! Identity types shared across Foodgram services.
//!
//! Token issuance lives in the auth gateway; services only read the identity
//! it injects into request headers.

pub mod identity;
