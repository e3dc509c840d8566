//! Cart engine and health services.
//!
//! This module contains the operation implementations behind the HTTP
//! surface.

pub mod cart_service;
pub mod health_service;
