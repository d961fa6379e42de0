//! # Pricer Models (L2: Business Logic)
//!
//! Instruments, pricing-engine interface and the Black-Scholes process.
//!
//! This crate provides:
//! - Vanilla option definitions (payoff, exercise, engine slot)
//! - The `PricingEngine` trait implemented by the L3 engines
//! - The generalised Black-Scholes process built on L1 term structures
//! - Closed-form Black-Scholes formulas for validation and tree smoothing
//!
//! ## Design Principles
//!
//! - **Instrument and engine separated**: contract terms never change, engines are swapped
//! - **Shared market handles**: term structures held behind `Arc<dyn ...>`
//! - **Typed errors**: every module reports through a `thiserror` enum that converts
//!   to `PricingError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
