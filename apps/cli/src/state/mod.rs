//! # State Module
//!
//! Session state held between user edits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │          Arc<RateSchedule>  (immutable, shared, never locked)          │
//! │                 │                    │                                  │
//! │                 ▼                    ▼                                  │
//! │   ┌──────────────────────┐  ┌──────────────────────┐                   │
//! │   │  CalculatorSession   │  │  CalculatorSession   │   one per user    │
//! │   │  FarmInput, Currency │  │  FarmInput, Currency │                   │
//! │   └──────────────────────┘  └──────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod session;

pub use session::CalculatorSession;
