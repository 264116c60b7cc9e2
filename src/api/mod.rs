//! # Session API
//!
//! Client for the backend's two endpoints: `POST /init` (start a session
//! from a phone number) and `POST /chat` (send one message, receive the
//! full replacement state). The backend owns all conversation logic; this
//! module only moves state across the wire.

pub mod client;
pub mod types;

pub use client::{ClientError, SessionApi, SessionClient};
pub use types::{ChatRequest, ConversationState, InitRequest, Message, PaymentPlan, Role};
