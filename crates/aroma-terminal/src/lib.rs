//! # Aroma Terminal - POS Session Layer
//!
//! Glues the pure engines to the network edge. Everything a UI shell
//! needs to run one register: a locked session, view models, and the
//! checkout round trip.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        UI Shell (any frontend)                          │
//! └───────────────────────────────┬─────────────────────────────────────────┘
//!                                 │ SessionView / CheckoutReceipt (JSON)
//! ┌───────────────────────────────┴─────────────────────────────────────────┐
//! │                          ★ aroma-terminal ★                             │
//! │                                                                         │
//! │   SessionState ──► PosSession ──► Cart + SettlementEngine (aroma-core)  │
//! │        │                                                                │
//! │        └── submit_sale ──► SalesClient (aroma-client) ──► POST /sales   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`session`] - The `PosSession` state machine (Building / Submitting)
//! - [`state`] - `Arc<Mutex>` wrapper shared across handlers
//! - [`view`] - camelCase read models the frontend renders
//! - [`checkout`] - Sale submission and receipt assembly
//! - [`error`] - Terminal errors and their frontend error codes
//!
//! ## Usage
//! ```rust,ignore
//! use aroma_client::{ClientConfig, SalesClient};
//! use aroma_terminal::{submit_sale, SessionState};
//!
//! aroma_terminal::init_tracing();
//!
//! let config = ClientConfig::load_or_default(None);
//! let client = SalesClient::new(&config)?;
//! let state = SessionState::new();
//!
//! state.with_session_mut(|session| session.add_product(&product))?;
//! state.with_session_mut(|session| {
//!     session.add_payment(TenderMethod::Cash, Money::from_units(10_000))
//! })?;
//!
//! let receipt = submit_sale(&state, &client).await?;
//! ```

pub mod checkout;
pub mod error;
pub mod session;
pub mod state;
pub mod view;

// Re-export the session surface a UI shell works with
pub use checkout::{submit_sale, CheckoutReceipt, ReceiptLine};
pub use error::{ErrorCode, ErrorResponse, TerminalError, TerminalResult};
pub use session::{PosSession, QuotationLine, QuotationLoad, SessionPhase};
pub use state::SessionState;
pub use view::{CartView, LineView, SessionView, SettlementView, TenderView};

/// Initializes the tracing subscriber for terminal logging.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,aroma=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
