//! Light/dark theme resolution for static sites.
//!
//! Decides which theme a page renders from the visitor's stored preference,
//! a hint left on the root element by the server render, and the OS-level
//! color-scheme signal, then keeps the page in sync as any of those change.
//! The resolver core is platform-free and runs natively in tests; the
//! `hydrate` feature adds `web_sys` adapters and a WASM start hook.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`mode`] | Preference and rendered-theme values |
//! | [`resolver`] | [`resolver::ThemeResolver`], the single page-level component |
//! | [`capability`] | Storage, OS signal, root element, and timer interfaces |
//! | [`memory`] | In-memory capabilities for tests and headless hosts |
//! | [`config`] | Storage key, attribute names, transition timing |
//! | [`control`] | Accessible toggle-button presentation |
//! | [`error`] | Error type |
//! | `browser` | Browser adapters and page wiring (`hydrate` only) |

pub mod capability;
pub mod config;
pub mod control;
pub mod error;
pub mod memory;
pub mod mode;
pub mod resolver;

#[cfg(feature = "hydrate")]
pub mod browser;

pub use capability::Capabilities;
pub use config::ResolverConfig;
pub use error::ThemeError;
pub use mode::{EffectiveTheme, ThemeChange, ThemeMode};
pub use resolver::{SubscriptionId, ThemeResolver, Transition};
