//! Application layer use cases for the session viewer.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure view geometry in `deskview_core`) and the infrastructure
//! (files, channels, the terminal).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "a right-click
//!   in the scrolled view reaches the remote desktop at the right pixel").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the transport can be swapped without changing this code.
//! - **Contain no OS calls, no network I/O, no file system access**.
//!
//! # Sub-modules
//!
//! - **`session_view`** – The explicit state machine of one remote session view:
//!   `create → mount → update(message) → dispose`.  Each message yields at most
//!   one effect.
//!
//! - **`input_pump`** – Feeds host messages through the view and hands each
//!   forwarded event to the [`input_pump::InputForwarder`].

pub mod input_pump;
pub mod session_view;
