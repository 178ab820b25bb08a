//! Infrastructure layer for the session viewer.
//!
//! Contains the adapters around the application layer: the channel that carries
//! forwarded input to the transport task, the sources that feed host messages
//! in, and file-system storage for configuration.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `deskview_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod input_source;
pub mod storage;
pub mod transport;
