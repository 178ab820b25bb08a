//! Domain entities for DeskView.
//!
//! This module contains pure view-state logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from OS APIs, network libraries, or UI frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here the rules are geometric: which part of the remote desktop is visible,
//! how a scrollbar drag moves it, and how a local pointer position lands on the
//! remote pixel grid.

/// Sizes, points, rectangles, and aspect-fit placement.
pub mod geometry;

/// Pointer-position conversion from the displayed frame to remote pixels.
pub mod mapper;

/// Per-axis scrollbar drag handling.
pub mod scrollbar;

/// Frame surface handle, remote display description, and frame placement.
pub mod surface;

/// Clamped scroll state of one session view.
///
/// See [`viewport::Viewport`] for the main type.
pub mod viewport;
