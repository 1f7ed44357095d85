// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Columbus-View camera navigation for a flattened-map geospatial viewer.
//!
//! The body is projected onto the plane `z = 0` with relief along `z`;
//! the camera pans over that plane with inertia, orbits about the map
//! normal, and is kept over the finite map by an animated boundary
//! correction.
//!
//! # Key entry points
//!
//! - [`camera::ColumbusViewController`] - per-frame navigation controller
//! - [`camera::Camera`] - camera state in a re-centered local frame
//! - [`input::InputSurface`] - routes input events to gesture handlers
//! - [`animation::AnimationScheduler`] - tick-driven tweens used for
//!   snap-back corrections
//! - [`options::Options`] - runtime configuration and TOML presets
//!
//! # Frame loop
//!
//! Feed window events to the [`input::InputSurface`], then call
//! [`camera::ColumbusViewController::update`] once per rendered frame.
//! Every call re-centers the camera's local frame under the point it
//! looks at, so the translation part of the camera transform tracks the
//! view.

pub mod animation;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod input;
pub mod options;

pub use error::ColumbusError;
