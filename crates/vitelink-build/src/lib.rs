//! Frontend build trigger.
//!
//! Runs the Node build command (`npm run build` by default) for the Svelte
//! frontend and reports the result to operator-facing streams.

pub mod trigger;

pub use trigger::{BuildConfig, BuildError, BuildOutcome, BuildTrigger};
