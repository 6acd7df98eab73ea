//! # dst-render - Dead Simple Templates
//!
//! `dst-render` renders templates given as literal text fragments
//! alternating with typed *slots*. There is no template syntax to parse: what
//! a slot does depends on the value placed in it.
//!
//! ## Core Concepts
//!
//! - [`Slot`]: a direct value, a section start, a section end, or an accessor
//! - [`Driver`]: what a section iterates over (an array), runs once for
//!   (a truthy value), or skips (a falsy value or empty array)
//! - [`Accessor`] / [`item`]: composable references into the current loop
//!   frame, built once and evaluated per frame
//! - [`Template`]: builder that keeps fragments and slots alternating
//! - [`RenderOptions`]: undefined placeholder and blank-line collapsing
//!
//! ## Quick Start
//!
//! ```rust
//! use dst_render::{item, Template};
//! use serde_json::json;
//!
//! let stooges = json!([["Moe", "Howard"], ["Larry", "Fine"]]);
//!
//! // Stooges:{stooges} {item} {item} {/}{/}
//! let out = Template::new("Stooges:")
//!     .section(stooges)
//!     .text(" ")
//!     .section(item())
//!     .text(" ")
//!     .accessor(item())
//!     .text(" ")
//!     .end()
//!     .end()
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(out, "Stooges:  Moe  Howard   Larry  Fine ");
//! ```
//!
//! ## Shape-Based Slots
//!
//! JSON values convert into slots by shape: a single-key object opens a
//! section driven by its value, an empty object closes one, everything else
//! is substituted as-is.
//!
//! ```rust
//! use dst_render::{item, render, Slot};
//! use serde_json::json;
//!
//! let a = json!([{"name": "Moe"}, {"name": "Larry"}]);
//! let out = render(
//!     &["Stooges:", " ", " ", ""],
//!     &[
//!         Slot::from(json!({ "a": a })),
//!         Slot::from(item().field("name").map(|v| json!(format!("{}*", v.as_str().unwrap_or(""))))),
//!         Slot::from(json!({})),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(out, "Stooges: Moe*  Larry* ");
//! ```
//!
//! ## Errors
//!
//! Unbalanced sections are rejected before anything is rendered; see
//! [`TemplateError`]. Evaluation itself never fails: missing data renders as
//! [`RenderOptions::undefined`].

mod accessor;
mod error;
mod options;
mod renderer;
mod scope;
mod section;
mod slot;
mod template;
pub mod value;
mod whitespace;

pub use accessor::{item, Accessor};
pub use error::{Result, TemplateError};
pub use options::RenderOptions;
pub use scope::{Frame, Scope};
pub use section::{match_sections, SectionMap};
pub use slot::{classify, Driver, Slot, SlotKind};
pub use template::{render, render_with_options, Template};
pub use value::Segment;
pub use whitespace::collapse_marker_lines;
