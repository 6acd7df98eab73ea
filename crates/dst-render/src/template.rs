//! Render entry points and the [`Template`] builder.
//!
//! Every render call matches sections anew and renders from an empty
//! context stack; nothing is cached between calls.

use serde_json::Value;

use crate::accessor::Accessor;
use crate::error::{Result, TemplateError};
use crate::options::RenderOptions;
use crate::renderer::ScopedRenderer;
use crate::section::match_sections;
use crate::slot::{Driver, Slot};
use crate::whitespace::collapse_marker_lines;

/// Renders fragments and slots with default options.
///
/// `fragments` must hold exactly one more entry than `slots`; slot `i` sits
/// between fragment `i` and fragment `i + 1`.
///
/// ```rust
/// use dst_render::{item, render, Slot};
/// use serde_json::json;
///
/// let rows = json!([{"props": {"name": "Moe"}}]);
/// let out = render(
///     &["", " ", " ", ""],
///     &[
///         Slot::section(rows),
///         Slot::from(item().field("props").field("name")),
///         Slot::end(),
///     ],
/// )
/// .unwrap();
/// assert_eq!(out, " Moe ");
/// ```
pub fn render<S: AsRef<str>>(fragments: &[S], slots: &[Slot]) -> Result<String> {
    render_with_options(fragments, slots, &RenderOptions::default())
}

/// Renders fragments and slots with explicit options.
///
/// Section matching runs first; an unbalanced template fails before any
/// output is produced.
pub fn render_with_options<S: AsRef<str>>(
    fragments: &[S],
    slots: &[Slot],
    options: &RenderOptions,
) -> Result<String> {
    if fragments.len() != slots.len() + 1 {
        return Err(TemplateError::ArityMismatch {
            fragments: fragments.len(),
            slots: slots.len(),
        });
    }

    let sections = match_sections(slots)?;
    tracing::debug!(
        fragments = fragments.len(),
        sections = sections.len(),
        collapse = options.collapse_marker_lines,
        "rendering template"
    );

    let output = if options.collapse_marker_lines {
        let collapsed = collapse_marker_lines(fragments, slots);
        ScopedRenderer::new(collapsed.as_slice(), slots, &sections, options).render()
    } else {
        ScopedRenderer::new(fragments, slots, &sections, options).render()
    };

    Ok(output)
}

/// An owned template: literal fragments alternating with slots.
///
/// The builder keeps fragments and slots alternating: [`text`](Self::text)
/// extends the trailing fragment, and every slot-adding method starts a new
/// empty one.
///
/// ```rust
/// use dst_render::{item, Template};
/// use serde_json::json;
///
/// let stooges = json!([{"name": "Moe"}, {"name": "Larry"}, {"name": "Curly"}]);
/// let template = Template::new("Stooges:")
///     .section(stooges)
///     .text(" ")
///     .accessor(item().field("name"))
///     .text(" ")
///     .end();
///
/// assert_eq!(template.render().unwrap(), "Stooges: Moe  Larry  Curly ");
/// ```
///
/// A template can be rendered any number of times, from several threads;
/// each render owns its own context stack.
#[derive(Debug, Clone)]
pub struct Template {
    fragments: Vec<String>,
    slots: Vec<Slot>,
}

impl Template {
    /// Starts a template with its first literal fragment.
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            fragments: vec![first.into()],
            slots: Vec::new(),
        }
    }

    /// Builds a template from pre-split parts, checking that they alternate.
    pub fn from_parts<S: Into<String>>(fragments: Vec<S>, slots: Vec<Slot>) -> Result<Self> {
        if fragments.len() != slots.len() + 1 {
            return Err(TemplateError::ArityMismatch {
                fragments: fragments.len(),
                slots: slots.len(),
            });
        }
        Ok(Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            slots,
        })
    }

    /// Appends literal text to the trailing fragment.
    pub fn text(mut self, text: &str) -> Self {
        if let Some(last) = self.fragments.last_mut() {
            last.push_str(text);
        }
        self
    }

    /// Appends a slot followed by a new empty fragment.
    pub fn slot(mut self, slot: impl Into<Slot>) -> Self {
        self.slots.push(slot.into());
        self.fragments.push(String::new());
        self
    }

    /// Opens a section.
    pub fn section(self, driver: impl Into<Driver>) -> Self {
        self.slot(Slot::section(driver))
    }

    /// Closes the innermost open section.
    pub fn end(self) -> Self {
        self.slot(Slot::End)
    }

    /// Adds an accessor slot.
    pub fn accessor(self, accessor: Accessor) -> Self {
        self.slot(Slot::Accessor(accessor))
    }

    /// Adds a plain value slot.
    pub fn value(self, value: impl Into<Value>) -> Self {
        self.slot(Slot::direct(value))
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Renders with default options.
    pub fn render(&self) -> Result<String> {
        render(self.fragments.as_slice(), &self.slots)
    }

    /// Renders with explicit options.
    pub fn render_with(&self, options: &RenderOptions) -> Result<String> {
        render_with_options(self.fragments.as_slice(), &self.slots, options)
    }
}
