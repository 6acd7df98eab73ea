//! Recursive, scope-aware rendering of a matched template.
//!
//! [`ScopedRenderer`] walks a half-open fragment range. Fragments are copied
//! through; each slot in between is rendered according to its kind. Sections
//! recurse into their inner range once per frame their driver produces,
//! with the frame pushed on the context stack for the duration.

use std::rc::Rc;

use crate::options::RenderOptions;
use crate::scope::{ContextStack, Frame};
use crate::section::SectionMap;
use crate::slot::{Driver, Slot};
use crate::value::{is_truthy, stringify};

pub(crate) struct ScopedRenderer<'t, S> {
    fragments: &'t [S],
    slots: &'t [Slot],
    sections: &'t SectionMap,
    options: &'t RenderOptions,
}

impl<'t, S: AsRef<str>> ScopedRenderer<'t, S> {
    /// `fragments.len()` must be `slots.len() + 1` and `sections` must come
    /// from matching `slots`.
    pub(crate) fn new(
        fragments: &'t [S],
        slots: &'t [Slot],
        sections: &'t SectionMap,
        options: &'t RenderOptions,
    ) -> Self {
        Self {
            fragments,
            slots,
            sections,
            options,
        }
    }

    /// Renders the whole template with an empty context stack.
    pub(crate) fn render(&self) -> String {
        let mut stack = ContextStack::new();
        self.render_range(&mut stack, 0, self.fragments.len())
    }

    /// Renders fragments `start..end` and the slots strictly between them.
    fn render_range(&self, stack: &mut ContextStack, start: usize, end: usize) -> String {
        let mut output = String::new();
        if end == 0 {
            return output;
        }

        let mut i = start;
        while i < end - 1 {
            output.push_str(self.fragments[i].as_ref());

            match &self.slots[i] {
                Slot::Start(driver) => {
                    let Some(close) = self.sections.end_of(i) else {
                        tracing::warn!(index = i, "section start without a matched end");
                        i += 1;
                        continue;
                    };
                    self.render_section(&mut output, stack, driver, i + 1, close + 1);
                    i = close;
                }
                Slot::End => {
                    tracing::warn!(index = i, "section end reached outside its section");
                }
                Slot::Accessor(accessor) => {
                    let scope = stack.scope();
                    let value = accessor.resolve(&scope);
                    output.push_str(&stringify(&value, &self.options.undefined));
                }
                Slot::Direct(value) => {
                    output.push_str(&stringify(value, &self.options.undefined));
                }
            }

            i += 1;
        }

        output.push_str(self.fragments[end - 1].as_ref());
        output
    }

    /// Expands one section body over the frames its driver produces.
    fn render_section(
        &self,
        output: &mut String,
        stack: &mut ContextStack,
        driver: &Driver,
        start: usize,
        end: usize,
    ) {
        let resolved = match driver {
            Driver::Value(value) => value.clone(),
            Driver::Accessor(accessor) => accessor.evaluate(&stack.scope()),
        };

        if resolved.is_array() {
            let source = Rc::new(resolved);
            let frames = source.as_array().map_or(0, Vec::len);
            tracing::trace!(start, frames, depth = stack.depth(), "expanding loop section");
            for k in 0..frames {
                stack.push(Frame::looped(Rc::clone(&source), k));
                output.push_str(&self.render_range(stack, start, end));
                stack.pop();
            }
        } else if is_truthy(&resolved) {
            tracing::trace!(start, depth = stack.depth(), "expanding conditional section");
            stack.push(Frame::conditional(resolved));
            output.push_str(&self.render_range(stack, start, end));
            stack.pop();
        } else {
            tracing::trace!(start, "skipping falsy section");
        }
    }
}
