//! Loop frames and the context stack accessors read from.
//!
//! Every section activation pushes one [`Frame`]: array drivers push
//! `(element, index, source)` once per element, truthy scalar drivers push a
//! single `(element)` frame. The stack only lives for one render call; a
//! [`Scope`] is a borrowed view of it handed to accessors.

use std::rc::Rc;

use serde_json::Value;

/// One activation of a section body.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    element: Value,
    index: Option<usize>,
    source: Option<Rc<Value>>,
}

impl Frame {
    /// A frame for element `index` of the array `source`.
    ///
    /// Every frame of one loop shares the same `source`.
    pub fn looped(source: Rc<Value>, index: usize) -> Self {
        Self {
            element: source.get(index).cloned().unwrap_or(Value::Null),
            index: Some(index),
            source: Some(source),
        }
    }

    /// A frame for a truthy, non-array driver.
    pub fn conditional(element: Value) -> Self {
        Self {
            element,
            index: None,
            source: None,
        }
    }

    /// The frame seen when no section encloses an accessor.
    pub fn detached() -> Self {
        Self::conditional(Value::Null)
    }

    pub fn element(&self) -> &Value {
        &self.element
    }

    /// Position within the source array, `None` for conditional frames.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The array being iterated, `None` for conditional frames.
    pub fn source(&self) -> Option<&[Value]> {
        self.source_value()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    pub(crate) fn source_value(&self) -> Option<&Value> {
        self.source.as_deref()
    }
}

/// Read-only view of the active frames, outermost first.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    frames: &'a [Frame],
}

impl<'a> Scope<'a> {
    pub fn new(frames: &'a [Frame]) -> Self {
        Self { frames }
    }

    /// A scope with no enclosing section.
    pub fn empty() -> Self {
        Self { frames: &[] }
    }

    /// The innermost frame, if any.
    pub fn top(&self) -> Option<&'a Frame> {
        self.frames.last()
    }

    /// The scope as seen `levels` sections further out.
    ///
    /// Going past the outermost frame yields an empty scope.
    pub fn outer(&self, levels: usize) -> Scope<'a> {
        let keep = self.frames.len().saturating_sub(levels);
        Scope {
            frames: &self.frames[..keep],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// The growable stack of frames owned by one render call.
#[derive(Debug, Default)]
pub(crate) struct ContextStack {
    frames: Vec<Frame>,
}

impl ContextStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub(crate) fn scope(&self) -> Scope<'_> {
        Scope::new(&self.frames)
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stooges() -> Rc<Value> {
        Rc::new(json!(["Moe", "Larry", "Curly"]))
    }

    #[test]
    fn test_looped_frame() {
        let frame = Frame::looped(stooges(), 1);
        assert_eq!(frame.element(), &json!("Larry"));
        assert_eq!(frame.index(), Some(1));
        assert_eq!(frame.source().map(|s| s.len()), Some(3));
    }

    #[test]
    fn test_looped_frames_share_source() {
        let source = stooges();
        let first = Frame::looped(Rc::clone(&source), 0);
        let last = Frame::looped(Rc::clone(&source), 2);

        assert_eq!(last.element(), &json!("Curly"));
        assert!(std::ptr::eq(
            first.source_value().unwrap(),
            last.source_value().unwrap()
        ));
        assert_eq!(Rc::strong_count(&source), 3);
    }

    #[test]
    fn test_conditional_frame() {
        let frame = Frame::conditional(json!({"ok": true}));
        assert_eq!(frame.element(), &json!({"ok": true}));
        assert_eq!(frame.index(), None);
        assert!(frame.source().is_none());
    }

    #[test]
    fn test_scope_outer() {
        let frames = vec![
            Frame::conditional(json!("outer")),
            Frame::conditional(json!("inner")),
        ];
        let scope = Scope::new(&frames);

        assert_eq!(scope.top().map(Frame::element), Some(&json!("inner")));
        assert_eq!(
            scope.outer(1).top().map(Frame::element),
            Some(&json!("outer"))
        );
        assert!(scope.outer(5).top().is_none());
        assert_eq!(scope.outer(5).depth(), 0);
    }

    #[test]
    fn test_context_stack_push_pop() {
        let mut stack = ContextStack::new();
        assert!(stack.scope().top().is_none());

        stack.push(Frame::conditional(json!(1)));
        stack.push(Frame::conditional(json!(2)));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.scope().top().map(Frame::element), Some(&json!(2)));

        assert_eq!(stack.pop().map(|f| f.element().clone()), Some(json!(2)));
        assert_eq!(stack.depth(), 1);
    }
}
