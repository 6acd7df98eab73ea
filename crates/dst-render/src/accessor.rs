//! Composable, lazily evaluated references to frame data.
//!
//! An [`Accessor`] describes *how* to pull a value out of the current loop
//! frame without naming any particular frame. Template authors build them
//! once; the renderer evaluates them against every frame the enclosing
//! section produces.
//!
//! # Building accessors
//!
//! ```rust
//! use dst_render::{item, Accessor, Frame};
//! use serde_json::json;
//!
//! // item.props.name
//! let name = item().field("props").field("name");
//!
//! // item.name(fn): post-process the derived value on every evaluation
//! let shout = item().field("name").map(|v| json!(v.as_str().unwrap_or("").to_uppercase()));
//!
//! let frame = Frame::conditional(json!({"name": "moe", "props": {"name": "Moe"}}));
//! assert_eq!(name.call(&frame), json!("Moe"));
//! assert_eq!(shout.call(&frame), json!("MOE"));
//!
//! // (el, idx, arr) => idx
//! let position = Accessor::from_fn(|frame| json!(frame.index()));
//! assert_eq!(position.call(&frame), json!(null));
//! ```
//!
//! # Composition vs evaluation
//!
//! Composition ([`Accessor::map`]) and evaluation ([`Accessor::evaluate`],
//! [`Accessor::call`]) are separate operations, so a transform function can
//! never be confused with frame data.
//!
//! # Enclosing frames
//!
//! [`Accessor::up`] evaluates an accessor against an enclosing section's
//! frame, so an inner loop can read the outer loop variable:
//!
//! ```rust
//! use dst_render::{item, Template};
//! use serde_json::json;
//!
//! let groups = json!([{"name": "A", "tags": ["x", "y"]}]);
//! let out = Template::new("")
//!     .section(groups)
//!     .section(item().field("tags"))
//!     .accessor(item().field("name").parent())
//!     .text("-")
//!     .accessor(item())
//!     .text(" ")
//!     .end()
//!     .end()
//!     .render()
//!     .unwrap();
//! assert_eq!(out, "A-x A-y ");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::scope::{Frame, Scope};
use crate::value::Segment;

type FrameFn = Arc<dyn Fn(&Frame) -> Value + Send + Sync>;
type MapFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

enum Node {
    Element,
    Index,
    Source,
    Frame(FrameFn),
    Field(Accessor, Segment),
    Map(Accessor, MapFn),
    Up(usize, Accessor),
}

/// A reference to a value derived from the current loop frame.
///
/// Accessors are immutable and cheap to clone; derived accessors share their
/// inner chain.
#[derive(Clone)]
pub struct Accessor {
    node: Arc<Node>,
}

/// The base accessor: the current frame's element.
pub fn item() -> Accessor {
    Accessor::item()
}

impl Accessor {
    fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// The current frame's element.
    pub fn item() -> Self {
        Self::from_node(Node::Element)
    }

    /// Position of the element within the iterated array.
    ///
    /// Null inside a conditional section or outside any section.
    pub fn index() -> Self {
        Self::from_node(Node::Index)
    }

    /// The full array being iterated, or null when there is none.
    pub fn source() -> Self {
        Self::from_node(Node::Source)
    }

    /// An accessor computed by an arbitrary function of the frame.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Frame) -> Value + Send + Sync + 'static,
    {
        Self::from_node(Node::Frame(Arc::new(f)))
    }

    /// Derives an accessor indexing this one's result by `segment`.
    pub fn get(self, segment: impl Into<Segment>) -> Self {
        Self::from_node(Node::Field(self, segment.into()))
    }

    /// Derives `self.name`.
    pub fn field(self, name: &str) -> Self {
        self.get(name)
    }

    /// Derives `self[index]`.
    pub fn at(self, index: usize) -> Self {
        self.get(index)
    }

    /// Derives a dotted path such as `props.name` or `rows.0.title`.
    ///
    /// Empty segments are skipped, so `path("")` is `self`.
    pub fn path(self, path: &str) -> Self {
        path.split('.')
            .filter(|part| !part.is_empty())
            .fold(self, |acc, part| acc.get(part))
    }

    /// Composes a post-processing step: the result evaluates to
    /// `f(self(frame))`.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::from_node(Node::Map(self, Arc::new(f)))
    }

    /// Evaluates this accessor `levels` sections further out.
    pub fn up(self, levels: usize) -> Self {
        if levels == 0 {
            return self;
        }
        Self::from_node(Node::Up(levels, self))
    }

    /// Evaluates this accessor against the directly enclosing section.
    pub fn parent(self) -> Self {
        self.up(1)
    }

    /// Evaluates against a scope, reading its innermost frame.
    ///
    /// With no frame in scope the element, index and source are all null.
    pub fn evaluate(&self, scope: &Scope<'_>) -> Value {
        self.resolve(scope).into_owned()
    }

    /// Like [`evaluate`](Self::evaluate), but borrows from the frames where
    /// the result is frame data, so element and source lookups do not copy.
    pub(crate) fn resolve<'s>(&self, scope: &Scope<'s>) -> Cow<'s, Value> {
        match &*self.node {
            Node::Element => scope
                .top()
                .map_or(Cow::Owned(Value::Null), |frame| Cow::Borrowed(frame.element())),
            Node::Index => Cow::Owned(
                scope
                    .top()
                    .and_then(Frame::index)
                    .map(Value::from)
                    .unwrap_or(Value::Null),
            ),
            Node::Source => scope
                .top()
                .and_then(Frame::source_value)
                .map_or(Cow::Owned(Value::Null), Cow::Borrowed),
            Node::Frame(f) => Cow::Owned(match scope.top() {
                Some(frame) => f(frame),
                None => f(&Frame::detached()),
            }),
            Node::Field(inner, segment) => match inner.resolve(scope) {
                Cow::Borrowed(base) => segment
                    .lookup(base)
                    .map_or(Cow::Owned(Value::Null), Cow::Borrowed),
                Cow::Owned(base) => {
                    Cow::Owned(segment.lookup(&base).cloned().unwrap_or(Value::Null))
                }
            },
            Node::Map(inner, f) => Cow::Owned(f(inner.resolve(scope).into_owned())),
            Node::Up(levels, inner) => inner.resolve(&scope.outer(*levels)),
        }
    }

    /// Evaluates against a single frame.
    pub fn call(&self, frame: &Frame) -> Value {
        self.evaluate(&Scope::new(std::slice::from_ref(frame)))
    }
}

impl Default for Accessor {
    fn default() -> Self {
        Self::item()
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.node {
            Node::Element => write!(f, "item"),
            Node::Index => write!(f, "index"),
            Node::Source => write!(f, "source"),
            Node::Frame(_) => write!(f, "fn"),
            Node::Field(inner, segment) => write!(f, "{:?}{}", inner, segment),
            Node::Map(inner, _) => write!(f, "{:?}(fn)", inner),
            Node::Up(levels, inner) => write!(f, "up({}).{:?}", levels, inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::rc::Rc;

    fn loop_frames(values: Vec<Value>) -> Vec<Frame> {
        let len = values.len();
        let source = Rc::new(Value::Array(values));
        (0..len)
            .map(|k| Frame::looped(source.clone(), k))
            .collect()
    }

    #[test]
    fn test_item_is_element() {
        let frame = Frame::conditional(json!("Moe"));
        assert_eq!(item().call(&frame), json!("Moe"));
    }

    #[test]
    fn test_field_chain() {
        let frame = Frame::conditional(json!({"a": {"b": 5}}));
        assert_eq!(item().field("a").field("b").call(&frame), json!(5));
        assert_eq!(item().path("a.b").call(&frame), json!(5));
    }

    #[test]
    fn test_missing_field_is_null() {
        let frame = Frame::conditional(json!({"a": 1}));
        assert_eq!(item().field("b").call(&frame), Value::Null);
        assert_eq!(item().field("a").field("b").call(&frame), Value::Null);
    }

    #[test]
    fn test_array_index() {
        let frame = Frame::conditional(json!(["Moe", "Howard"]));
        assert_eq!(item().at(1).call(&frame), json!("Howard"));
        assert_eq!(item().path("0").call(&frame), json!("Moe"));
    }

    #[test]
    fn test_map_composes() {
        let frame = Frame::conditional(json!(20));
        let double = item().map(|v| json!(v.as_i64().unwrap_or(0) * 2));
        assert_eq!(double.call(&frame), json!(40));

        let plus_one = double.map(|v| json!(v.as_i64().unwrap_or(0) + 1));
        assert_eq!(plus_one.call(&frame), json!(41));
    }

    #[test]
    fn test_field_then_map() {
        let frame = Frame::conditional(json!({"name": "Larry"}));
        let starred = item()
            .field("name")
            .map(|v| json!(format!("{}*", v.as_str().unwrap_or(""))));
        assert_eq!(starred.call(&frame), json!("Larry*"));
    }

    #[test]
    fn test_map_is_lazy_per_frame() {
        let frames = loop_frames(vec![json!(1), json!(2), json!(3)]);
        let squared = item().map(|v| json!(v.as_i64().unwrap_or(0).pow(2)));

        let results: Vec<Value> = frames.iter().map(|f| squared.call(f)).collect();
        assert_eq!(results, vec![json!(1), json!(4), json!(9)]);
    }

    #[test]
    fn test_index_and_source() {
        let frames = loop_frames(vec![json!("x0"), json!("x1"), json!("x2")]);

        for (k, frame) in frames.iter().enumerate() {
            assert_eq!(Accessor::index().call(frame), json!(k));
            assert_eq!(
                Accessor::source().call(frame),
                json!(["x0", "x1", "x2"])
            );
        }
    }

    #[test]
    fn test_source_lookups_borrow_frame_data() {
        let frames = loop_frames(vec![json!("x0"), json!({"name": "x1"})]);
        let scope = Scope::new(&frames[..1]);

        let source = Accessor::source().resolve(&scope);
        assert!(matches!(source, Cow::Borrowed(_)));
        assert!(std::ptr::eq(
            &*source,
            frames[0].source_value().unwrap()
        ));

        let name = Accessor::source().at(1).field("name").resolve(&scope);
        assert!(matches!(name, Cow::Borrowed(v) if v == &json!("x1")));

        let mapped = Accessor::source().map(|v| v).resolve(&scope);
        assert!(matches!(mapped, Cow::Owned(_)));
    }

    #[test]
    fn test_from_fn_sees_frame_components() {
        let frames = loop_frames(vec![json!("a"), json!("b")]);
        let describe = Accessor::from_fn(|frame| {
            json!(format!(
                "{}@{}/{}",
                frame.element().as_str().unwrap_or(""),
                frame.index().unwrap_or(0),
                frame.source().map_or(0, |s| s.len())
            ))
        });
        assert_eq!(describe.call(&frames[1]), json!("b@1/2"));
    }

    #[test]
    fn test_from_fn_then_field() {
        let frame = Frame::conditional(json!({"inner": {"v": 7}}));
        let accessor = Accessor::from_fn(|f| f.element()["inner"].clone()).field("v");
        assert_eq!(accessor.call(&frame), json!(7));
    }

    #[test]
    fn test_no_frame_is_null() {
        let scope = Scope::empty();
        assert_eq!(item().evaluate(&scope), Value::Null);
        assert_eq!(item().field("name").evaluate(&scope), Value::Null);
        assert_eq!(Accessor::index().evaluate(&scope), Value::Null);
    }

    #[test]
    fn test_up_reads_enclosing_frame() {
        let frames = vec![
            Frame::conditional(json!({"name": "outer"})),
            Frame::conditional(json!({"name": "inner"})),
        ];
        let scope = Scope::new(&frames);

        assert_eq!(item().field("name").evaluate(&scope), json!("inner"));
        assert_eq!(
            item().field("name").parent().evaluate(&scope),
            json!("outer")
        );
        assert_eq!(item().up(2).evaluate(&scope), Value::Null);
        assert_eq!(item().up(0).evaluate(&scope), json!({"name": "inner"}));
    }

    #[test]
    fn test_debug_shows_chain() {
        let accessor = item().field("props").field("name").map(|v| v);
        assert_eq!(format!("{:?}", accessor), "item.props.name(fn)");
        assert_eq!(format!("{:?}", item().at(2)), "item[2]");
        assert_eq!(format!("{:?}", item().parent()), "up(1).item");
    }

    #[test]
    fn test_accessor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Accessor>();
    }
}
