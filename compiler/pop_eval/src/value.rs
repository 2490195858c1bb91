//! The content value model.
//!
//! Every piece of host content is normalized into [`ContentValue`] before
//! the renderer sees it, so rendering is a `match` over a closed set of
//! variants rather than shape sniffing.
//!
//! Values are cheap to clone (`Arc` inside) and `Send + Sync`, so one
//! content tree can feed renders on several threads.

mod json;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::options::Options;
use crate::renderer::Enclosing;
use crate::scope::Scope;

/// A computed tag: `fn(options, enclosing, scope) -> value`.
pub type CallableFn = dyn Fn(&Options, &Enclosing<'_>, &Scope) -> ContentValue + Send + Sync;

/// Produces pre-escaped HTML for an object rendered as a self-closing tag.
pub type HtmlFn = dyn Fn(&Options) -> Option<String> + Send + Sync;

/// Dynamic property source consulted after an object's own fields.
pub type LookupFn = dyn Fn(&str) -> Option<ContentValue> + Send + Sync;

/// Any content a tag can resolve to.
#[derive(Clone, Default)]
pub enum ContentValue {
    /// Not present at all.
    #[default]
    Missing,
    /// Present but null.
    Null,
    Bool(bool),
    Number(f64),
    String(Arc<str>),
    Array(Arc<[ContentValue]>),
    Callable(Callable),
    Object(Arc<ObjectValue>),
}

/// Shared handle to a host function.
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    pub fn new(
        f: impl Fn(&Options, &Enclosing<'_>, &Scope) -> ContentValue + Send + Sync + 'static,
    ) -> Self {
        Callable(Arc::new(f))
    }

    pub fn call(&self, options: &Options, enclosing: &Enclosing<'_>, scope: &Scope) -> ContentValue {
        (self.0)(options, enclosing, scope)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<callable>")
    }
}

/// Result of asking a value for one of its properties.
#[derive(Clone, Debug)]
pub enum Property {
    /// An own property (or one supplied by the lookup override).
    Found(ContentValue),
    /// The name exists only on the prototype chain: it hides outer scopes
    /// but resolves to nothing.
    Shadowed,
    /// The value knows nothing about the name.
    Absent,
}

impl ContentValue {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        ContentValue::String(s.into())
    }

    pub fn array(items: impl IntoIterator<Item = impl Into<ContentValue>>) -> Self {
        ContentValue::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn function(
        f: impl Fn(&Options, &Enclosing<'_>, &Scope) -> ContentValue + Send + Sync + 'static,
    ) -> Self {
        ContentValue::Callable(Callable::new(f))
    }

    pub fn object(object: ObjectValue) -> Self {
        ContentValue::Object(Arc::new(object))
    }

    /// Whether this value counts as present for `no_` tags and for
    /// boolean dispatch.
    ///
    /// Empty strings and empty arrays are absent; `0` is present.
    /// Callables must be resolved before asking.
    pub fn is_present(&self) -> bool {
        match self {
            ContentValue::Missing | ContentValue::Null => false,
            ContentValue::Bool(b) => *b,
            ContentValue::String(s) => !s.is_empty(),
            ContentValue::Array(items) => !items.is_empty(),
            ContentValue::Number(_) | ContentValue::Callable(_) | ContentValue::Object(_) => true,
        }
    }

    /// Scalar text of strings and numbers.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ContentValue::String(s) => Some(s.to_string()),
            ContentValue::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }

    /// True for the variants bound as `value` inside a repetition.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ContentValue::String(_) | ContentValue::Number(_) | ContentValue::Bool(_)
        )
    }

    /// Look up a property on this value.
    pub fn property(&self, name: &str) -> Property {
        match self {
            ContentValue::Object(object) => object.property(name),
            _ => Property::Absent,
        }
    }

    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentValue::Missing => "missing",
            ContentValue::Null => "null",
            ContentValue::Bool(_) => "bool",
            ContentValue::Number(_) => "number",
            ContentValue::String(_) => "string",
            ContentValue::Array(_) => "array",
            ContentValue::Callable(_) => "callable",
            ContentValue::Object(_) => "object",
        }
    }
}

/// Render a number the way people write it: integers without a fraction.
pub fn format_number(n: f64) -> String {
    // 2^53: beyond this f64 no longer holds every integer exactly.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT {
        #[allow(clippy::cast_possible_truncation)]
        let int = n as i64;
        int.to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Debug for ContentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentValue::Missing => f.write_str("Missing"),
            ContentValue::Null => f.write_str("Null"),
            ContentValue::Bool(b) => write!(f, "Bool({b})"),
            ContentValue::Number(n) => write!(f, "Number({n})"),
            ContentValue::String(s) => write!(f, "String({s:?})"),
            ContentValue::Array(items) => f.debug_list().entries(items.iter()).finish(),
            ContentValue::Callable(c) => fmt::Debug::fmt(c, f),
            ContentValue::Object(o) => fmt::Debug::fmt(o, f),
        }
    }
}

/// A mapping of named fields, optionally with an HTML producer, a
/// prototype, and a dynamic lookup.
#[derive(Clone, Default)]
pub struct ObjectValue {
    fields: FxHashMap<String, ContentValue>,
    prototype: Option<Arc<ObjectValue>>,
    html: Option<Arc<HtmlFn>>,
    lookup: Option<Arc<LookupFn>>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ContentValue>) {
        self.fields.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<ContentValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inherit from `prototype`. Inherited names shadow outer scopes but
    /// never resolve to a value.
    #[must_use]
    pub fn with_prototype(mut self, prototype: ObjectValue) -> Self {
        self.prototype = Some(Arc::new(prototype));
        self
    }

    /// Render as `f(options)` when used as a self-closing tag.
    #[must_use]
    pub fn with_html(mut self, f: impl Fn(&Options) -> Option<String> + Send + Sync + 'static) -> Self {
        self.html = Some(Arc::new(f));
        self
    }

    /// Resolve names missing from the own fields through `f`.
    #[must_use]
    pub fn with_lookup(
        mut self,
        f: impl Fn(&str) -> Option<ContentValue> + Send + Sync + 'static,
    ) -> Self {
        self.lookup = Some(Arc::new(f));
        self
    }

    /// An own field, ignoring the lookup override and prototype.
    pub fn get(&self, name: &str) -> Option<&ContentValue> {
        self.fields.get(name)
    }

    pub fn html(&self) -> Option<&HtmlFn> {
        self.html.as_deref()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn inherits(&self, name: &str) -> bool {
        let mut proto = self.prototype.as_deref();
        while let Some(object) = proto {
            if object.fields.contains_key(name) {
                return true;
            }
            proto = object.prototype.as_deref();
        }
        false
    }

    pub fn property(&self, name: &str) -> Property {
        if let Some(value) = self.fields.get(name) {
            return Property::Found(value.clone());
        }
        if let Some(value) = self.lookup.as_ref().and_then(|lookup| lookup(name)) {
            return Property::Found(value);
        }
        if self.inherits(name) {
            return Property::Shadowed;
        }
        Property::Absent
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        let mut map = f.debug_map();
        for name in names {
            map.entry(&name, &self.fields[name]);
        }
        if self.html.is_some() {
            map.entry(&"<html>", &"<producer>");
        }
        map.finish()
    }
}

impl<K: Into<String>, V: Into<ContentValue>> FromIterator<(K, V)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = ObjectValue::new();
        for (k, v) in iter {
            object.insert(k, v);
        }
        object
    }
}

impl From<&str> for ContentValue {
    fn from(s: &str) -> Self {
        ContentValue::String(s.into())
    }
}

impl From<String> for ContentValue {
    fn from(s: String) -> Self {
        ContentValue::String(s.into())
    }
}

impl From<bool> for ContentValue {
    fn from(b: bool) -> Self {
        ContentValue::Bool(b)
    }
}

impl From<f64> for ContentValue {
    fn from(n: f64) -> Self {
        ContentValue::Number(n)
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ContentValue {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(n: $ty) -> Self {
                    ContentValue::Number(n as f64)
                }
            }
        )*
    };
}

from_int!(i32, i64, u32, u64, usize);

impl From<ObjectValue> for ContentValue {
    fn from(object: ObjectValue) -> Self {
        ContentValue::object(object)
    }
}

impl From<Callable> for ContentValue {
    fn from(callable: Callable) -> Self {
        ContentValue::Callable(callable)
    }
}

impl<T: Into<ContentValue>> From<Vec<T>> for ContentValue {
    fn from(items: Vec<T>) -> Self {
        ContentValue::array(items)
    }
}

impl<T: Into<ContentValue>> From<Option<T>> for ContentValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ContentValue::Null, Into::into)
    }
}
