//! Generic traversal over untyped JSON trees
//!
//! Artifact documents come from several producer versions and their shapes drift.
//! Extractors therefore never deserialize into fixed structs; they walk the raw
//! [`Value`] tree with a [`Visitor`] that decides, per object entry, whether to
//! descend and with which context.

use serde_json::{Map, Value};

/// Decision returned for each object entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Walk<C> {
    /// Visit the entry's value with the given context.
    Descend(C),
    /// Skip the entry's value entirely.
    Prune,
}

/// Callbacks invoked by [`walk`].
///
/// All methods have defaults, so a visitor only implements what it needs.
/// Array elements inherit the context of the array itself.
pub trait Visitor<'v> {
    type Context: Clone;

    /// Called for every object before any of its entries.
    fn object(&mut self, _map: &'v Map<String, Value>, _ctx: &Self::Context) {}

    /// Called for every entry of an object, in document order.
    fn entry(
        &mut self,
        _key: &'v str,
        _value: &'v Value,
        ctx: &Self::Context,
    ) -> Walk<Self::Context> {
        Walk::Descend(ctx.clone())
    }

    /// Called for every string, number, boolean and null.
    fn scalar(&mut self, _value: &'v Value, _ctx: &Self::Context) {}
}

/// Pre-order walk over `value`.
///
/// Every node is visited exactly once per path. Input is plain JSON, so there are
/// no cycles to guard against.
pub fn walk<'v, V>(value: &'v Value, ctx: &V::Context, visitor: &mut V)
where
    V: Visitor<'v> + ?Sized,
{
    match value {
        Value::Object(map) => {
            visitor.object(map, ctx);
            for (key, nested) in map {
                if let Walk::Descend(child_ctx) = visitor.entry(key, nested, ctx) {
                    walk(nested, &child_ctx, visitor);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, ctx, visitor);
            }
        }
        scalar => visitor.scalar(scalar, ctx),
    }
}

/// Return the first `Some` produced by `f` over the object nodes of `value`, in pre-order.
pub fn find_map<'v, T, F>(value: &'v Value, mut f: F) -> Option<T>
where
    F: FnMut(&'v Map<String, Value>) -> Option<T>,
{
    struct FindMap<F, T> {
        f: F,
        found: Option<T>,
    }

    impl<'v, F, T> Visitor<'v> for FindMap<F, T>
    where
        F: FnMut(&'v Map<String, Value>) -> Option<T>,
    {
        type Context = ();

        fn object(&mut self, map: &'v Map<String, Value>, _ctx: &()) {
            if self.found.is_none() {
                self.found = (self.f)(map);
            }
        }

        fn entry(&mut self, _key: &'v str, _value: &'v Value, _ctx: &()) -> Walk<()> {
            if self.found.is_some() {
                Walk::Prune
            } else {
                Walk::Descend(())
            }
        }
    }

    let mut finder = FindMap { f: &mut f, found: None };
    walk(value, &(), &mut finder);
    finder.found
}
