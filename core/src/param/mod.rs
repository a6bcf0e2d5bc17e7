//! Bind parameters and the per-compile parameter binder.
//!
//! Parameter names are produced by [`ParamBinder`] from the axis name, the
//! entry's position in that axis, and a counter scoped to one compile, so a
//! field referenced by several axes never collides with itself.

use compact_str::{CompactString, format_compact};
use hashbrown::HashMap;
use sieve_types::Value;

/// A SQL parameter that associates a value with a unique name.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The name of the parameter, unique within one compile.
    pub name: CompactString,
    /// The value to bind
    pub value: Value,
}

impl Param {
    pub fn new(name: impl Into<CompactString>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Name to value map of every parameter generated by one compile.
pub type ParamMap = HashMap<CompactString, Value>;

/// Generates collision-free parameter names for a single compile.
///
/// ```
/// use sieve_core::param::ParamBinder;
/// use sieve_core::Value;
///
/// let mut binder = ParamBinder::new();
/// let a = binder.bind("filter", 0, Value::from("active"));
/// let b = binder.bind("filter", 0, Value::from("pending"));
/// assert_eq!(a.name, "filter_0_1");
/// assert_eq!(b.name, "filter_0_2");
/// assert_eq!(binder.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ParamBinder {
    seq: usize,
    params: ParamMap,
}

impl ParamBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` under a fresh name derived from `axis` and `index`.
    pub fn bind(&mut self, axis: &str, index: usize, value: Value) -> Param {
        self.seq += 1;
        let name = format_compact!("{}_{}_{}", axis, index, self.seq);
        self.params.insert(name.clone(), value.clone());
        Param { name, value }
    }

    /// Binds every value of `values` under the same axis and index.
    pub fn bind_all<I>(&mut self, axis: &str, index: usize, values: I) -> Vec<Param>
    where
        I: IntoIterator<Item = Value>,
    {
        values
            .into_iter()
            .map(|value| self.bind(axis, index, value))
            .collect()
    }

    /// Number of parameters generated so far.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Consumes the binder, returning the accumulated name to value map.
    pub fn finish(self) -> ParamMap {
        self.params
    }
}
