//! Tracing utilities for compile observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site. When disabled, the arguments are still borrowed, so
//! bindings that only feed a log event count as used.

/// Emit a debug-level tracing event summarising one compile.
///
/// ```ignore
/// sieve_trace_compile!(entity.name, predicates, params.len());
/// ```
#[macro_export]
macro_rules! sieve_trace_compile {
    ($entity:expr, $predicates:expr, $param_count:expr) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!(
            entity = %$entity,
            predicates = $predicates,
            params = $param_count,
            "sieve.compile"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (&$entity, &$predicates, &$param_count);
    }};
}

/// Emit a debug-level tracing event for an axis entry that was left inert.
///
/// ```ignore
/// sieve_trace_skip!("filter_nested", path, "unknown relation");
/// ```
#[macro_export]
macro_rules! sieve_trace_skip {
    ($axis:expr, $field:expr, $reason:literal) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!(axis = $axis, field = %$field, reason = $reason, "sieve.skip");
        #[cfg(not(feature = "tracing"))]
        let _ = (&$axis, &$field);
    }};
}

/// Emit a debug-level tracing event with a rendered statement.
#[macro_export]
macro_rules! sieve_trace_statement {
    ($kind:literal, $statement:expr) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!(
            kind = $kind,
            sql = %$statement.sql,
            params = $statement.params.len(),
            "sieve.statement"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = &$statement;
    }};
}

#[cfg(test)]
mod tests {
    use crate::sql::SQL;
    use sieve_types::Dialect;

    #[test]
    #[deny(unused_variables)]
    fn log_only_bindings_are_used() {
        let entity = "user";
        let active = 2usize;
        let axis = "filter";
        let statement = SQL::raw("SELECT 1").render(Dialect::SQLite);

        sieve_trace_compile!(entity, active, 0usize);
        sieve_trace_skip!(axis, entity, "unknown relation");
        sieve_trace_statement!("rows", statement);
    }
}
