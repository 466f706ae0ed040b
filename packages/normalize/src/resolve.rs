use pagekit_document::{is_multi_breakpoint, Breakpoint, Value};

static UNDEFINED: Value = Value::Undefined;

/// Effective value of `value` at the `active` breakpoint.
///
/// Plain values come back unchanged. For a multi-breakpoint value the keys
/// are scanned from `active` up to `xlg`; the first key that is present and
/// not `undefined` wins (`null` counts as set). Smaller breakpoints are never
/// consulted. With nothing set through `xlg` the result is `undefined`.
pub fn resolve(value: &Value, active: Breakpoint) -> &Value {
    let Value::Object(map) = value else {
        return value;
    };
    if !is_multi_breakpoint(value) {
        return value;
    }

    active
        .cascade()
        .find_map(|bp| match map.get(bp.storage_key()) {
            None | Some(Value::Undefined) => None,
            Some(found) => Some(found),
        })
        .unwrap_or(&UNDEFINED)
}
