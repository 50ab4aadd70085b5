//! Stack growth for deeply nested evaluation.
//!
//! Command calls recurse through coercions, handler bodies and argument
//! binding, so nesting depth in the source tree turns directly into native
//! stack depth. On native targets `stacker` grows the stack on demand.

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    // 128KB red zone, grown in 2MB segments: one command call spans several frames.
    const RED_ZONE: usize = 128 * 1024;
    const GROWTH: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// wasm32 manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
