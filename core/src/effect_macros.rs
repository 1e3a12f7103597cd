//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block is wrapped in `async move`, so captured values must be owned.
///
/// # Example
///
/// ```
/// use userdesk_core::async_effect;
/// use userdesk_core::effect::Effect;
///
/// let token = String::from("abc");
/// let effect: Effect<String> = async_effect! {
///     Some(token)
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
