/// A deterministic model that turns an input into an output.
///
/// A `Component` must always produce the same result for the same input and
/// must not retain state between calls, so a single instance can be shared
/// freely across threads.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
/// use marea_core::Component;
///
/// struct TotalVolume;
///
/// impl Component for TotalVolume {
///     type Input = (f64, f64);
///     type Output = f64;
///     type Error = Infallible;
///
///     fn call(&self, (rate, minutes): (f64, f64)) -> Result<f64, Self::Error> {
///         Ok(rate * minutes)
///     }
/// }
///
/// assert_eq!(TotalVolume.call((50.0, 60.0)).unwrap(), 3000.0);
/// ```
pub trait Component {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the component with the given input.
    ///
    /// # Errors
    ///
    /// Each component defines its own `Error` type, allowing it to determine
    /// what constitutes a failure within its domain.
    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error>;
}
