use thiserror::Error;

use crate::command::AnimationName;

/// Errors surfaced by the show pipeline.
///
/// None of these abort rendering: the render context degrades to keeping the
/// previous state and reports the condition to whoever asked for the change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShowError {
    /// No animation is registered under this name.
    #[error("unknown animation `{0}`")]
    InvalidAnimationName(AnimationName),
    /// The parameter document was malformed; defaults were used instead.
    #[error("animation parameters could not be parsed")]
    ParamParseFailure,
    /// The command queue was full and the command was dropped.
    #[error("show command queue is full")]
    ChannelFull,
    /// A pixel access fell outside the surface.
    #[error("pixel index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A text field does not fit into its bounded command slot.
    #[error("{field} exceeds {max} bytes")]
    TooLong { field: &'static str, max: usize },
}
