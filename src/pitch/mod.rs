mod backend;
mod generator;
mod prompt;
mod template;

pub use backend::{BackendError, GenerationBackend, GeminiBackend};
pub use generator::{Pitch, PitchOrigin, PitchGenerator};
pub use prompt::build_prompt;
pub use template::{fallback_pitch, render_str, FALLBACK_TEMPLATE};

#[cfg(test)]
pub use backend::MockGenerationBackend;
