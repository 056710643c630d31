pub mod desk;
pub mod gemini;
pub mod traits;

pub use desk::AdviceDesk;
pub use gemini::{GeminiAdvisor, GeminiSettings};
pub use traits::AdviceService;
