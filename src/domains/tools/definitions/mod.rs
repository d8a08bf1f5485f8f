//! Tool definitions - one file per tool.

mod get_prompt_text;
mod get_prompts;

pub use get_prompt_text::GetPromptTextTool;
pub use get_prompts::GetPromptsTool;
