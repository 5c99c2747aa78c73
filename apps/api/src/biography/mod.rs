// Biography pipeline: prompt compilation, generation orchestration and
// output interpretation. All LLM calls go through llm_client — no direct
// OpenAI calls here.

pub mod compiler;
pub mod generator;
pub mod handlers;
pub mod prompts;
