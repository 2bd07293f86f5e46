// Shared prompt constants and prompt-building utilities.
// Each module that calls the LLM defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System fragment appended to every forced-tool extraction call. The tool
/// schema already constrains the shape; this keeps models from narrating
/// around the call.
pub const TOOL_DISCIPLINE: &str = "\
    You MUST respond by invoking the provided tool exactly once with your \
    extracted values. Do NOT answer in prose. Do NOT call the tool more \
    than once. If a field cannot be determined from the input, supply the \
    most conservative value the schema allows rather than guessing high.";
