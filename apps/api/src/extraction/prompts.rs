// All LLM prompt constants for the extraction module.
// Cross-cutting tool discipline lives in llm_client::prompts.

/// System prompt for resume → candidate profile extraction.
pub const RESUME_EXTRACT_SYSTEM: &str = "\
    You are a precise resume analyst for a job-application platform. \
    Extract a structured candidate profile from raw resume text. \
    Classify honestly — never inflate seniority or invent skills the \
    resume does not support.";

/// Resume extraction prompt template. Replace `{resume_text}` before sending.
pub const RESUME_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the candidate profile from the resume below.

Rules:
- categories: up to 3 business categories, ordered by relevance. The FIRST entry must be the candidate's strongest domain.
- experience_level: exactly one of intern, junior, mid, senior, lead, principal. Judge from scope of responsibility, not job titles alone.
- years_experience: total professional years, 0-50. Count overlapping positions once.
- tags: concrete skills, technologies, and competencies as lowercase keywords (e.g. "python", "account management"). No sentences.
- confidence_score: 0.0-1.0 — how well the resume supports your extraction. Sparse or garbled text means low confidence.

RESUME:
{resume_text}"#;

/// System prompt for role → requirement analysis.
pub const ROLE_ANALYZE_SYSTEM: &str = "\
    You are a precise hiring-requirements analyst for a job-application \
    platform. Extract the structured requirements a role posting implies. \
    Derive requirements only from the posting text — never pad the skill \
    list with generic filler.";

/// Role analysis prompt template. Replace `{title}` and `{description}`.
pub const ROLE_ANALYZE_PROMPT_TEMPLATE: &str = r#"Extract the hiring requirements from the role posting below.

Rules:
- experience_level: exactly one of intern, junior, mid, senior, lead, principal.
- years_min / years_max: the experience range the posting asks for, years_min <= years_max. Use 0 for years_min when no minimum is stated.
- short_description: a neutral one-or-two sentence summary of the role, at most 200 characters.
- tags: the skills the posting actually requires, as lowercase keywords, at most 15.
- confidence_score: 0.0-1.0 — how explicit the posting is about its requirements.

ROLE TITLE:
{title}

ROLE DESCRIPTION:
{description}"#;
