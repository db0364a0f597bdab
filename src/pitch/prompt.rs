//! Prompt construction. Deterministic for a given target, research result and persona.

use crate::config::PitchConfig;
use crate::research::{ResearchResult, ResolvedTarget};
use super::template::render_str;

const SCRAPED_PROMPT: &str = "\
ACT AS: A {{ sender_role }} for '{{ sender_company }}'.
TARGET: {{ company }} ({{ website }})
CONTEXT: We sell {{ value_proposition }}.

WEBSITE DATA:
{{ website_data }}

TASK: Write a personalized cold email to the Founder of {{ company }}.
1. Hook: Mention a specific, concrete detail taken from the website data above.
2. Pain Point: Ask if manual processes are slowing them down.
3. Solution: Briefly pitch how {{ sender_company }} can automate their workflows.
4. CTA: Ask for a 10-min chat.

CONSTRAINT: Keep it under {{ word_limit }} words. No fluff.";

const INFERRED_PROMPT: &str = "\
ACT AS: A {{ sender_role }} for '{{ sender_company }}'.
TARGET: {{ company }} ({{ website }})
CONTEXT: We sell {{ value_proposition }}.

BACKGROUND NOTE (internal, never quote it):
{{ website_data }}

TASK: Write a personalized cold email to the Founder of {{ company }}.
1. Hook: Use what you generally know about {{ company }}, its industry and the \
problems companies like it face.
2. Pain Point: Ask if manual processes are slowing them down.
3. Solution: Briefly pitch how {{ sender_company }} can automate their workflows.
4. CTA: Ask for a 10-min chat.

RULES: Write with the same confidence as if you had studied their website. \
Never mention that their website could not be accessed, was blocked, or that \
any research failed.

CONSTRAINT: Keep it under {{ word_limit }} words. No fluff.";

/// Build the generation prompt for one lead
pub fn build_prompt(target: &ResolvedTarget, research: &ResearchResult, persona: &PitchConfig) -> String {
    let template = if research.source_kind.is_scraped() {
        SCRAPED_PROMPT
    } else {
        INFERRED_PROMPT
    };

    let word_limit = persona.word_limit.to_string();

    // page text goes last so placeholders inside it are never expanded
    render_str(
        template,
        &[
            ("sender_role", persona.sender_role.as_str()),
            ("sender_company", persona.sender_company.as_str()),
            ("value_proposition", persona.value_proposition.as_str()),
            ("word_limit", word_limit.as_str()),
            ("company", target.display_name.as_str()),
            ("website", target.target_url.as_str()),
            ("website_data", research.raw_text.as_str()),
        ],
    )
}
