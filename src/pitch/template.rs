// src/pitch/template.rs

/// Hand-written message used when no backend produces a pitch.
/// Interpolates only the company name.
pub const FALLBACK_TEMPLATE: &str = "\
Subject: Quick question for the {{ company }} team

Hi {{ company }} team,

I've been following {{ company }} and wanted to reach out. Many growing teams \
lose hours every week to manual processes like lead qualification, customer \
follow-ups and repetitive back-office work.

We help companies like {{ company }} automate those workflows with AI, from lead \
generation to chatbots to end-to-end process automation, so your team can focus \
on the work that matters.

Would you be open to a quick 10-minute chat next week to see if this could help?

Best regards";

/// Substitute every `{{ key }}` placeholder in `template`, in the order given.
/// Unknown placeholders are left as-is.
pub fn render_str(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{ {} }}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

/// The deterministic fallback pitch for `company`
pub fn fallback_pitch(company: &str) -> String {
    let company = if company.trim().is_empty() { "your" } else { company.trim() };
    render_str(FALLBACK_TEMPLATE, &[("company", company)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_str_substitutes_all_occurrences() {
        let vars = [("name", "Globex")];
        assert_eq!(render_str("{{ name }} and {{ name }}", &vars), "Globex and Globex");
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let vars = [("name", "Globex")];
        assert_eq!(render_str("{{ other }}", &vars), "{{ other }}");
    }

    #[test]
    fn test_substitution_order_is_fixed() {
        let vars = [("text", "{{ name }}"), ("name", "Globex")];
        assert_eq!(render_str("{{ text }}", &vars), "Globex");

        let vars = [("name", "Globex"), ("text", "{{ name }}")];
        assert_eq!(render_str("{{ text }}", &vars), "{{ name }}");
    }

    #[test]
    fn test_fallback_pitch_names_the_company() {
        let pitch = fallback_pitch("Globex");
        assert!(pitch.contains("Hi Globex team"));
        assert!(!pitch.contains("{{"));
        assert!(pitch.split_whitespace().count() <= 150);
    }

    #[test]
    fn test_fallback_pitch_never_empty() {
        assert!(!fallback_pitch("").trim().is_empty());
        assert!(!fallback_pitch("   ").contains("{{"));
    }
}
