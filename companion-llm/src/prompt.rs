//! Prompt assembly for the remote completion service.
//!
//! The system instruction is built from three parts supplied by the caller:
//! the persona's self-description, a speech-style instruction and, on turns
//! where the companion should take initiative, a directive telling the model
//! to do so. A fixed brevity rule always closes it.

use crate::types::ChatMessage;

/// Closing rule of every system instruction.
pub const BREVITY_RULE: &str = "Answer briefly, 1-2 sentences maximum.";

/// Layout of the system instruction.
pub const SYSTEM_TEMPLATE: &str = "{persona} {style}{directive} {brevity}";

/// Replace `{key}` placeholders in `template`. Unknown placeholders are left as-is.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Build the system instruction for one turn.
#[must_use]
pub fn system_instruction(persona: &str, style: &str, directive: Option<&str>) -> String {
    let directive = directive.map(|d| format!(" {d}")).unwrap_or_default();
    render_template(
        SYSTEM_TEMPLATE,
        &[
            ("persona", persona),
            ("style", style),
            ("directive", &directive),
            ("brevity", BREVITY_RULE),
        ],
    )
}

/// The full request: system instruction first, then the conversation so far.
#[must_use]
pub fn build_messages(system: String, history: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system));
    messages.extend_from_slice(history);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn template_rendering_works() {
        let rendered = render_template(
            "Hello {name}, you are {age}.",
            &[("name", "Alice"), ("age", "23")],
        );
        assert_eq!(rendered, "Hello Alice, you are 23.");
    }

    #[test]
    fn template_handles_missing_vars() {
        let rendered = render_template("Hello {name}, {unknown}.", &[("name", "Alice")]);
        assert_eq!(rendered, "Hello Alice, {unknown}.");
    }

    #[test]
    fn instruction_without_directive() {
        let text = system_instruction("You are Alice.", "Be nice.", None);
        assert_eq!(text, "You are Alice. Be nice. Answer briefly, 1-2 sentences maximum.");
    }

    #[test]
    fn instruction_with_directive() {
        let text = system_instruction("You are Alice.", "Be nice.", Some("Ask something."));
        assert_eq!(
            text,
            "You are Alice. Be nice. Ask something. Answer briefly, 1-2 sentences maximum."
        );
    }

    #[test]
    fn system_message_leads_the_request() {
        let history = [ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let messages = build_messages("sys".into(), &history);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[2], ChatMessage::assistant("hello"));
    }
}
