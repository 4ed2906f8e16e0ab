/// Marker placed between the instruction prefix and the user's text
pub const USER_QUESTION_MARKER: &str = "User question: ";

/// Instruction prefix for the medical-assistant persona.
///
/// It already ends with its own invitation; the marker is still appended after it.
pub const DEFAULT_INSTRUCTION_PREFIX: &str = "You are PEARL, an AI medical assistant. \
Answer in 2-3 sentences max. Use bullet points if needed. Bold key terms with **text**. \
Never diagnose. Always advise consulting a doctor. User question:";

/// The full text sent to the backend for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload<'a> {
    pub instruction_prefix: &'a str,
    pub user_text: &'a str,
}

impl<'a> PromptPayload<'a> {
    pub fn new(instruction_prefix: &'a str, user_text: &'a str) -> Self {
        Self {
            instruction_prefix,
            user_text,
        }
    }

    /// Literal join: prefix, marker, then the user's text. No templating.
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            self.instruction_prefix.len() + USER_QUESTION_MARKER.len() + self.user_text.len(),
        );
        prompt.push_str(self.instruction_prefix);
        prompt.push_str(USER_QUESTION_MARKER);
        prompt.push_str(self.user_text);
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_joins_literally() {
        let payload = PromptPayload::new("Be brief. ", "what is a fever?");
        assert_eq!(payload.build(), "Be brief. User question: what is a fever?");
    }

    #[test]
    fn test_default_prefix_repeats_marker() {
        let prompt = PromptPayload::new(DEFAULT_INSTRUCTION_PREFIX, "hi").build();
        assert!(prompt.ends_with("Always advise consulting a doctor. User question:User question: hi"));
    }

    #[test]
    fn test_empty_prefix() {
        assert_eq!(PromptPayload::new("", "x").build(), "User question: x");
    }
}
