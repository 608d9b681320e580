use crate::domain::model::{Explanation, FewShotExample};

const INSTRUCTION_BLOCK: &str = r#"You are an expert Python debugging assistant.

Your job is to explain Python error messages clearly for beginners, suggest a fix, and provide up to 3 helpful documentation links.

Always respond with a raw JSON object in the following format (no markdown, no code blocks):

{
  "error_type": "...",
  "explanation": "...",
  "suggested_fix": "...",
  "relevant_links": ["...", "...", "..."]
}

Think through the problem step-by-step before responding, but only output the final JSON.

"#;

/// Model families that follow few-shot examples well. Others only get the instructions.
const FEW_SHOT_MODEL_KEYWORDS: &[&str] = &["deepseek", "gemini"];

pub fn default_examples() -> Vec<FewShotExample> {
    vec![
        FewShotExample {
            input: "TypeError: unsupported operand type(s) for +: 'int' and 'str'".to_string(),
            output: Explanation {
                error_type: "TypeError".to_string(),
                explanation:
                    "You tried to add an integer and a string, which Python does not allow."
                        .to_string(),
                suggested_fix:
                    "Convert the integer or the string using int() or str() before adding."
                        .to_string(),
                relevant_links: vec![
                    "https://stackoverflow.com/questions/25675943/how-can-i-concatenate-str-and-int-objects".to_string(),
                ],
            },
        },
        FewShotExample {
            input: "IndexError: list index out of range".to_string(),
            output: Explanation {
                error_type: "IndexError".to_string(),
                explanation: "You tried to access a position in a list that doesn't exist."
                    .to_string(),
                suggested_fix:
                    "Make sure your index is within the bounds of the list (0 to len(list)-1)."
                        .to_string(),
                relevant_links: vec![
                    "https://docs.python.org/3/library/exceptions.html#IndexError".to_string(),
                ],
            },
        },
    ]
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    examples: Vec<FewShotExample>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(default_examples())
    }
}

impl PromptBuilder {
    pub fn new(examples: Vec<FewShotExample>) -> Self {
        Self { examples }
    }

    pub fn uses_few_shot(model: &str) -> bool {
        let model = model.to_lowercase();
        FEW_SHOT_MODEL_KEYWORDS.iter().any(|k| model.contains(k))
    }

    pub fn build(&self, error: &str, model: &str) -> String {
        let mut prompt = String::from(INSTRUCTION_BLOCK);

        if Self::uses_few_shot(model) {
            prompt.push_str(&self.few_shot_block());
        }

        prompt.push_str(&format!("Now explain this error:\n\nInput:\n{}\n", error));
        prompt
    }

    fn few_shot_block(&self) -> String {
        let mut block = String::new();
        for example in &self.examples {
            let output = serde_json::to_string_pretty(&example.output).unwrap_or_default();
            block.push_str(&format!(
                "Example:\n\nInput:\n{}\n\nOutput:\n{}\n\n",
                example.input, output
            ));
        }
        block
    }
}

pub fn build_prompt(error: &str, model: &str) -> String {
    PromptBuilder::default().build(error, model)
}
