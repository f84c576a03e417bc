/// Truncation bound for pasted source text forwarded to the model.
const MAX_SOURCE_CHARS: usize = 4000;

pub const QUESTION_GENERATOR_ROLE: &str = "You are an expert quiz question generator for an education platform. You turn source material supplied by a teacher into multiple-choice questions that test understanding of that material.

### Core Objectives:

1. **Grounded Questions:** Every question must be answerable from the supplied text alone; do not rely on outside knowledge.
2. **Plausible Distractors:** Each question carries one correct answer and three incorrect options that are plausible but clearly wrong given the text.
3. **Concise Explanations:** Provide a brief explanation (at most 30 words) of why the correct answer is correct.
4. **Output Completion:** Produce structured output only. Do not include any prose or commentary beyond what has been specified.

### Output Specifications:

Return ONLY a valid JSON array, no markdown and no extra text, with this exact structure:

[
  {
    \"questionText\": \"Question here?\",
    \"correctAnswer\": \"The correct answer\",
    \"option2\": \"Incorrect option 1\",
    \"option3\": \"Incorrect option 2\",
    \"option4\": \"Incorrect option 3\",
    \"explanation\": \"Brief explanation here\"
  }
]";

pub fn build_generation_prompt(source_text: &str, category: &str, count: u8) -> String {
    let truncated: String = source_text.chars().take(MAX_SOURCE_CHARS).collect();

    format!(
        "Generate exactly {count} multiple-choice questions for the category \"{category}\" from the following text.\n\nTEXT:\n{truncated}\n\nREQUIREMENTS:\n- Generate exactly {count} questions\n- Each question must have exactly 4 options\n- One option must be correct, three must be plausible but incorrect distractors\n- Include a brief explanation (max 30 words) for each correct answer"
    )
}
