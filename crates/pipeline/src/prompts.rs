//! Instruction templates for the three stages.
//!
//! Each template interpolates exactly one input: the topic for the
//! researcher, the research notes for the writer and the draft for the editor.

use crate::StageId;

/// Builds the prompt `stage` sends for `input`.
pub fn render(stage: StageId, input: &str) -> String {
    match stage {
        StageId::Researcher => research(input),
        StageId::Writer => draft(input),
        StageId::Editor => edit(input),
    }
}

fn research(topic: &str) -> String {
    format!(
        "You are an expert technology researcher. Your task is to research and gather relevant \
information on the following topic: {topic}

STRICT INSTRUCTIONS:
- Provide ONLY the research content, with no introduction or meta commentary
- Do NOT write phrases such as \"Here is...\", \"Below...\", \"I have researched...\"
- Start directly with the research content

Provide:
1. A clear description of the topic
2. Important data and statistics (if applicable)
3. Current related trends
4. Use cases or practical applications
5. Reliable sources of information (references may be simulated)

The information must be accurate, current, objective and structured so that a writer can \
produce a professional blog article from it.
"
    )
}

fn draft(research: &str) -> String {
    format!(
        "You are an expert technology writer. You have received the following research:

{research}

STRICT INSTRUCTIONS:
- Write ONLY the article, with no meta introduction or personal comments
- Do NOT write phrases such as \"Here is the article...\", \"I have created...\", \"Below I present...\"
- Start directly with the article TITLE
- Keep a serious, professional and objective tone
- Avoid overly casual language or exaggerated expressions

Write a blog article with:
1. A clear and relevant title (no asterisks or special symbols)
2. A professional introduction presenting the topic
3. Content developed in clear sections with subheadings
4. Practical examples or use cases
5. A conclusion summarising the key points
6. A professional, technical tone suitable for a business blog

Length: between 800 and 1200 words
Style: professional, serious technology blog

Write the complete article now:
"
    )
}

fn edit(draft: &str) -> String {
    format!(
        "You are a professional editor specialising in technology content. You have received the \
following draft:

{draft}

STRICT INSTRUCTIONS:
- Return ONLY the edited article, with no meta comments or introductions
- Do NOT write phrases such as \"Here is the edited article...\", \"I have reviewed...\", \"Below...\"
- Start directly with the edited article
- If the draft contains meta introductions, remove them completely
- Keep a serious, professional and objective tone

Your task is to:
1. Remove any meta or introductory text that is not part of the article
2. Fix spelling and grammar mistakes
3. Improve the coherence and flow of the text
4. Ensure the style is consistent and professional
5. Check that the structure is clear and logical
6. Optimise the title and subheadings for SEO (no asterisks or special symbols)
7. Ensure the tone is serious and appropriate for a professional technology blog
8. Add natural transitions where needed

IMPORTANT: Keep the original content; only improve presentation and correctness and remove \
meta comments.

Return the edited article now:
"
    )
}
