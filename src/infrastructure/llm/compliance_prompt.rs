use crate::domain::AnalysisQuery;

const ANALYST_PREAMBLE: &str = "You are a regulatory compliance analyst. \
Answer the question using the document excerpt when one is provided.";

// The numbered headings below are what the response structurer anchors on.
// Changing their order or wording changes how replies are parsed.
const RUBRIC: &str = "Respond in exactly this order, using these numbered headings:
1. Summary: a short summary of the compliance requirements.
2. Obligations: the key legal obligations, one per line starting with \"- \".
3. Recent Changes: recent or upcoming regulatory changes, one per line starting with \"- \".
4. Citations: citations to legal sources, one per line written as \"- <source>: <what it requires>\".
5. Risks: risks of non-compliance, one per line starting with \"- \".
If a section has nothing to report, write \"None\" under its heading.
If the requirements differ between jurisdictions or regions, finish with a section titled \"Jurisdictional Notes:\".";

/// Renders the fixed five-topic analysis prompt for one query.
///
/// Output is a pure function of the query text and the bounded context.
pub fn build_compliance_prompt(query: &AnalysisQuery) -> String {
    let mut prompt = String::with_capacity(query.context.text.len() + RUBRIC.len() + 256);
    prompt.push_str(ANALYST_PREAMBLE);
    prompt.push_str("\n\n");

    if !query.context.text.is_empty() {
        prompt.push_str("Document excerpt");
        if query.context.truncated {
            prompt.push_str(" (truncated)");
        }
        prompt.push_str(":\n\"\"\"\n");
        prompt.push_str(&query.context.text);
        prompt.push_str("\n\"\"\"\n\n");
    }

    prompt.push_str("Question: ");
    prompt.push_str(query.query.trim());
    prompt.push_str("\n\n");
    prompt.push_str(RUBRIC);

    prompt
}
