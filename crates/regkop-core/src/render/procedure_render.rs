use crate::kop::model::ProcedureDocument;

/// Render a ProcedureDocument to Markdown
///
/// Generates the Markdown representation handed to the external document
/// writer:
/// - Document title as H1
/// - Each section as H2, in document order
/// - Steps as a numbered list, each tagged with its provenance
pub fn render_procedure(document: &ProcedureDocument) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("# {}\n\n", document.title));

    for section in &document.sections {
        output.push_str(&format!("## {}\n\n", section.title));

        for (index, step) in section.steps.iter().enumerate() {
            output.push_str(&format!(
                "{}. **[{}]** {}\n",
                index + 1,
                step.provenance.tag(),
                step.text
            ));
        }
        output.push('\n');
    }

    output
}
