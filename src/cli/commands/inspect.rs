use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use crate::config::Config;
use crate::form::{FieldInstruction, FormDocument, FormRenderer, WidgetKind};

#[derive(Args)]
pub struct InspectCommands {
    /// Form file (defaults to the configured form, then form.json)
    pub form: Option<PathBuf>,
}

pub async fn inspect_command(args: InspectCommands, config: &Config) -> Result<()> {
    let path = config.resolve_form_path(args.form);
    let form = FormRenderer::new(FormDocument::load(&path)?, config.settings.render_options());

    let title = form.title().unwrap_or("untitled");
    println!(
        "{} {} {}",
        "Form:".bold(),
        title.cyan(),
        format!("({} fields, {})", form.len(), path.display()).dimmed()
    );

    if form.is_empty() {
        println!("  {}", "no fields".dimmed());
    }
    for instruction in form.instructions() {
        for line in describe(instruction) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Plain-text lines describing one field's dispatch result
pub fn describe(instruction: &FieldInstruction) -> Vec<String> {
    let mut lines = vec![format!(
        "  {} {} {}",
        format!("[{}]", instruction.key).yellow(),
        instruction.caption().bold(),
        format!("<{}>", instruction.widget.name()).dimmed()
    )];

    match &instruction.widget {
        WidgetKind::Select { options } => {
            let listed = if options.is_empty() {
                "(none)".to_string()
            } else {
                options.join(", ")
            };
            lines.push(format!("      options:     {}", listed));
        }
        WidgetKind::TextArea { rows } => lines.push(format!("      rows:        {}", rows)),
        WidgetKind::Input { .. } => {}
    }

    lines.push(format!("      initial:     {:?}", instruction.initial));
    lines.push(format!("      constraints: {}", instruction.constraints.summary()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_select() {
        colored::control::set_override(false);
        let form = FormRenderer::new(
            FormDocument::from_json(r#"[{"type": "dropdown", "options": ["a", "b"], "value": "b"}]"#)
                .unwrap(),
            Default::default(),
        );
        let lines = describe(&form.instructions()[0]);
        assert_eq!(lines[0], "  [0] Field 0 (select) <select>");
        assert_eq!(lines[1], "      options:     a, b");
        assert_eq!(lines[2], "      initial:     \"b\"");
        assert_eq!(lines[3], "      constraints: optional");
    }
}
