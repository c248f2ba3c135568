use crate::wire::{ArtifactNames, Prompt, SectionKind};

fn role() -> &'static str {
r#"You are a senior frontend developer and UI/UX designer.

Generate a COMPLETE, MODERN, PROFESSIONAL PORTFOLIO WEBSITE for the person described by the user."#
}

fn mandatory_sections() -> &'static str {
r#"MANDATORY SECTIONS:
Hero, About, Skills, Experience, Projects, Achievements, Contact

Design rules:
- Responsive layout that works from phone to desktop.
- Semantic HTML, accessible colour contrast, labelled form inputs.
- Realistic copy taken from the description; no lorem ipsum.
- Plain CSS and vanilla JavaScript only; no frameworks, no build step."#
}

fn linking_rules(names: &ArtifactNames) -> String {
    format!(
        r#"IMPORTANT:
The HTML file is saved as {markup}. It MUST include:
<link rel="stylesheet" href="{styling}">
<script src="{scripting}"></script>"#,
        markup = names.markup,
        styling = names.styling,
        scripting = names.scripting,
    )
}

fn output_format() -> String {
    let html = SectionKind::Markup.marker();
    let css = SectionKind::Styling.marker();
    let js = SectionKind::Scripting.marker();
    format!(
        r#"STRICT OUTPUT FORMAT:

{html}
[HTML ONLY]
{html}

{css}
[CSS ONLY]
{css}

{js}
[JAVASCRIPT ONLY]
{js}

No explanations, no markdown code fences."#
    )
}

pub fn system_prompt(names: &ArtifactNames) -> String {
    format!(
        "{}\n\n{}\n\n{}\n\n{}\n",
        role(),
        mandatory_sections(),
        linking_rules(names),
        output_format()
    )
}

pub fn user_prompt(description: &str) -> String {
    description.trim().to_string()
}

pub fn build(names: &ArtifactNames, description: &str) -> Prompt {
    Prompt {
        system: system_prompt(names),
        user: user_prompt(description),
    }
}
