use crate::wire::{ArtifactNames, FixReport};

const HEAD_CLOSE: &str = "</head>";
const BODY_CLOSE: &str = "</body>";

const STYLESHEET_SIGNATURES: [&str; 3] = [r#"rel="stylesheet""#, "rel='stylesheet'", "rel=stylesheet"];

/// ASCII case-insensitive substring search. Lowercasing ASCII keeps byte
/// offsets intact, so the returned index is valid in `haystack`.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(&needle.to_ascii_lowercase())
}

fn contains_any_ci(haystack: &str, needles: &[String]) -> bool {
    let lower = haystack.to_ascii_lowercase();
    needles.iter().any(|n| lower.contains(&n.to_ascii_lowercase()))
}

fn insert_before(markup: &str, closing_tag: &str, line: &str) -> Option<String> {
    let at = find_ci(markup, closing_tag)?;
    let mut out = String::with_capacity(markup.len() + line.len());
    out.push_str(&markup[..at]);
    out.push_str(line);
    out.push_str(&markup[at..]);
    Some(out)
}

pub fn has_stylesheet_link(markup: &str) -> bool {
    let sigs: Vec<String> = STYLESHEET_SIGNATURES.iter().map(|s| s.to_string()).collect();
    contains_any_ci(markup, &sigs)
}

pub fn has_script_ref(markup: &str, script_name: &str) -> bool {
    let sigs = vec![format!(r#"src="{script_name}""#), format!("src='{script_name}'")];
    contains_any_ci(markup, &sigs)
}

/// Make sure the markup loads its companion files.
///
/// - Missing stylesheet link: inserted right before the first `</head>`.
/// - Missing script reference: inserted right before the first `</body>`,
///   unless `with_script` is false (empty scripting section).
///
/// Detection is a permissive substring match, so an existing reference is
/// never duplicated. When the closing tag an insertion needs is absent the
/// markup is left as it is for that insertion.
pub fn fix_links(markup: &str, names: &ArtifactNames, with_script: bool) -> (String, FixReport) {
    let mut out = markup.to_string();
    let mut report = FixReport::default();

    if !has_stylesheet_link(&out) {
        let line = format!("  <link rel=\"stylesheet\" href=\"{}\">\n", names.styling);
        if let Some(fixed) = insert_before(&out, HEAD_CLOSE, &line) {
            out = fixed;
            report.stylesheet_inserted = true;
        }
    }

    if with_script && !has_script_ref(&out, &names.scripting) {
        let line = format!("  <script src=\"{}\"></script>\n", names.scripting);
        if let Some(fixed) = insert_before(&out, BODY_CLOSE, &line) {
            out = fixed;
            report.script_inserted = true;
        }
    }

    (out, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = r#"<link rel="stylesheet" href="style.css">"#;
    const SCRIPT: &str = r#"<script src="script.js"></script>"#;

    fn fix(markup: &str) -> String {
        fix_links(markup, &ArtifactNames::default(), true).0
    }

    #[test]
    fn inserts_both_references_in_place() {
        let (out, report) = fix_links(
            "<html><head></head><body>hi</body></html>",
            &ArtifactNames::default(),
            true,
        );
        assert_eq!(
            out,
            "<html><head>  <link rel=\"stylesheet\" href=\"style.css\">\n</head><body>hi  <script src=\"script.js\"></script>\n</body></html>"
        );
        assert!(report.stylesheet_inserted);
        assert!(report.script_inserted);

        let head_end = out.find("</head>").unwrap();
        assert!(out.find(LINK).unwrap() < head_end);
        let body_start = out.find("<body>").unwrap();
        let body_end = out.find("</body>").unwrap();
        let script_at = out.find(SCRIPT).unwrap();
        assert!(body_start < script_at && script_at < body_end);
    }

    #[test]
    fn existing_stylesheet_is_not_duplicated() {
        let markup = format!("<html><head>{LINK}</head><body></body></html>");
        let out = fix(&markup);
        assert_eq!(out.matches(LINK).count(), 1);
        assert_eq!(out.matches(SCRIPT).count(), 1);
    }

    #[test]
    fn fixing_twice_equals_fixing_once() {
        let inputs = [
            "<html><head><title>t</title></head><body><p>x</p></body></html>",
            "<html><head></head><body></body></html>",
            "<HTML><HEAD></HEAD><BODY></BODY></HTML>",
            "<div>no structure</div>",
        ];
        for input in inputs {
            let once = fix(input);
            assert_eq!(fix(&once), once, "input: {input}");
            assert!(once.matches("rel=\"stylesheet\"").count() <= 1);
            assert!(once.matches("src=\"script.js\"").count() <= 1);
        }
    }

    #[test]
    fn both_references_present_is_unchanged() {
        let markup = format!("<html><head>{LINK}</head><body>{SCRIPT}</body></html>");
        let (out, report) = fix_links(&markup, &ArtifactNames::default(), true);
        assert_eq!(out, markup);
        assert_eq!(report, FixReport::default());
    }

    #[test]
    fn no_closing_tags_leaves_markup_alone() {
        let markup = "<section><h1>Jane Doe</h1><p>Engineer</p></section>";
        let (out, report) = fix_links(markup, &ArtifactNames::default(), true);
        assert_eq!(out, markup);
        assert_eq!(report, FixReport::default());
    }

    #[test]
    fn missing_head_still_fixes_body() {
        let (out, report) = fix_links("<body>x</body>", &ArtifactNames::default(), true);
        assert!(!report.stylesheet_inserted);
        assert!(report.script_inserted);
        assert!(!out.contains("stylesheet"));
        assert!(out.contains(SCRIPT));
    }

    #[test]
    fn empty_script_section_skips_script_reference() {
        let (out, report) = fix_links(
            "<html><head></head><body></body></html>",
            &ArtifactNames::default(),
            false,
        );
        assert!(report.stylesheet_inserted);
        assert!(!report.script_inserted);
        assert!(!out.contains("<script"));
    }

    #[test]
    fn closing_tags_match_case_insensitively() {
        let out = fix("<HTML><HEAD></HEAD><BODY></BODY></HTML>");
        assert!(out.find(LINK).unwrap() < out.find("</HEAD>").unwrap());
        assert!(out.find(SCRIPT).unwrap() < out.find("</BODY>").unwrap());
    }

    #[test]
    fn single_quoted_references_count_as_present() {
        let markup = "<html><head><link rel='stylesheet' href='style.css'></head><body><script src='script.js'></script></body></html>";
        assert_eq!(fix(markup), markup);
    }

    #[test]
    fn inserts_only_before_first_closing_tag() {
        let out = fix("<head></head><body></body><template></head></body></template>");
        assert_eq!(out.matches(LINK).count(), 1);
        assert_eq!(out.matches(SCRIPT).count(), 1);
    }

    #[test]
    fn custom_names_flow_into_references() {
        let names = ArtifactNames {
            markup: "home.html".into(),
            styling: "theme.css".into(),
            scripting: "app.js".into(),
        };
        let (out, _) = fix_links("<html><head></head><body></body></html>", &names, true);
        assert!(out.contains(r#"href="theme.css""#));
        assert!(out.contains(r#"<script src="app.js"></script>"#));
        assert!(has_script_ref(&out, "app.js"));
        assert!(!has_script_ref(&out, "script.js"));
    }
}
