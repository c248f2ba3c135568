use crate::errors::GenError;
use crate::wire::{SectionKind, Sections};

/// Text strictly between the first `open` and the first `close` that follows
/// it, trimmed. Greedy and non-nested: a marker token that also shows up inside
/// another section's content is not guarded against.
pub fn extract_section<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(open)?;
    let (body, _) = rest.split_once(close)?;
    Some(body.trim())
}

/// Cut the three sections out of a completion. Each section is located by its
/// own marker, so order and surrounding prose do not matter. All or nothing:
/// the first section that cannot be found fails the whole parse.
pub fn parse_response(raw: &str) -> Result<Sections, GenError> {
    let section = |kind: SectionKind| {
        extract_section(raw, kind.marker(), kind.marker())
            .map(str::to_owned)
            .ok_or(GenError::MalformedResponse { section: kind })
    };

    Ok(Sections {
        markup: section(SectionKind::Markup)?,
        styling: section(SectionKind::Styling)?,
        scripting: section(SectionKind::Scripting)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(raw: &str) -> SectionKind {
        match parse_response(raw) {
            Err(GenError::MalformedResponse { section }) => section,
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    fn wrap(kind: SectionKind, body: &str) -> String {
        format!("{m}{body}{m}", m = kind.marker())
    }

    #[test]
    fn scenario_a_splits_all_three() {
        let raw = "blah --html--<html><head></head><body>hi</body></html>--html----css--body{color:red}--css----js--console.log(1)--js--";
        let s = parse_response(raw).unwrap();
        assert_eq!(s.markup, "<html><head></head><body>hi</body></html>");
        assert_eq!(s.styling, "body{color:red}");
        assert_eq!(s.scripting, "console.log(1)");
    }

    #[test]
    fn scenario_b_missing_script_pair() {
        let raw = "--html--<html></html>--html--\n--css--p{}--css--\nthat's all";
        assert_eq!(missing(raw), SectionKind::Scripting);
    }

    #[test]
    fn missing_closing_marker_is_malformed() {
        let raw = "--html--<html></html>--html-- --css--p{} --js--x--js--";
        assert_eq!(missing(raw), SectionKind::Styling);
    }

    #[test]
    fn first_missing_section_is_reported() {
        assert_eq!(missing("nothing useful here"), SectionKind::Markup);
        assert_eq!(missing("--html--<p>only markup</p>--html--"), SectionKind::Styling);
    }

    #[test]
    fn prose_and_whitespace_are_ignored() {
        let raw = format!(
            "Sure! Here is your site.\n\n{}\n\nAnd the styles:\n{}\nFinally:\n{}\nEnjoy!",
            wrap(SectionKind::Markup, "\n  <html><body>x</body></html>\n"),
            wrap(SectionKind::Styling, "\n\tbody { margin: 0 }\n"),
            wrap(SectionKind::Scripting, "  \nalert('hi');\n  "),
        );
        let s = parse_response(&raw).unwrap();
        assert_eq!(s.markup, "<html><body>x</body></html>");
        assert_eq!(s.styling, "body { margin: 0 }");
        assert_eq!(s.scripting, "alert('hi');");
    }

    #[test]
    fn every_section_order_parses() {
        let bodies = [
            (SectionKind::Markup, " <main>H</main> "),
            (SectionKind::Styling, "\nmain{}\n"),
            (SectionKind::Scripting, " let a = 1; "),
        ];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

        for order in orders {
            let mut raw = String::from("prefix text ");
            for (n, idx) in order.iter().enumerate() {
                let (kind, body) = bodies[*idx];
                raw.push_str(&wrap(kind, body));
                raw.push_str(&format!(" mid {n} "));
            }
            raw.push_str("suffix");

            let s = parse_response(&raw).unwrap();
            assert_eq!(s.markup, "<main>H</main>", "order {:?}", order);
            assert_eq!(s.styling, "main{}", "order {:?}", order);
            assert_eq!(s.scripting, "let a = 1;", "order {:?}", order);
        }
    }

    #[test]
    fn empty_section_is_found_not_missing() {
        let raw = "--html--<html></html>--html----css----css----js--   --js--";
        let s = parse_response(raw).unwrap();
        assert_eq!(s.styling, "");
        assert_eq!(s.scripting, "");
    }

    #[test]
    fn extract_uses_first_occurrences() {
        assert_eq!(extract_section("a [x] one [x] two [x]", "[x]", "[x]"), Some("one"));
        assert_eq!(extract_section("no open marker", "[x]", "[x]"), None);
        assert_eq!(extract_section("only [x] open", "[x]", "[x]"), None);
    }
}
