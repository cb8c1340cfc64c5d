use crate::directive::HEADER_NAME;

/// Merges the directive header into a jar manifest.
///
/// The base content (if any) is unfolded first, a previous
/// `Hibernate-Contribution` attribute is dropped, and the new header is
/// appended to the main section. Without a base, a minimal
/// `Manifest-Version: 1.0` main section is synthesized. Per-entry sections
/// after the first blank line are kept untouched.
///
/// The header is written as one unfolded line so the directive value stays
/// byte-exact; 72-byte line folding is intentionally not applied.
pub fn merge_manifest(base: Option<&str>, directive: &str) -> String {
    let mut main: Vec<String> = Vec::new();
    let mut rest: Vec<String> = Vec::new();

    if let Some(base) = base {
        let mut lines = unfold_lines(base).into_iter();
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }
            if !is_attribute(&line, HEADER_NAME) {
                main.push(line);
            }
        }
        rest.extend(lines);
    }

    if !main.iter().any(|l| is_attribute(l, "Manifest-Version")) {
        main.insert(0, "Manifest-Version: 1.0".to_string());
    }
    main.push(format!("{HEADER_NAME}: {directive}"));

    let mut out = main.join("\n");
    out.push('\n');
    while rest.last().is_some_and(|l| l.is_empty()) {
        rest.pop();
    }
    if !rest.is_empty() {
        out.push('\n');
        out.push_str(&rest.join("\n"));
        out.push('\n');
    }
    out
}

/// Joins manifest continuation lines (leading space) back onto their
/// attribute line.
fn unfold_lines(content: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in content.lines() {
        if let Some(cont) = raw.strip_prefix(' ')
            && let Some(last) = out.last_mut()
        {
            last.push_str(cont);
            continue;
        }
        out.push(raw.to_string());
    }
    out
}

fn is_attribute(line: &str, name: &str) -> bool {
    // Attribute names are case-insensitive in the jar manifest format.
    line.len() > name.len()
        && line.as_bytes()[name.len()] == b':'
        && line[..name.len()].eq_ignore_ascii_case(name)
}
