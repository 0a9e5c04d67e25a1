//! Cosmetic passes over finished source text.

/// Insert one blank line before every top-level line that starts with one of
/// `keywords`, unless it already follows a blank line or opens the text.
///
/// Only line breaks are added; no line is altered, so the pass cannot change
/// what the code means.
///
/// ```
/// use enumgen_codegen::format::separate_blocks;
///
/// let code = "package main\ntype A string\nconst AX A = \"x\"\nfunc f() {}\n";
/// assert_eq!(
///     separate_blocks(code, &["type", "func"]),
///     "package main\n\ntype A string\nconst AX A = \"x\"\n\nfunc f() {}\n"
/// );
/// ```
pub fn separate_blocks(code: &str, keywords: &[&str]) -> String {
    let mut out = String::with_capacity(code.len() + code.len() / 8);
    let mut previous_blank = true;

    for line in code.split_inclusive('\n') {
        let opens_block = keywords.iter().any(|keyword| {
            line.strip_prefix(keyword)
                .is_some_and(|rest| rest.starts_with(' '))
        });
        if opens_block && !previous_blank {
            out.push('\n');
        }
        out.push_str(line);
        previous_blank = line.trim().is_empty();
    }

    out
}
