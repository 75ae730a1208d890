//! Bayer / Flamsteed designation strings.
//!
//! The pool stores a single designation string per star, e.g. `"Alpha 53 Aql"`.
//! At query time it is split back into its Bayer and Flamsteed parts.

/// Joins the trimmed Bayer and Flamsteed parts with a space and appends the
/// constellation code when one is given. `None` when both parts are blank.
pub fn build_designation(
    bayer: Option<&str>,
    flamsteed: Option<&str>,
    constellation: Option<&str>,
) -> Option<String> {
    let parts: Vec<&str> = [bayer, flamsteed]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    let mut out = parts.join(" ");
    if let Some(code) = constellation.map(str::trim).filter(|c| !c.is_empty()) {
        out.push(' ');
        out.push_str(code);
    }
    Some(out)
}

/// Splits a stored designation into `(bayer, flamsteed)`.
///
/// A trailing token equal to `constellation` (ignoring case) is treated as
/// a suffix and stripped. Tokens containing a digit are Flamsteed numbers and
/// get the suffix re-appended; the rest are Bayer. If nothing usable remains
/// the raw designation is returned as the Bayer part.
pub fn split_designation(
    raw: Option<&str>,
    constellation: Option<&str>,
) -> (Option<String>, Option<String>) {
    let trimmed = match raw.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return (None, None),
    };

    let mut tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let has_suffix = matches!(
        (constellation, tokens.last()),
        (Some(code), Some(last)) if last.eq_ignore_ascii_case(code)
    );
    let suffix = if has_suffix {
        tokens.pop();
        constellation
    } else {
        None
    };
    if tokens.is_empty() {
        return (Some(trimmed.to_string()), None);
    }

    let (numbered, named): (Vec<&str>, Vec<&str>) = tokens
        .into_iter()
        .partition(|t| t.chars().any(|c| c.is_ascii_digit()));

    let bayer = (!named.is_empty()).then(|| named.join(" "));
    let flamsteed = (!numbered.is_empty()).then(|| {
        let joined = numbered.join(" ");
        match suffix {
            Some(code) => format!("{joined} {code}"),
            None => joined,
        }
    });
    (bayer, flamsteed)
}
