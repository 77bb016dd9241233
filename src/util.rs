/// True when `s` is a plain decimal number: optional sign, digits with an
/// optional fraction, optional exponent. Surrounding whitespace is allowed;
/// `inf`, `nan` and a trailing bare point are not numbers here.
pub fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => all_digits(int, true) && all_digits(frac, false),
        None => all_digits(mantissa, false),
    };

    let exponent_ok = exponent.map_or(true, |e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        all_digits(e, false)
    });

    mantissa_ok && exponent_ok
}

fn all_digits(s: &str, allow_empty: bool) -> bool {
    (allow_empty || !s.is_empty()) && s.bytes().all(|b| b.is_ascii_digit())
}
