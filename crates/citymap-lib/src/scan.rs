//! Field scanning for the POI/road line grammar.
//!
//! Lines are scanned left to right with a small cursor:
//!
//! - a *text field* runs up to the next tab (or end of line) and must hold at
//!   least one character;
//! - a *separator* consumes any run of whitespace, including none at all, so
//!   `"1\t\tName"` scans the same as `"1\tName"`;
//! - a *number* skips leading whitespace and takes the longest numeric prefix,
//!   ignoring whatever follows it;
//! - the *remainder* field takes the rest of the line without its terminator.
//!
//! [`scan_poi`] and [`scan_road`] report how many fields they matched before
//! stopping, which is what the validator's arity checks are based on.

use crate::graph::NodeId;

/// Cursor over a single input line.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Text up to the next tab. `None` when that text would be empty.
    pub fn text(&mut self) -> Option<&'a str> {
        let end = self.rest.find('\t').unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (field, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(field)
    }

    /// Skip any whitespace.
    pub fn separator(&mut self) {
        self.rest = self
            .rest
            .trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    }

    /// Signed decimal integer prefix, after skipping whitespace.
    pub fn integer(&mut self) -> Option<i64> {
        self.separator();
        let bytes = self.rest.as_bytes();
        let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let digits_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end == digits_start {
            return None;
        }
        let value = self.rest[..end].parse().ok()?;
        self.rest = &self.rest[end..];
        Some(value)
    }

    /// Floating point prefix, after skipping whitespace. Accepts `nan`, `inf`
    /// and `infinity` in any case.
    pub fn float(&mut self) -> Option<f64> {
        self.separator();
        let (value, len) = float_prefix(self.rest)?;
        self.rest = &self.rest[len..];
        Some(value)
    }

    /// Remainder of the line, without the trailing `\n` or `\r\n`. `None` when
    /// nothing is left.
    pub fn remainder(&mut self) -> Option<&'a str> {
        let end = self.rest.find('\n').unwrap_or(self.rest.len());
        let line = &self.rest[..end];
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return None;
        }
        self.rest = &self.rest[end..];
        Some(line)
    }
}

fn float_prefix(input: &str) -> Option<(f64, usize)> {
    let bytes = input.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let sign_len = end;

    for special in ["infinity", "inf", "nan"] {
        let candidate = input.get(sign_len..sign_len + special.len());
        if candidate.is_some_and(|text| text.eq_ignore_ascii_case(special)) {
            let len = sign_len + special.len();
            let value = if special == "nan" {
                f64::NAN
            } else if bytes.first() == Some(&b'-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
            return Some((value, len));
        }
    }

    let mut mantissa_digits = 0;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
        mantissa_digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let text = &input[..end];
    let value = text.strip_suffix('.').unwrap_or(text).parse().ok()?;
    Some((value, end))
}

/// True when `text` is non-empty and made only of ASCII digits.
pub fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an all-digit identifier. `None` for anything else, including values
/// that do not fit a [`NodeId`].
pub fn parse_id(text: &str) -> Option<NodeId> {
    if is_all_digits(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// A count line: the leading integer of the line.
pub fn scan_count(line: &str) -> Option<i64> {
    Scanner::new(line).integer()
}

/// Raw fields of a POI line. `fields` is the number of fields matched before
/// scanning stopped; the remaining members are only meaningful up to that
/// count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiFields<'a> {
    pub fields: usize,
    pub id: &'a str,
    pub name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Scan `id \t name \t latitude \t longitude`.
pub fn scan_poi(line: &str) -> PoiFields<'_> {
    let mut out = PoiFields::default();
    let mut scanner = Scanner::new(line);

    let Some(id) = scanner.text() else {
        return out;
    };
    out.id = id;
    out.fields = 1;

    scanner.separator();
    let Some(name) = scanner.text() else {
        return out;
    };
    out.name = name;
    out.fields = 2;

    scanner.separator();
    let Some(latitude) = scanner.float() else {
        return out;
    };
    out.latitude = latitude;
    out.fields = 3;

    scanner.separator();
    let Some(longitude) = scanner.float() else {
        return out;
    };
    out.longitude = longitude;
    out.fields = 4;

    out
}

/// Raw fields of a road line; see [`PoiFields`] for the meaning of `fields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadFields<'a> {
    pub fields: usize,
    pub from: &'a str,
    pub to: &'a str,
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub name: &'a str,
}

/// Scan `from \t to \t distance \t latitude \t longitude \t road name`.
pub fn scan_road(line: &str) -> RoadFields<'_> {
    let mut out = RoadFields::default();
    let mut scanner = Scanner::new(line);

    let Some(from) = scanner.text() else {
        return out;
    };
    out.from = from;
    out.fields = 1;

    scanner.separator();
    let Some(to) = scanner.text() else {
        return out;
    };
    out.to = to;
    out.fields = 2;

    scanner.separator();
    let Some(distance) = scanner.float() else {
        return out;
    };
    out.distance = distance;
    out.fields = 3;

    scanner.separator();
    let Some(latitude) = scanner.float() else {
        return out;
    };
    out.latitude = latitude;
    out.fields = 4;

    scanner.separator();
    let Some(longitude) = scanner.float() else {
        return out;
    };
    out.longitude = longitude;
    out.fields = 5;

    scanner.separator();
    let Some(name) = scanner.remainder() else {
        return out;
    };
    out.name = name;
    out.fields = 6;

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_takes_leading_integer() {
        assert_eq!(scan_count("3\n"), Some(3));
        assert_eq!(scan_count("  -2 trailing"), Some(-2));
        assert_eq!(scan_count("12abc"), Some(12));
        assert_eq!(scan_count("abc"), None);
        assert_eq!(scan_count("\n"), None);
        assert_eq!(scan_count("-"), None);
    }

    #[test]
    fn float_prefix_stops_at_garbage() {
        assert_eq!(float_prefix("42.5xyz"), Some((42.5, 4)));
        assert_eq!(float_prefix("-1e3\t"), Some((-1000.0, 4)));
        assert_eq!(float_prefix("7."), Some((7.0, 2)));
        assert_eq!(float_prefix(".5"), Some((0.5, 2)));
        assert_eq!(float_prefix("1e"), Some((1.0, 1)));
        assert_eq!(float_prefix("-inf"), Some((f64::NEG_INFINITY, 4)));
        assert!(float_prefix("NaN").is_some_and(|(v, _)| v.is_nan()));
        assert_eq!(float_prefix("abc"), None);
        assert_eq!(float_prefix("."), None);
    }

    #[test]
    fn poi_line_scans_four_fields() {
        let fields = scan_poi("17\tMemorial Union\t42.0239\t-93.6458\n");
        assert_eq!(fields.fields, 4);
        assert_eq!(fields.id, "17");
        assert_eq!(fields.name, "Memorial Union");
        assert_eq!(fields.latitude, 42.0239);
        assert_eq!(fields.longitude, -93.6458);
    }

    #[test]
    fn poi_line_with_missing_longitude_scans_three_fields() {
        assert_eq!(scan_poi("1\tName\t42.0\n").fields, 3);
        assert_eq!(scan_poi("1\tName\n").fields, 2);
        assert_eq!(scan_poi("\tName\t1\t2\n").fields, 0);
    }

    #[test]
    fn separators_swallow_repeated_whitespace() {
        let fields = scan_poi("1\t\tName\t1\t2");
        assert_eq!(fields.fields, 4);
        assert_eq!(fields.name, "Name");
    }

    #[test]
    fn road_line_scans_six_fields() {
        let fields = scan_road("1\t2\t350.5\t42.0\t-93.6\tLincoln Way\r\n");
        assert_eq!(fields.fields, 6);
        assert_eq!(fields.from, "1");
        assert_eq!(fields.to, "2");
        assert_eq!(fields.distance, 350.5);
        assert_eq!(fields.name, "Lincoln Way");
    }

    #[test]
    fn road_line_without_name_scans_five_fields() {
        assert_eq!(scan_road("1\t2\t3\t4\t5\t\n").fields, 5);
        assert_eq!(scan_road("1\t2\t3\t4\t5").fields, 5);
        assert_eq!(scan_road("1\t2\tx\t4\t5\tMain").fields, 2);
    }

    #[test]
    fn ids_must_be_all_digits() {
        assert!(is_all_digits("0042"));
        assert!(!is_all_digits("4a"));
        assert!(!is_all_digits(" 4"));
        assert!(!is_all_digits(""));
        assert_eq!(parse_id("0042"), Some(42));
        assert_eq!(parse_id("99999999999999999999999"), None);
    }
}
