use pretty_assertions::assert_eq;
use reprintf::{TypedValue, sprintf};

fn int(n: i64) -> TypedValue {
    TypedValue::Integer(n)
}

fn float(x: f64) -> TypedValue {
    TypedValue::Float(x)
}

fn text(s: &str) -> TypedValue {
    TypedValue::from(s)
}

fn one(format: &str, value: TypedValue) -> String {
    sprintf(format, &[value])
}

#[test]
fn integers() {
    assert_eq!(one("%d", int(42)), "42");
    assert_eq!(one("%v", int(-7)), "-7");
    assert_eq!(one("%5d", int(42)), "   42");
    assert_eq!(one("%-5d|", int(42)), "42   |");
    assert_eq!(one("%05d", int(42)), "00042");
    assert_eq!(one("%05d", int(-42)), "-0042");
    assert_eq!(one("%+d", int(5)), "+5");
    assert_eq!(one("% d", int(5)), " 5");
    assert_eq!(one("%.3d", int(7)), "007");
    assert_eq!(one("%8.3d", int(7)), "     007");
    assert_eq!(one("%08.3d", int(7)), "     007");
    assert_eq!(one("%-05d|", int(3)), "3    |");
}

#[test]
fn zero_precision_zero_value_prints_only_padding() {
    assert_eq!(one("%.0d", int(0)), "");
    assert_eq!(one("[%3.0d]", int(0)), "[   ]");
}

#[test]
fn integer_bases() {
    assert_eq!(one("%x", int(255)), "ff");
    assert_eq!(one("%X", int(255)), "FF");
    assert_eq!(one("%#x", int(255)), "0xff");
    assert_eq!(one("%#X", int(255)), "0XFF");
    assert_eq!(one("%x", int(-255)), "-ff");
    assert_eq!(one("%#08x", int(255)), "0x000000ff");
    assert_eq!(one("%o", int(8)), "10");
    assert_eq!(one("%#o", int(8)), "010");
    assert_eq!(one("%O", int(8)), "0o10");
    assert_eq!(one("%#O", int(8)), "0o010");
    assert_eq!(one("%#O", int(0)), "0o0");
    assert_eq!(one("%b", int(5)), "101");
    assert_eq!(one("%#b", int(5)), "0b101");
}

#[test]
fn characters() {
    assert_eq!(one("%c", int(65)), "A");
    assert_eq!(one("%c", int(0x65e5)), "日");
    assert_eq!(one("%c", int(-1)), "\u{fffd}");
    assert_eq!(one("%q", int(65)), "'A'");
    assert_eq!(one("%q", int(39)), r"'\''");
    assert_eq!(one("%U", int(0x1F600)), "U+1F600");
    assert_eq!(one("%U", int(65)), "U+0041");
    assert_eq!(one("%#U", int(65)), "U+0041 'A'");
}

#[test]
fn fixed_floats() {
    assert_eq!(one("%f", float(3.14159)), "3.141590");
    assert_eq!(one("%F", float(3.14159)), "3.141590");
    assert_eq!(one("%.2f", float(3.14159)), "3.14");
    assert_eq!(one("%.0f", float(100.0)), "100");
    assert_eq!(one("%8.3f", float(3.14159)), "   3.142");
    assert_eq!(one("%08.3f", float(-3.14159)), "-003.142");
    assert_eq!(one("%+.1f", float(2.0)), "+2.0");
    assert_eq!(one("%+10.2f", float(12.35)), "    +12.35");
    assert_eq!(one("%-8.2f|", float(1.5)), "1.50    |");
}

#[test]
fn exponent_floats() {
    assert_eq!(one("%e", float(1234.5678)), "1.234568e+03");
    assert_eq!(one("%E", float(1234.5678)), "1.234568E+03");
    assert_eq!(one("%.2e", float(0.000123)), "1.23e-04");
    assert_eq!(one("%.0e", float(5.0)), "5e+00");
    assert_eq!(one("%e", float(0.0)), "0.000000e+00");
    assert_eq!(one("%e", float(1e100)), "1.000000e+100");
}

#[test]
fn general_floats() {
    assert_eq!(one("%v", float(19.99)), "19.99");
    assert_eq!(one("%v", float(3.0)), "3");
    assert_eq!(one("%v", float(0.0)), "0");
    assert_eq!(one("%v", float(-0.0)), "-0");
    assert_eq!(one("%g", float(100000.0)), "100000");
    assert_eq!(one("%g", float(1e6)), "1e+06");
    assert_eq!(one("%g", float(0.0001)), "0.0001");
    assert_eq!(one("%g", float(0.00001)), "1e-05");
    assert_eq!(one("%v", float(123456789.0)), "1.23456789e+08");
    assert_eq!(one("%G", float(1e-7)), "1E-07");
    assert_eq!(one("%.3g", float(3.14159)), "3.14");
    assert_eq!(one("%.3g", float(1234.0)), "1.23e+03");
    assert_eq!(one("%.3g", float(1.0)), "1");
    assert_eq!(one("%.3v", float(2.71828)), "2.72");
}

#[test]
fn alternate_floats() {
    assert_eq!(one("%#g", float(1.0)), "1.00000");
    assert_eq!(one("%#.0f", float(3.0)), "3.");
    assert_eq!(one("%#.3g", float(2.0)), "2.00");
    assert_eq!(one("%#.0e", float(5.0)), "5.e+00");
}

#[test]
fn hex_and_binary_floats() {
    assert_eq!(one("%x", float(1.0)), "0x1p+00");
    assert_eq!(one("%x", float(3.0)), "0x1.8p+01");
    assert_eq!(one("%X", float(3.0)), "0X1.8P+01");
    assert_eq!(one("%x", float(1.25)), "0x1.4p+00");
    assert_eq!(one("%x", float(-0.5)), "-0x1p-01");
    assert_eq!(one("%x", float(0.1)), "0x1.999999999999ap-04");
    assert_eq!(one("%x", float(0.0)), "0x0p+00");
    assert_eq!(one("%.1x", float(1.0)), "0x1.0p+00");
    assert_eq!(one("%.0x", float(1.5)), "0x1p+01");
    assert_eq!(one("%b", float(1.0)), "4503599627370496p-52");
    assert_eq!(one("%b", float(0.0)), "0p-1074");
    assert_eq!(one("%x", float(f64::INFINITY)), "+Inf");
}

#[test]
fn special_floats() {
    assert_eq!(one("%f", float(f64::INFINITY)), "+Inf");
    assert_eq!(one("%v", float(f64::NEG_INFINITY)), "-Inf");
    assert_eq!(one("% f", float(f64::INFINITY)), " Inf");
    assert_eq!(one("%05f", float(f64::INFINITY)), " +Inf");
    assert_eq!(one("%v", float(f64::NAN)), "NaN");
    assert_eq!(one("%+v", float(f64::NAN)), "+NaN");
}

#[test]
fn booleans() {
    assert_eq!(one("%t", TypedValue::Boolean(true)), "true");
    assert_eq!(one("%v", TypedValue::Boolean(false)), "false");
    assert_eq!(one("%6t", TypedValue::Boolean(false)), " false");
    assert_eq!(one("%-6t|", TypedValue::Boolean(true)), "true  |");
}

#[test]
fn strings() {
    assert_eq!(one("%s", text("hi")), "hi");
    assert_eq!(one("%5s", text("hi")), "   hi");
    assert_eq!(one("%-5s|", text("hi")), "hi   |");
    assert_eq!(one("%05s", text("ab")), "000ab");
    assert_eq!(one("%.2s", text("hello")), "he");
    assert_eq!(one("%.1s", text("日本")), "日");
    assert_eq!(one("%5s", text("日本")), "   日本");
    assert_eq!(one("%.10s", text("short")), "short");
}

#[test]
fn quoted_strings() {
    assert_eq!(one("%q", text("a\"b")), r#""a\"b""#);
    assert_eq!(one("%q", text("tab\there")), r#""tab\there""#);
    assert_eq!(one("%q", text("bell\u{7}")), r#""bell\a""#);
    assert_eq!(one("%q", text("esc\u{1b}")), r#""esc\x1b""#);
    assert_eq!(one("%q", text("日本")), r#""日本""#);
    assert_eq!(one("%+q", text("日本")), r#""\u65e5\u672c""#);
    assert_eq!(one("%+q", text("🙂")), r#""\U0001f642""#);
    assert_eq!(one("%#q", text("raw")), "`raw`");
    assert_eq!(one("%#q", text("has`tick")), r#""has`tick""#);
    assert_eq!(one("%#v", text("x")), r#""x""#);
    assert_eq!(one("%.3q", text("abcdef")), r#""abc""#);
}

#[test]
fn hex_strings() {
    assert_eq!(one("%x", text("hi")), "6869");
    assert_eq!(one("%X", text("hi")), "6869");
    assert_eq!(one("%X", text("\u{ff}")), "C3BF");
    assert_eq!(one("% x", text("hi")), "68 69");
    assert_eq!(one("%# x", text("hi")), "0x68 0x69");
    assert_eq!(one("%#X", text("hi")), "0X6869");
    assert_eq!(one("%.1x", text("hi")), "68");
    assert_eq!(one("%6x", text("hi")), "  6869");
    assert_eq!(one("%#x", text("")), "");
}

#[test]
fn wrong_type_for_verb() {
    assert_eq!(one("%d", text("abc")), "%!d(string=abc)");
    assert_eq!(one("%d", text("")), "%!d(string=)");
    assert_eq!(one("%s", int(5)), "%!s(int=5)");
    assert_eq!(one("%t", float(1.5)), "%!t(float64=1.5)");
    assert_eq!(one("%d", TypedValue::Boolean(true)), "%!d(bool=true)");
    assert_eq!(one("%f", int(3)), "%!f(int=3)");
    assert_eq!(one("%é", int(1)), "%!é(int=1)");
}

#[test]
fn missing_and_extra_values() {
    assert_eq!(sprintf("%s and %s", &[text("a")]), "a and %!s(MISSING)");
    assert_eq!(sprintf("%s", &[text("a"), int(1)]), "a%!(EXTRA int=1)");
    assert_eq!(
        sprintf("x", &[TypedValue::Boolean(true), text("y")]),
        "x%!(EXTRA bool=true, string=y)"
    );
}

#[test]
fn percent_and_truncated_directives() {
    assert_eq!(sprintf("100%%", &[]), "100%");
    assert_eq!(sprintf("%5%", &[]), "%");
    assert_eq!(sprintf("50%", &[]), "50%!(NOVERB)");
    assert_eq!(sprintf("%-", &[]), "%!(NOVERB)");
    assert_eq!(sprintf("", &[]), "");
}

#[test]
fn star_width_and_precision() {
    assert_eq!(sprintf("%*d", &[int(5), int(42)]), "   42");
    assert_eq!(sprintf("%-*d|", &[int(4), int(7)]), "7   |");
    assert_eq!(sprintf("%*d|", &[int(-4), int(7)]), "7   |");
    assert_eq!(sprintf("%*d", &[text("x"), int(7)]), "%!(BADWIDTH)7");
    assert_eq!(sprintf("%.*f", &[int(2), float(3.14159)]), "3.14");
    assert_eq!(sprintf("%.*f", &[float(2.0), float(1.0)]), "%!(BADPREC)1.000000");
    assert_eq!(sprintf("%.*f", &[int(-1), float(1.0)]), "%!(BADPREC)1.000000");
}

#[test]
fn runaway_width_abandons_the_directive() {
    assert_eq!(sprintf("%20000000d", &[int(1)]), "%!(NOVERB)%!(EXTRA int=1)");
    assert_eq!(
        sprintf("a%.20000000f tail", &[float(1.0)]),
        "a%!(NOVERB)%!(EXTRA float64=1)"
    );
    assert_eq!(sprintf("%*d", &[int(2_000_000), int(1)]), "%!(BADWIDTH)1");
}

#[test]
fn seven_digit_widths_are_accepted() {
    let padded = sprintf("%1000001d", &[int(1)]);
    assert_eq!(padded.len(), 1_000_001);
    assert!(padded.ends_with(" 1"));
}

#[test]
fn display_matches_v() {
    assert_eq!(int(12).to_string(), "12");
    assert_eq!(float(0.5).to_string(), "0.5");
    assert_eq!(TypedValue::Boolean(true).to_string(), "true");
    assert_eq!(text("plain").to_string(), "plain");
}
