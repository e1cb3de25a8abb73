/* Value/literal formatting shared by every emitter.
 *
 * The numeric text of a literal (digits and exponent) is identical in both
 * target syntaxes; only quoting, boolean tokens and kind suffixes differ. */

use fmod_types::{DataValue, FieldKind, LiteralError, TypedLiteral};

/* Column limit for wrapped initializer lists */
pub const LINE_WIDTH: usize = 78;

/* Significant digits for single and double precision literals */
pub use fmod_types::{DOUBLE_DIGITS, FLOAT_DIGITS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /* The column-major native module */
    Fortran,
    /* The C mirror and its C++ overlay */
    C,
}

impl Syntax {
    /* Marker appended to a line that continues on the next one */
    pub fn continuation(self) -> &'static str {
        match self {
            Syntax::Fortran => " &",
            Syntax::C => "",
        }
    }

    /* Token for the string terminator sentinel */
    pub fn sentinel(self) -> &'static str {
        match self {
            Syntax::Fortran => "C_NULL_CHAR",
            Syntax::C => "'\\0'",
        }
    }
}

/* Render `value` as a literal of `kind` */
pub fn render(kind: FieldKind, value: &DataValue, syntax: Syntax) -> Result<String, LiteralError> {
    Ok(render_typed(&value.coerce(kind)?, syntax))
}

pub fn render_typed(literal: &TypedLiteral, syntax: Syntax) -> String {
    match (literal, syntax) {
        (TypedLiteral::Integer(v), _) => v.to_string(),
        (TypedLiteral::Float(v), Syntax::Fortran) => {
            format!("{}_C_FLOAT", scientific(*v, FLOAT_DIGITS))
        }
        (TypedLiteral::Float(v), Syntax::C) => format!("{}f", scientific(*v, FLOAT_DIGITS)),
        (TypedLiteral::Double(v), Syntax::Fortran) => {
            format!("{}_C_DOUBLE", scientific(*v, DOUBLE_DIGITS))
        }
        (TypedLiteral::Double(v), Syntax::C) => scientific(*v, DOUBLE_DIGITS),
        (TypedLiteral::Character(c), Syntax::Fortran) => fortran_text(&c.to_string()),
        (TypedLiteral::Character(c), Syntax::C) => quote_c_char(*c),
        (TypedLiteral::String(s), Syntax::Fortran) => fortran_text(s),
        (TypedLiteral::String(s), Syntax::C) => quote_c_string(s),
        (TypedLiteral::Bool(true), Syntax::Fortran) => ".true.".to_string(),
        (TypedLiteral::Bool(false), Syntax::Fortran) => ".false.".to_string(),
        (TypedLiteral::Bool(true), Syntax::C) => "true".to_string(),
        (TypedLiteral::Bool(false), Syntax::C) => "false".to_string(),
    }
}

/* `digits` significant digits, exponent rendered as E+XX */
pub fn scientific(value: f64, digits: usize) -> String {
    let text = format!("{:.*E}", digits.saturating_sub(1), value);
    match text.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        }
        None => text,
    }
}

/* Bytes that may appear as themselves inside a quoted literal */
fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

fn is_control(c: char) -> bool {
    c.is_ascii() && !is_printable(c as u8)
}

pub fn quote_fortran(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/* A character constant expression: quoted runs, with control characters
 * spliced in through `achar`. Valid wherever a constant expression is,
 * which excludes `data` statement items. */
pub fn fortran_text(text: &str) -> String {
    let mut parts = Vec::new();
    let mut run = String::new();
    for c in text.chars() {
        if is_control(c) {
            if !run.is_empty() {
                parts.push(quote_fortran(&run));
                run.clear();
            }
            parts.push(format!("achar({}, kind=C_CHAR)", u32::from(c)));
        } else {
            run.push(c);
        }
    }
    if !run.is_empty() || parts.is_empty() {
        parts.push(quote_fortran(&run));
    }
    parts.join(" // ")
}

/* Bytes other than the terminator that a `data` statement cannot quote */
pub fn needs_byte_constant(byte: u8) -> bool {
    byte != 0 && !is_printable(byte)
}

/* Named constant the native module declares for such a byte */
pub fn byte_constant_name(byte: u8) -> String {
    format!("byte_{}", byte)
}

/* One element of a character buffer, exactly one byte wide in both
 * languages. Non-printable bytes are octal escapes in C and references to
 * `byte_constant_name` constants in the native module. */
pub fn byte_literal(byte: u8, syntax: Syntax) -> String {
    match syntax {
        _ if byte == 0 => syntax.sentinel().to_string(),
        Syntax::Fortran if needs_byte_constant(byte) => byte_constant_name(byte),
        Syntax::Fortran => quote_fortran(&char::from(byte).to_string()),
        Syntax::C if needs_byte_constant(byte) => format!("'\\{:03o}'", byte),
        Syntax::C => quote_c_char(char::from(byte)),
    }
}

fn escape_c(c: char, quote: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        c if c == quote => format!("\\{}", c),
        c if is_control(c) => format!("\\{:03o}", u32::from(c)),
        c => c.to_string(),
    }
}

pub fn quote_c_string(text: &str) -> String {
    let body: String = text.chars().map(|c| escape_c(c, '"')).collect();
    format!("\"{}\"", body)
}

pub fn quote_c_char(c: char) -> String {
    if c == '\0' {
        return "'\\0'".to_string();
    }
    format!("'{}'", escape_c(c, '\''))
}

/* Render the literals an initializer actually uses: at most `limit` of
 * them, in order. Longer lists are clipped, not rejected. */
pub fn render_list(
    kind: FieldKind,
    values: &[DataValue],
    limit: usize,
    syntax: Syntax,
) -> Result<Vec<String>, LiteralError> {
    values
        .iter()
        .take(limit)
        .map(|v| render(kind, v, syntax))
        .collect()
}

/* Lay out `opening item, item, ... closing`, breaking before an item that
 * would push the line past LINE_WIDTH. Continuation lines are indented to
 * the column where the first item started. */
pub fn wrap_list(opening: &str, items: &[String], closing: &str, syntax: Syntax) -> String {
    let continuation = syntax.continuation();
    let indent = " ".repeat(opening.chars().count());

    let mut out = String::new();
    let mut line = opening.to_string();
    let mut line_has_item = false;

    for (i, item) in items.iter().enumerate() {
        let last = i + 1 == items.len();
        let piece = if last {
            format!("{}{}", item, closing)
        } else {
            format!("{},", item)
        };
        let reserve = if last { 0 } else { continuation.len() };
        let needed = line.chars().count() + piece.chars().count() + reserve;

        if line_has_item && needed > LINE_WIDTH {
            out.push_str(line.trim_end());
            out.push_str(continuation);
            out.push('\n');
            line = indent.clone();
        }

        line.push_str(&piece);
        if !last {
            line.push(' ');
        }
        line_has_item = true;
    }

    if items.is_empty() {
        line.push_str(closing);
    }
    out.push_str(&line);
    out
}
