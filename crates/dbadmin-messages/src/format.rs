//! printf-style substitution
//!
//! Supports the directives used by translated message templates:
//! `%[argnum$][flags][width][.precision]conversion` with the conversions
//! `b c d e E f F o s u x X` and the literal `%%`.
//!
//! Flags are `-` (left-justify), `+` (always print the sign), `0` (pad with
//! zeros), a space (pad with spaces) and `'c` (pad with `c`). Positional and
//! sequential directives may be mixed; sequential ones are counted
//! independently of positional ones.

use std::iter::Peekable;
use std::str::Chars;

/// Errors raised while substituting arguments into a template
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
	#[error("Argument {position} is required, {given} given")]
	MissingArgument { position: usize, given: usize },

	#[error("Argument number specifier must be greater than zero")]
	InvalidPosition,

	#[error("Unknown format specifier \"{0}\"")]
	UnknownConversion(char),

	#[error("Missing format specifier at end of string")]
	Truncated,

	#[error("Argument {position} cannot be formatted with %{conversion}: {value:?}")]
	TypeMismatch {
		position: usize,
		conversion: char,
		value: String,
	},
}

/// A value substituted into a template
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
	Int(i64),
	Float(f64),
	Str(String),
}

impl FormatArg {
	fn to_text(&self) -> String {
		match self {
			FormatArg::Int(v) => v.to_string(),
			FormatArg::Float(v) => v.to_string(),
			FormatArg::Str(s) => s.clone(),
		}
	}

	fn to_int(&self, position: usize, conversion: char) -> Result<i64, FormatError> {
		match self {
			FormatArg::Int(v) => Ok(*v),
			FormatArg::Float(v) => Ok(*v as i64),
			FormatArg::Str(s) => {
				let trimmed = s.trim();
				trimmed
					.parse::<i64>()
					.ok()
					.or_else(|| {
						trimmed
							.parse::<f64>()
							.ok()
							.filter(|f| f.is_finite())
							.map(|f| f as i64)
					})
					.ok_or_else(|| FormatError::TypeMismatch {
						position,
						conversion,
						value: s.clone(),
					})
			}
		}
	}

	fn to_float(&self, position: usize, conversion: char) -> Result<f64, FormatError> {
		match self {
			FormatArg::Int(v) => Ok(*v as f64),
			FormatArg::Float(v) => Ok(*v),
			FormatArg::Str(s) => s.trim().parse::<f64>().map_err(|_| FormatError::TypeMismatch {
				position,
				conversion,
				value: s.clone(),
			}),
		}
	}
}

impl From<i64> for FormatArg {
	fn from(value: i64) -> Self {
		FormatArg::Int(value)
	}
}

impl From<f64> for FormatArg {
	fn from(value: f64) -> Self {
		FormatArg::Float(value)
	}
}

impl From<&str> for FormatArg {
	fn from(value: &str) -> Self {
		FormatArg::Str(value.to_string())
	}
}

impl From<String> for FormatArg {
	fn from(value: String) -> Self {
		FormatArg::Str(value)
	}
}

#[derive(Debug)]
struct Directive {
	position: Option<usize>,
	left: bool,
	plus: bool,
	pad: char,
	width: Option<usize>,
	precision: Option<usize>,
	conversion: char,
}

impl Directive {
	/// Parse everything after the `%`
	fn parse(chars: &mut Peekable<Chars<'_>>) -> Result<Self, FormatError> {
		let mut position = None;
		let mut probe = chars.clone();
		let digits = take_digits(&mut probe);
		if !digits.is_empty() && probe.peek() == Some(&'$') {
			probe.next();
			*chars = probe;
			let index = digits
				.parse::<usize>()
				.map_err(|_| FormatError::InvalidPosition)?;
			if index == 0 {
				return Err(FormatError::InvalidPosition);
			}
			position = Some(index);
		}

		let mut directive = Directive {
			position,
			left: false,
			plus: false,
			pad: ' ',
			width: None,
			precision: None,
			conversion: 's',
		};

		loop {
			match chars.peek() {
				Some('-') => directive.left = true,
				Some('+') => directive.plus = true,
				Some('0') => directive.pad = '0',
				Some(' ') => directive.pad = ' ',
				Some('\'') => {
					chars.next();
					directive.pad = chars.peek().copied().ok_or(FormatError::Truncated)?;
				}
				_ => break,
			}
			chars.next();
		}

		let width = take_digits(chars);
		if !width.is_empty() {
			directive.width = width.parse().ok();
		}

		if chars.peek() == Some(&'.') {
			chars.next();
			directive.precision = Some(take_digits(chars).parse().unwrap_or(0));
		}

		directive.conversion = chars.next().ok_or(FormatError::Truncated)?;
		if !"bcdeEfFosuxX".contains(directive.conversion) {
			return Err(FormatError::UnknownConversion(directive.conversion));
		}

		Ok(directive)
	}

	fn render(&self, arg: &FormatArg, position: usize) -> Result<String, FormatError> {
		let conversion = self.conversion;
		let body = match conversion {
			's' => {
				let text = arg.to_text();
				match self.precision {
					Some(max) => text.chars().take(max).collect(),
					None => text,
				}
			}
			'd' => self.signed(arg.to_int(position, conversion)?.to_string()),
			'u' => (arg.to_int(position, conversion)? as u64).to_string(),
			'f' | 'F' => {
				let value = arg.to_float(position, conversion)?;
				self.signed(format!("{:.*}", self.precision.unwrap_or(6), value))
			}
			'e' | 'E' => {
				let value = arg.to_float(position, conversion)?;
				let text = exponent(value, self.precision.unwrap_or(6));
				self.signed(if conversion == 'E' {
					text.to_uppercase()
				} else {
					text
				})
			}
			'x' => format!("{:x}", arg.to_int(position, conversion)? as u64),
			'X' => format!("{:X}", arg.to_int(position, conversion)? as u64),
			'o' => format!("{:o}", arg.to_int(position, conversion)? as u64),
			'b' => format!("{:b}", arg.to_int(position, conversion)? as u64),
			'c' => {
				// %c ignores width and padding
				let code = arg.to_int(position, conversion)?;
				return Ok(u32::try_from(code)
					.ok()
					.and_then(char::from_u32)
					.map(String::from)
					.unwrap_or_default());
			}
			other => return Err(FormatError::UnknownConversion(other)),
		};
		Ok(self.pad(body))
	}

	fn signed(&self, text: String) -> String {
		if self.plus && !text.starts_with('-') {
			format!("+{}", text)
		} else {
			text
		}
	}

	fn pad(&self, body: String) -> String {
		let len = body.chars().count();
		let width = match self.width {
			Some(width) if width > len => width,
			_ => return body,
		};
		let fill = self.pad.to_string().repeat(width - len);

		if self.left {
			return body + &fill;
		}
		let numeric = "deEfF".contains(self.conversion);
		if numeric && self.pad == '0' && (body.starts_with('-') || body.starts_with('+')) {
			let (sign, digits) = body.split_at(1);
			return format!("{}{}{}", sign, fill, digits);
		}
		fill + &body
	}
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
	let mut digits = String::new();
	while let Some(ch) = chars.peek().copied().filter(char::is_ascii_digit) {
		digits.push(ch);
		chars.next();
	}
	digits
}

/// `1.5e+3` style: signed exponent without zero padding
fn exponent(value: f64, precision: usize) -> String {
	let text = format!("{:.*e}", precision, value);
	match text.split_once('e') {
		Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
		_ => text,
	}
}

/// Substitute `args` into `template`
///
/// # Examples
///
/// ```
/// use dbadmin_messages::format::{FormatArg, sprintf};
///
/// let args = [FormatArg::Int(3), FormatArg::from("users")];
/// assert_eq!(
///     sprintf("%1$d rows in %2$s", &args).unwrap(),
///     "3 rows in users"
/// );
/// assert_eq!(sprintf("%05.1f%%", &[FormatArg::Float(2.5)]).unwrap(), "002.5%");
/// ```
pub fn sprintf(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
	let mut out = String::with_capacity(template.len());
	let mut chars = template.chars().peekable();
	let mut next_arg = 0usize;

	while let Some(ch) = chars.next() {
		if ch != '%' {
			out.push(ch);
			continue;
		}
		if chars.peek() == Some(&'%') {
			chars.next();
			out.push('%');
			continue;
		}

		let directive = Directive::parse(&mut chars)?;
		let index = match directive.position {
			Some(position) => position - 1,
			None => {
				next_arg += 1;
				next_arg - 1
			}
		};
		let arg = args.get(index).ok_or(FormatError::MissingArgument {
			position: index + 1,
			given: args.len(),
		})?;
		out.push_str(&directive.render(arg, index + 1)?);
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn int(v: i64) -> FormatArg {
		FormatArg::Int(v)
	}

	fn text(v: &str) -> FormatArg {
		FormatArg::from(v)
	}

	#[rstest]
	#[case("%s", vec![text("a")], "a")]
	#[case("%s and %s", vec![text("a"), text("b")], "a and b")]
	#[case("%2$s %1$s", vec![text("a"), text("b")], "b a")]
	#[case("%1$s %s %s", vec![text("a"), text("b")], "a a b")]
	#[case("%d", vec![int(-42)], "-42")]
	#[case("%+d", vec![int(42)], "+42")]
	#[case("%5d|", vec![int(42)], "   42|")]
	#[case("%-5d|", vec![int(42)], "42   |")]
	#[case("%05d", vec![int(-42)], "-0042")]
	#[case("%'*6s", vec![text("ab")], "****ab")]
	#[case("%.2s", vec![text("abcdef")], "ab")]
	#[case("%u", vec![int(-1)], "18446744073709551615")]
	#[case("%x %X %o %b", vec![int(255), int(255), int(8), int(5)], "ff FF 10 101")]
	#[case("%c", vec![int(65)], "A")]
	#[case("%f", vec![FormatArg::Float(1.5)], "1.500000")]
	#[case("%.2F", vec![FormatArg::Float(3.14159)], "3.14")]
	#[case("%e", vec![FormatArg::Float(1234.5)], "1.234500e+3")]
	#[case("%.1E", vec![FormatArg::Float(0.00012)], "1.2E-4")]
	#[case("%d%%", vec![int(50)], "50%")]
	#[case("100%%", vec![], "100%")]
	#[case("%d", vec![text(" 7 ")], "7")]
	#[case("%d", vec![text("2.9")], "2")]
	#[case("%s", vec![FormatArg::Float(2.0)], "2")]
	#[case("%s", vec![int(5), text("unused")], "5")]
	fn test_sprintf(#[case] template: &str, #[case] args: Vec<FormatArg>, #[case] expected: &str) {
		assert_eq!(sprintf(template, &args).unwrap(), expected);
	}

	#[rstest]
	fn test_missing_argument() {
		let result = sprintf("%s %s", &[text("a")]);
		assert_eq!(
			result,
			Err(FormatError::MissingArgument {
				position: 2,
				given: 1
			})
		);
	}

	#[rstest]
	fn test_missing_positional_argument() {
		let result = sprintf("%3$s", &[text("a")]);
		assert_eq!(
			result,
			Err(FormatError::MissingArgument {
				position: 3,
				given: 1
			})
		);
	}

	#[rstest]
	fn test_zero_position() {
		assert_eq!(sprintf("%0$s", &[text("a")]), Err(FormatError::InvalidPosition));
	}

	#[rstest]
	fn test_unknown_conversion() {
		assert_eq!(
			sprintf("%y", &[text("a")]),
			Err(FormatError::UnknownConversion('y'))
		);
	}

	#[rstest]
	#[case("trailing %")]
	#[case("%5")]
	#[case("%'")]
	fn test_truncated(#[case] template: &str) {
		assert_eq!(sprintf(template, &[text("a")]), Err(FormatError::Truncated));
	}

	#[rstest]
	fn test_type_mismatch() {
		let result = sprintf("%1$d", &[text("&lt;b&gt;")]);
		assert_eq!(
			result,
			Err(FormatError::TypeMismatch {
				position: 1,
				conversion: 'd',
				value: "&lt;b&gt;".to_string()
			})
		);
	}

	#[rstest]
	fn test_no_directives_ignores_arguments() {
		assert_eq!(sprintf("plain", &[int(1)]).unwrap(), "plain");
	}
}
