//! Version string ordering
//!
//! Versions are split into numeric and alphabetic parts (`5.2.0-rc1` becomes
//! `5`, `2`, `0`, `rc`, `1`). Numbers compare numerically; words compare by
//! rank: `dev` < `alpha` = `a` < `beta` = `b` < `RC` = `rc` < a number <
//! `pl` = `p`, with unknown words ranked below `dev`.

use std::cmp::Ordering;

/// Rank given to a numeric part when compared with a word
const NUMBER_RANK: i8 = 4;

const SPECIAL_FORMS: &[(&str, i8)] = &[
	("dev", 0),
	("alpha", 1),
	("a", 1),
	("beta", 2),
	("b", 2),
	("RC", 3),
	("rc", 3),
	("#", NUMBER_RANK),
	("pl", 5),
	("p", 5),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part<'a> {
	Number(&'a str),
	Word(&'a str),
}

impl Part<'_> {
	fn rank(&self) -> i8 {
		match self {
			Part::Number(_) => NUMBER_RANK,
			Part::Word(word) => SPECIAL_FORMS
				.iter()
				.find(|(name, _)| word.starts_with(name))
				.map(|(_, rank)| *rank)
				.unwrap_or(-6),
		}
	}
}

fn compare_parts(left: Part<'_>, right: Part<'_>) -> Ordering {
	match (left, right) {
		(Part::Number(a), Part::Number(b)) => compare_numbers(a, b),
		_ => left.rank().cmp(&right.rank()),
	}
}

// Digit strings of any length, without overflow
fn compare_numbers(a: &str, b: &str) -> Ordering {
	let a = a.trim_start_matches('0');
	let b = b.trim_start_matches('0');
	a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn split(version: &str) -> Vec<Part<'_>> {
	let mut parts = Vec::new();
	let mut start: Option<(usize, bool)> = None;

	for (index, ch) in version.char_indices() {
		if matches!(ch, '.' | '-' | '_' | '+') {
			if let Some((from, digits)) = start.take() {
				parts.push(part(&version[from..index], digits));
			}
			continue;
		}
		let digit = ch.is_ascii_digit();
		match start {
			Some((from, digits)) if digits != digit => {
				parts.push(part(&version[from..index], digits));
				start = Some((index, digit));
			}
			Some(_) => {}
			None => start = Some((index, digit)),
		}
	}
	if let Some((from, digits)) = start {
		parts.push(part(&version[from..], digits));
	}

	parts
}

fn part(text: &str, digits: bool) -> Part<'_> {
	if digits { Part::Number(text) } else { Part::Word(text) }
}

/// Compare two version strings
///
/// When one version has extra trailing parts, a leading number there makes
/// it newer and a word is ranked against a number (`1.0rc1` < `1.0` <
/// `1.0.1` < `1.0pl1`).
///
/// # Examples
///
/// ```
/// use dbadmin_themes::version_compare;
/// use std::cmp::Ordering;
///
/// assert_eq!(version_compare("5.2.0", "5.10"), Ordering::Less);
/// assert_eq!(version_compare("1.0rc1", "1.0"), Ordering::Less);
/// assert_eq!(version_compare("1.0-beta", "1.0.alpha"), Ordering::Greater);
/// assert_eq!(version_compare("1.0", "1.0.0"), Ordering::Less);
/// ```
pub fn version_compare(left: &str, right: &str) -> Ordering {
	let left = split(left);
	let right = split(right);

	for (a, b) in left.iter().zip(right.iter()) {
		let ordering = compare_parts(*a, *b);
		if ordering != Ordering::Equal {
			return ordering;
		}
	}

	let common = left.len().min(right.len());
	match (left.get(common), right.get(common)) {
		(Some(Part::Number(_)), _) => Ordering::Greater,
		(Some(extra), _) => compare_parts(*extra, Part::Word("#")),
		(_, Some(Part::Number(_))) => Ordering::Less,
		(_, Some(extra)) => compare_parts(Part::Word("#"), *extra),
		(None, None) => Ordering::Equal,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("1.0", "1.0", Ordering::Equal)]
	#[case("1.0", "1.00", Ordering::Equal)]
	#[case("1.2", "1.10", Ordering::Less)]
	#[case("5.2.0", "5.2", Ordering::Greater)]
	#[case("1.0.0", "1.0.0.1", Ordering::Less)]
	#[case("1.0-dev", "1.0-alpha", Ordering::Less)]
	#[case("1.0a1", "1.0b1", Ordering::Less)]
	#[case("1.0RC1", "1.0rc1", Ordering::Equal)]
	#[case("1.0rc2", "1.0", Ordering::Less)]
	#[case("1.0pl1", "1.0", Ordering::Greater)]
	#[case("1.0foo", "1.0dev", Ordering::Less)]
	#[case("1_0+1", "1.0.1", Ordering::Equal)]
	#[case("99999999999999999999", "1", Ordering::Greater)]
	#[case("", "", Ordering::Equal)]
	#[case("", "1", Ordering::Less)]
	fn test_version_compare(#[case] left: &str, #[case] right: &str, #[case] expected: Ordering) {
		assert_eq!(version_compare(left, right), expected);
		assert_eq!(version_compare(right, left), expected.reverse());
	}

	#[rstest]
	fn test_split() {
		assert_eq!(
			split("5.2.0-rc1"),
			vec![
				Part::Number("5"),
				Part::Number("2"),
				Part::Number("0"),
				Part::Word("rc"),
				Part::Number("1"),
			]
		);
		assert!(split("..").is_empty());
	}
}
