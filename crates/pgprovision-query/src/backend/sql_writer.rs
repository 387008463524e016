//! SQL Writer helper for constructing SQL strings

/// SQL Writer for constructing SQL strings
///
/// # Examples
///
/// ```
/// use pgprovision_query::backend::SqlWriter;
///
/// let mut writer = SqlWriter::new();
/// writer.push("GRANT");
/// writer.push_keyword("USAGE");
/// writer.push_keyword("ON SCHEMA");
/// writer.push_space();
/// writer.push_identifier("public", |s| format!("\"{}\"", s));
///
/// assert_eq!(writer.finish(), "GRANT USAGE ON SCHEMA \"public\"");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlWriter {
	sql: String,
}

impl SqlWriter {
	/// Create a new SQL writer
	pub fn new() -> Self {
		Self::default()
	}

	/// Push a string to SQL
	pub fn push(&mut self, s: &str) {
		self.sql.push_str(s);
	}

	/// Push a space to SQL, unless one is already there
	pub fn push_space(&mut self) {
		if !self.sql.is_empty() && !self.sql.ends_with(' ') {
			self.sql.push(' ');
		}
	}

	/// Push an identifier through the dialect's escape function
	pub fn push_identifier<F>(&mut self, ident: &str, escape_fn: F)
	where
		F: FnOnce(&str) -> String,
	{
		self.sql.push_str(&escape_fn(ident));
	}

	/// Push a keyword (with automatic spacing)
	pub fn push_keyword(&mut self, keyword: &str) {
		self.push_space();
		self.sql.push_str(keyword);
	}

	/// Push a list of items with a separator
	pub fn push_list<I, T, F>(&mut self, items: I, separator: &str, mut f: F)
	where
		I: IntoIterator<Item = T>,
		F: FnMut(&mut Self, T),
	{
		let mut first = true;
		for item in items {
			if !first {
				self.sql.push_str(separator);
			}
			f(self, item);
			first = false;
		}
	}

	/// Get current SQL string
	pub fn sql(&self) -> &str {
		&self.sql
	}

	/// Consume writer and return the SQL
	pub fn finish(self) -> String {
		self.sql
	}
}
